use crate::demo::DemoOptions;
use crate::html_host::HtmlHost;
use crate::parser::{html, serialize};
use crate::render::{self, RenderReport};
use crate::style::document_sheets::StyleSheetLoader;

pub mod font_demo {
    use super::*;
    use crate::error::{FontDemoError, Result};
    use crate::style::document_sheets::SiteRootLoader;
    use std::path::{Path, PathBuf};

    /// The rewritten page and what the render did to it.
    #[derive(Debug)]
    pub struct Generated {
        pub html: String,
        pub report: RenderReport,
    }

    /// Parses `html_content`, renders its font demo and serializes the result.
    pub fn generate(
        html_content: &str,
        loader: &dyn StyleSheetLoader,
        options: &DemoOptions,
    ) -> Generated {
        let document = html::parse_document(html_content);
        let mut host = HtmlHost::new(document, loader);
        let report = render::render(&mut host, options);
        let html = serialize::serialize_document(&host.into_document());
        Generated { html, report }
    }

    /// Reads a page from a static site and renders its font demo.
    ///
    /// Linked sheets resolve against `site_root`, or the page's directory
    /// when no root is given.
    pub fn generate_file(
        input: &Path,
        site_root: Option<&Path>,
        options: &DemoOptions,
    ) -> Result<Generated> {
        let html_content = std::fs::read_to_string(input).map_err(|source| FontDemoError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        let page_dir = canonical(
            input
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new(".")),
        );
        let root = site_root.map(canonical).unwrap_or_else(|| page_dir.clone());
        let loader = SiteRootLoader::new(root).with_page_dir(page_dir);

        Ok(generate(&html_content, &loader, options))
    }

    fn canonical(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}
