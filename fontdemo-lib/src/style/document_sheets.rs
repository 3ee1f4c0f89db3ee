//! Discovery of a document's style sheets.
//!
//! Sheets come from `<style>` elements and `<link rel="stylesheet">`
//! elements, in tree order. Linked sheets are fetched through a
//! [`StyleSheetLoader`]; anything it cannot provide becomes an unavailable
//! sheet rather than an error.

use crate::dom::dom_tree::{self, Document};
use crate::error::SheetUnavailable;
use crate::style::css::parse_style_sheet;
use crate::style::owned_css::OwnedStylesheet;
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Source of linked style sheet text.
pub trait StyleSheetLoader {
    fn load(&self, href: &str) -> Result<String, SheetUnavailable>;
}

/// Loads linked sheets from a static site directory.
///
/// `/`-prefixed hrefs resolve against the site root, others against the
/// directory of the page. Remote URLs are never fetched, and nothing outside
/// the root is read.
#[derive(Debug, Clone)]
pub struct SiteRootLoader {
    root: PathBuf,
    page_dir: PathBuf,
}

impl SiteRootLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        SiteRootLoader {
            page_dir: root.clone(),
            root,
        }
    }

    /// Resolve relative hrefs against `page_dir` instead of the root.
    pub fn with_page_dir(mut self, page_dir: impl Into<PathBuf>) -> Self {
        self.page_dir = page_dir.into();
        self
    }

    pub fn resolve(&self, href: &str) -> Result<PathBuf, SheetUnavailable> {
        let trimmed = href.trim();
        if trimmed.is_empty() {
            return Err(SheetUnavailable::new(href, "empty href"));
        }
        if trimmed.starts_with("//") || has_scheme(trimmed) {
            return Err(SheetUnavailable::new(href, "remote style sheets are not fetched"));
        }

        let path_part = trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let candidate = match path_part.strip_prefix('/') {
            Some(rooted) => self.root.join(rooted),
            None => self.page_dir.join(path_part),
        };

        let resolved = normalize_path(&candidate);
        if !resolved.starts_with(normalize_path(&self.root)) {
            return Err(SheetUnavailable::new(href, "outside the site root"));
        }
        Ok(resolved)
    }
}

impl StyleSheetLoader for SiteRootLoader {
    fn load(&self, href: &str) -> Result<String, SheetUnavailable> {
        let path = self.resolve(href)?;
        debug!("loading {} from {}", href, path.display());
        std::fs::read_to_string(&path).map_err(|e| SheetUnavailable::new(href, e.to_string()))
    }
}

/// A loader that provides nothing; every linked sheet is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLoader;

impl StyleSheetLoader for NoLoader {
    fn load(&self, href: &str) -> Result<String, SheetUnavailable> {
        Err(SheetUnavailable::new(href, "linked style sheets are not loaded"))
    }
}

fn has_scheme(href: &str) -> bool {
    match href.split_once(':') {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Lexically resolve `.` and `..` components.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// One style sheet of a document.
#[derive(Debug)]
pub struct DocumentStyleSheet {
    /// `href` of a linked sheet; `None` for `<style>` blocks.
    pub href: Option<String>,
    pub rules: Result<OwnedStylesheet, SheetUnavailable>,
}

/// The style sheets of a document, in document order.
#[derive(Debug, Default)]
pub struct DocumentStyleSheets {
    pub sheets: Vec<DocumentStyleSheet>,
}

impl DocumentStyleSheets {
    pub fn collect(document: &Document, loader: &dyn StyleSheetLoader) -> Self {
        let mut sheets = Vec::new();
        let mut inline_count = 0;

        for node in dom_tree::elements(&document.root) {
            let borrowed = node.borrow();
            let Some(elem) = borrowed.as_element() else {
                continue;
            };

            if elem.tag.eq_ignore_ascii_case("style") {
                inline_count += 1;
                let label = format!("<style> #{}", inline_count);
                let css = dom_tree::text_content(&node);
                sheets.push(DocumentStyleSheet {
                    href: None,
                    rules: parse_style_sheet(&label, &css),
                });
            } else if elem.tag.eq_ignore_ascii_case("link") && elem.has_token("rel", "stylesheet") {
                let Some(href) = elem.attribute("href") else {
                    continue;
                };
                let rules = loader
                    .load(href)
                    .and_then(|css| parse_style_sheet(href, &css));
                sheets.push(DocumentStyleSheet {
                    href: Some(href.to_string()),
                    rules,
                });
            }
        }

        debug!("found {} style sheets", sheets.len());
        DocumentStyleSheets { sheets }
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::html::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_remote_and_escaping_hrefs() {
        let loader = SiteRootLoader::new("/site").with_page_dir("/site/pages");
        for href in ["https://fonts.example/a.css", "//cdn.example/a.css", "data:text/css,a{}"] {
            assert_eq!(
                loader.resolve(href).unwrap_err().reason,
                "remote style sheets are not fetched"
            );
        }
        assert_eq!(
            loader.resolve("../../etc/passwd").unwrap_err().reason,
            "outside the site root"
        );
    }

    #[test]
    fn resolves_rooted_and_relative_hrefs() {
        let loader = SiteRootLoader::new("/site").with_page_dir("/site/pages");
        assert_eq!(
            loader.resolve("/styles/fonts.css?v=2").unwrap(),
            PathBuf::from("/site/styles/fonts.css")
        );
        assert_eq!(
            loader.resolve("../styles/fonts.css#x").unwrap(),
            PathBuf::from("/site/styles/fonts.css")
        );
        assert_eq!(
            loader.resolve("./local.css").unwrap(),
            PathBuf::from("/site/pages/local.css")
        );
    }

    #[test]
    fn collects_style_and_link_sheets_in_document_order() {
        let document = parse_document(
            r#"<html><head>
                <style>@font-face { font-family: First; }</style>
                <link rel="icon" href="/favicon.ico">
                <link rel="stylesheet" href="/remote.css">
                <link rel="stylesheet">
            </head><body>
                <style>@font-face { font-family: Last; }</style>
            </body></html>"#,
        );
        let sheets = DocumentStyleSheets::collect(&document, &NoLoader);
        assert_eq!(sheets.len(), 3);
        assert_eq!(sheets.sheets[0].href, None);
        assert_eq!(sheets.sheets[1].href.as_deref(), Some("/remote.css"));
        assert!(sheets.sheets[1].rules.is_err());

        let last = sheets.sheets[2].rules.as_ref().unwrap();
        assert_eq!(
            last.font_face_rules().next().unwrap().font_family.as_deref(),
            Some("Last")
        );
    }
}
