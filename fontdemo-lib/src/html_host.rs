use crate::dom::dom_tree::{self, Document, NodeHandle};
use crate::error::SheetUnavailable;
use crate::host::{ElementBuilder, StyleSheetSource};
use crate::style::document_sheets::{DocumentStyleSheets, StyleSheetLoader};
use crate::style::owned_css::OwnedRule;

/// A parsed HTML page together with its style sheets.
#[derive(Debug)]
pub struct HtmlHost {
    pub document: Document,
    pub sheets: DocumentStyleSheets,
}

impl HtmlHost {
    /// Collects the style sheets of `document` up front.
    ///
    /// # Arguments
    ///
    /// * `document` - The parsed page.
    /// * `loader` - Fetches the text of `<link rel="stylesheet">` sheets.
    pub fn new(document: Document, loader: &dyn StyleSheetLoader) -> Self {
        let sheets = DocumentStyleSheets::collect(&document, loader);
        HtmlHost { document, sheets }
    }

    /// Gives the (possibly modified) document back.
    pub fn into_document(self) -> Document {
        self.document
    }
}

impl StyleSheetSource for HtmlHost {
    type Rule = OwnedRule;

    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn sheet_rules(&self, index: usize) -> Result<&[OwnedRule], SheetUnavailable> {
        let Some(sheet) = self.sheets.sheets.get(index) else {
            return Err(SheetUnavailable::new(
                format!("#{}", index),
                "no such style sheet",
            ));
        };
        match &sheet.rules {
            Ok(sheet) => Ok(&sheet.rules),
            Err(e) => Err(e.clone()),
        }
    }
}

impl ElementBuilder for HtmlHost {
    type Node = NodeHandle;

    fn create_element(&mut self, tag: &str, attributes: &[(&str, &str)]) -> NodeHandle {
        dom_tree::new_element(tag, attributes)
    }

    fn create_text(&mut self, text: &str) -> NodeHandle {
        dom_tree::new_text(text)
    }

    fn append_child(&mut self, parent: &NodeHandle, child: NodeHandle) {
        dom_tree::append_child(parent, &child);
    }

    fn prepend_to_body(&mut self, child: NodeHandle) -> bool {
        match self.document.body() {
            Some(body) => {
                dom_tree::prepend_child(&body, &child);
                true
            }
            None => false,
        }
    }
}
