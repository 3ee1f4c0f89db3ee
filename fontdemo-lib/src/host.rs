//! The capabilities the renderer needs from the document it works on.
//!
//! The renderer never touches a DOM or CSS parser directly; it goes through
//! these traits, so it runs the same against a parsed HTML page
//! (`html_host::HtmlHost`) or an in-memory fake.

use crate::error::SheetUnavailable;
use crate::style::owned_css::{FontFaceRule, OwnedRule};

/// Ordered access to a document's style sheets.
pub trait StyleSheetSource {
    type Rule: CssRuleKind;

    /// Number of style sheets, in document order.
    fn sheet_count(&self) -> usize;

    /// The top-level rules of sheet `index`, or why they cannot be read.
    fn sheet_rules(&self, index: usize) -> Result<&[Self::Rule], SheetUnavailable>;
}

/// Tells font-face rules apart from every other rule kind.
pub trait CssRuleKind {
    fn as_font_face(&self) -> Option<&FontFaceRule>;

    fn kind_name(&self) -> &str;
}

impl CssRuleKind for OwnedRule {
    fn as_font_face(&self) -> Option<&FontFaceRule> {
        match self {
            OwnedRule::FontFace(face) => Some(face),
            OwnedRule::Other { .. } => None,
        }
    }

    fn kind_name(&self) -> &str {
        match self {
            OwnedRule::FontFace(_) => "font-face",
            OwnedRule::Other { kind } => kind,
        }
    }
}

/// Element creation and insertion primitives.
pub trait ElementBuilder {
    type Node;

    fn create_element(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Self::Node;

    fn create_text(&mut self, text: &str) -> Self::Node;

    fn append_child(&mut self, parent: &Self::Node, child: Self::Node);

    /// Inserts `child` before the first child of the body. Returns false when
    /// the document has no body.
    fn prepend_to_body(&mut self, child: Self::Node) -> bool;
}
