//! Builds the font demo for a whole document and inserts it at the top of
//! the body.

use crate::demo::{DemoOptions, FontDemo};
use crate::error::{DemoError, SheetUnavailable};
use crate::host::{CssRuleKind, ElementBuilder, StyleSheetSource};
use crate::style::owned_css::FontFaceRule;
use log::{debug, info, warn};

/// Class of the element holding every demo.
pub const DEMO_CONTAINER_CLASS: &str = "font-demo";

/// What one render produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Demos in insertion order.
    pub rendered: Vec<FontDemo>,
    /// Rules that were skipped, in the order they were met.
    pub skipped: Vec<DemoError>,
    pub unavailable_sheets: Vec<SheetUnavailable>,
    /// True when the demo container was inserted into the body.
    pub inserted: bool,
}

/// Font-face rules of every readable sheet, flattened in (sheet, rule) order.
///
/// Unreadable sheets contribute nothing and are returned alongside.
pub fn collect_font_face_rules<S: StyleSheetSource>(
    source: &S,
) -> (Vec<&FontFaceRule>, Vec<SheetUnavailable>) {
    let mut rules = Vec::new();
    let mut unavailable = Vec::new();

    for index in 0..source.sheet_count() {
        match source.sheet_rules(index) {
            Ok(sheet_rules) => {
                for rule in sheet_rules {
                    match rule.as_font_face() {
                        Some(face) => rules.push(face),
                        None => debug!("sheet {}: skipping {} rule", index, rule.kind_name()),
                    }
                }
            }
            Err(e) => {
                warn!("{}", e);
                unavailable.push(e);
            }
        }
    }

    (rules, unavailable)
}

/// Converts every rule, keeping each outcome.
pub fn convert_rules<'a, I>(rules: I) -> Vec<Result<FontDemo, DemoError>>
where
    I: IntoIterator<Item = &'a FontFaceRule>,
{
    rules.into_iter().map(FontDemo::from_rule).collect()
}

/// Renders the font demo of `host` into its body.
///
/// Invalid rules are skipped and reported; nothing is inserted when no rule
/// produced a demo. Each call inserts a new container.
pub fn render<H>(host: &mut H, options: &DemoOptions) -> RenderReport
where
    H: StyleSheetSource + ElementBuilder,
{
    let mut report = RenderReport::default();

    {
        let (rules, unavailable) = collect_font_face_rules(&*host);
        report.unavailable_sheets = unavailable;
        let outcomes = convert_rules(rules.iter().copied());

        for (rule, outcome) in rules.iter().zip(outcomes) {
            match outcome {
                Ok(demo) => report.rendered.push(demo),
                Err(e) => {
                    warn!("skipping {}: {}", rule, e);
                    report.skipped.push(e);
                }
            }
        }
    }

    if report.rendered.is_empty() {
        debug!("no font demos to insert");
        return report;
    }

    let container = host.create_element("div", &[("class", DEMO_CONTAINER_CLASS)]);
    for demo in &report.rendered {
        demo.append_to(host, &container, &options.sample_text);
    }
    report.inserted = host.prepend_to_body(container);
    if !report.inserted {
        warn!("document has no body; font demo not inserted");
    }

    info!(
        "rendered {} font demos ({} skipped, {} sheets unavailable)",
        report.rendered.len(),
        report.skipped.len(),
        report.unavailable_sheets.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::owned_css::OwnedRule;
    use pretty_assertions::assert_eq;

    /// In-memory host recording the elements it builds.
    #[derive(Default)]
    struct FakeHost {
        sheets: Vec<Result<Vec<OwnedRule>, SheetUnavailable>>,
        nodes: Vec<FakeNode>,
        body: Vec<usize>,
        has_body: bool,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum FakeNode {
        Element { tag: String, children: Vec<usize> },
        Text(String),
    }

    impl FakeHost {
        fn with_sheets(sheets: Vec<Result<Vec<OwnedRule>, SheetUnavailable>>) -> Self {
            FakeHost {
                sheets,
                has_body: true,
                ..Default::default()
            }
        }

        fn text_of(&self, id: usize) -> String {
            match &self.nodes[id] {
                FakeNode::Text(text) => text.clone(),
                FakeNode::Element { children, .. } => {
                    children.iter().map(|c| self.text_of(*c)).collect()
                }
            }
        }

        fn headings(&self) -> Vec<String> {
            self.nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| matches!(n, FakeNode::Element { tag, .. } if tag == "h2"))
                .map(|(id, _)| self.text_of(id))
                .collect()
        }
    }

    impl StyleSheetSource for FakeHost {
        type Rule = OwnedRule;

        fn sheet_count(&self) -> usize {
            self.sheets.len()
        }

        fn sheet_rules(&self, index: usize) -> Result<&[OwnedRule], SheetUnavailable> {
            match &self.sheets[index] {
                Ok(rules) => Ok(rules),
                Err(e) => Err(e.clone()),
            }
        }
    }

    impl ElementBuilder for FakeHost {
        type Node = usize;

        fn create_element(&mut self, tag: &str, _attributes: &[(&str, &str)]) -> usize {
            self.nodes.push(FakeNode::Element {
                tag: tag.to_string(),
                children: Vec::new(),
            });
            self.nodes.len() - 1
        }

        fn create_text(&mut self, text: &str) -> usize {
            self.nodes.push(FakeNode::Text(text.to_string()));
            self.nodes.len() - 1
        }

        fn append_child(&mut self, parent: &usize, child: usize) {
            if let FakeNode::Element { children, .. } = &mut self.nodes[*parent] {
                children.push(child);
            }
        }

        fn prepend_to_body(&mut self, child: usize) -> bool {
            if !self.has_body {
                return false;
            }
            self.body.insert(0, child);
            true
        }
    }

    fn face(family: &str) -> OwnedRule {
        OwnedRule::FontFace(FontFaceRule::new(family))
    }

    fn other(kind: &'static str) -> OwnedRule {
        OwnedRule::Other { kind }
    }

    #[test]
    fn no_font_faces_means_no_insertion() {
        let mut host = FakeHost::with_sheets(vec![Ok(vec![other("style"), other("media")])]);
        let report = render(&mut host, &DemoOptions::default());
        assert!(!report.inserted);
        assert!(host.body.is_empty());
        assert!(host.nodes.is_empty());

        let mut empty = FakeHost::with_sheets(Vec::new());
        assert_eq!(render(&mut empty, &DemoOptions::default()), RenderReport::default());
    }

    #[test]
    fn preserves_sheet_then_rule_order() {
        let mut host = FakeHost::with_sheets(vec![
            Ok(vec![face("a1"), other("style"), face("a2")]),
            Ok(vec![face("b1")]),
        ]);
        let report = render(&mut host, &DemoOptions::default());
        let families: Vec<_> = report.rendered.iter().map(|d| d.family.as_str()).collect();
        assert_eq!(families, vec!["a1", "a2", "b1"]);
        assert_eq!(host.headings(), vec!["A1 Regular", "A2 Regular", "B1 Regular"]);
        assert_eq!(host.body.len(), 1);
    }

    #[test]
    fn unavailable_sheet_does_not_stop_the_others() {
        let mut host = FakeHost::with_sheets(vec![
            Ok(vec![face("first")]),
            Err(SheetUnavailable::new("https://cdn.example/fonts.css", "remote")),
            Ok(vec![face("third")]),
        ]);
        let report = render(&mut host, &DemoOptions::default());
        assert_eq!(report.rendered.len(), 2);
        assert_eq!(report.unavailable_sheets.len(), 1);
        assert_eq!(report.unavailable_sheets[0].href, "https://cdn.example/fonts.css");
        assert!(report.inserted);
    }

    #[test]
    fn invalid_rules_are_skipped_and_reported() {
        let mut host = FakeHost::with_sheets(vec![Ok(vec![
            OwnedRule::FontFace(FontFaceRule::new("Lato").with_weight("250")),
            face("Lato"),
            OwnedRule::FontFace(FontFaceRule::default()),
            OwnedRule::FontFace(FontFaceRule::new("Lato").with_weight("bold").with_style("italic")),
        ])]);
        let report = render(&mut host, &DemoOptions::default());
        assert_eq!(
            report.skipped,
            vec![DemoError::invalid_weight("250"), DemoError::InvalidFamily]
        );
        assert_eq!(report.rendered.len(), 2);
        assert_eq!(host.headings(), vec!["Lato Regular", "Lato Bold Italic"]);
    }

    #[test]
    fn only_invalid_rules_insert_nothing() {
        let mut host = FakeHost::with_sheets(vec![Ok(vec![OwnedRule::FontFace(
            FontFaceRule::new("Lato").with_weight("heavy"),
        )])]);
        let report = render(&mut host, &DemoOptions::default());
        assert_eq!(report.skipped.len(), 1);
        assert!(!report.inserted);
        assert!(host.body.is_empty());
    }

    #[test]
    fn container_holds_heading_and_sample_per_demo() {
        let mut host = FakeHost::with_sheets(vec![Ok(vec![face("x"), face("y")])]);
        let options = DemoOptions {
            sample_text: "Sphinx of black quartz".to_string(),
        };
        render(&mut host, &options);

        let container = host.body[0];
        let FakeNode::Element { tag, children } = &host.nodes[container] else {
            panic!("container is not an element");
        };
        assert_eq!(tag, "div");
        let child_tags: Vec<_> = children
            .iter()
            .map(|c| match &host.nodes[*c] {
                FakeNode::Element { tag, .. } => tag.as_str(),
                FakeNode::Text(_) => "#text",
            })
            .collect();
        assert_eq!(child_tags, vec!["h2", "p", "h2", "p"]);
        assert_eq!(host.text_of(children[1]), "Sphinx of black quartz");
    }

    #[test]
    fn missing_body_is_reported() {
        let mut host = FakeHost::with_sheets(vec![Ok(vec![face("x")])]);
        host.has_body = false;
        let report = render(&mut host, &DemoOptions::default());
        assert_eq!(report.rendered.len(), 1);
        assert!(!report.inserted);
    }

    #[test]
    fn rendering_twice_inserts_twice() {
        let mut host = FakeHost::with_sheets(vec![Ok(vec![face("x")])]);
        render(&mut host, &DemoOptions::default());
        render(&mut host, &DemoOptions::default());
        assert_eq!(host.body.len(), 2);
    }
}
