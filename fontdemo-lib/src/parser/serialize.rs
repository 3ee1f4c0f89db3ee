use crate::dom::dom_tree::{self, NodeData, NodeHandle};

/// Void elements never get an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are written verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "noscript", "plaintext",
];

/// Serializes the document, including its DOCTYPE, back to HTML text.
pub fn serialize_document(document: &dom_tree::Document) -> String {
    let mut out = String::new();
    if let Some(doctype) = &*document.doctype.borrow() {
        out.push_str("<!DOCTYPE ");
        out.push_str(&doctype.name);
        out.push('>');
    }
    for child in &document.root.borrow().children {
        serialize_node(child, false, &mut out);
    }
    out
}

/// Serializes a single node and its subtree.
pub fn serialize_node_to_string(node: &NodeHandle) -> String {
    let mut out = String::new();
    serialize_node(node, false, &mut out);
    out
}

fn serialize_node(node: &NodeHandle, raw_text: bool, out: &mut String) {
    let node = node.borrow();
    match &node.data {
        NodeData::DocumentRoot => {
            for child in &node.children {
                serialize_node(child, false, out);
            }
        }
        NodeData::Element(elem) => {
            out.push('<');
            out.push_str(&elem.tag);
            for (key, value) in &elem.attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                escape_into(value, true, out);
                out.push('"');
            }
            out.push('>');

            let tag = elem.tag.to_ascii_lowercase();
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
            for child in &node.children {
                serialize_node(child, raw, out);
            }
            out.push_str("</");
            out.push_str(&elem.tag);
            out.push('>');
        }
        NodeData::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                escape_into(text, false, out);
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::html::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_parsed_document() {
        let html = r#"<!DOCTYPE html><html><head><meta charset="utf-8"><style>a > b { color: red; }</style></head><body><p class="x">1 &lt; 2 &amp; "q"</p><br><!-- note --></body></html>"#;
        let document = parse_document(html);
        assert_eq!(serialize_document(&document), html);
    }

    #[test]
    fn escapes_attribute_quotes() {
        let node = dom_tree::new_element("p", &[("style", "font-family: \"A&B\"")]);
        dom_tree::append_child(&node, &dom_tree::new_text("<x>"));
        assert_eq!(
            serialize_node_to_string(&node),
            "<p style=\"font-family: &quot;A&amp;B&quot;\">&lt;x&gt;</p>"
        );
    }
}
