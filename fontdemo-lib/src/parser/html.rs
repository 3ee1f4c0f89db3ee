//! Parsing HTML into the crate's DOM tree.
//!
//! html5ever drives the tokenizer and tree construction; `DemoTreeSink`
//! receives the tree builder's callbacks and builds a `dom_tree::Document`.

use crate::dom::dom_tree::{self, NodeData, NodeHandle};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{
    interface::{ElemName, ElementFlags, NodeOrText, QuirksMode, TreeSink},
    Attribute, LocalName, Namespace, QualName,
};
use log::debug;
use std::borrow::Cow;
use std::rc::Rc;

/// Parses a complete HTML document.
///
/// # Arguments
///
/// * `html_content` - The page source.
///
/// # Returns
///
/// The document tree, with html5ever's implied `<html>`, `<head>` and
/// `<body>` elements filled in.
pub fn parse_document(html_content: &str) -> dom_tree::Document {
    let tree_sink = DemoTreeSink::new();
    html5ever::parse_document(tree_sink, Default::default()).one(html_content)
}

/// TreeSink building a `dom_tree::Document`.
pub struct DemoTreeSink {
    document: dom_tree::Document,
}

impl DemoTreeSink {
    /// Creates a sink holding an empty document.
    pub fn new() -> Self {
        Self {
            document: dom_tree::new_document(),
        }
    }
}

impl Default for DemoTreeSink {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct DemoElemName {
    ns: Namespace,
    local: LocalName,
}

impl ElemName for DemoElemName {
    /// Local name of the element.
    fn local_name(&self) -> &LocalName {
        &self.local
    }

    /// Namespace of the element.
    fn ns(&self) -> &Namespace {
        &self.ns
    }
}

impl TreeSink for DemoTreeSink {
    type Handle = NodeHandle;
    type Output = dom_tree::Document;
    type ElemName<'a>
        = DemoElemName
    where
        Self: 'a;

    /// Returns the finished document.
    fn finish(self) -> Self::Output {
        self.document
    }

    /// Logs a recoverable parse error.
    fn parse_error(&self, msg: Cow<'static, str>) {
        debug!("HTML parse error: {}", msg);
    }

    /// Handle to the document root.
    fn get_document(&self) -> Self::Handle {
        Rc::clone(&self.document.root)
    }

    /// Qualified name of an element handle.
    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        match &target.borrow().data {
            NodeData::Element(elem) => DemoElemName {
                ns: elem.qual_name.ns.clone(),
                local: elem.qual_name.local.clone(),
            },
            // The tree builder only asks for names of elements it created.
            _ => DemoElemName {
                ns: Namespace::from(""),
                local: LocalName::from(""),
            },
        }
    }

    /// Creates a detached element, keeping attributes in source order.
    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attributes = attrs
            .into_iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect();
        dom_tree::new_node(NodeData::Element(dom_tree::ElementNode::new(
            name, attributes,
        )))
    }

    /// Creates a detached comment node.
    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        dom_tree::new_node(NodeData::Comment(text.to_string()))
    }

    /// Stores a processing instruction as a comment.
    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Self::Handle {
        dom_tree::new_node(NodeData::Comment(format!("?{} {}", target, data)))
    }

    /// Appends a node or text to `parent`; adjacent text is merged.
    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        match child {
            NodeOrText::AppendNode(node) => dom_tree::append_child(parent, &node),
            NodeOrText::AppendText(text) => dom_tree::append_text(parent, &text),
        }
    }

    /// Foster-parenting entry point: inserts before `element` when it is
    /// attached, otherwise appends to `prev_element`.
    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        if dom_tree::parent_of(element).is_some() {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    /// Records the DOCTYPE on the document.
    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        *self.document.doctype.borrow_mut() = Some(dom_tree::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        });
    }

    /// Template contents live directly under the template element.
    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        Rc::clone(target)
    }

    /// True if both handles point to the same node.
    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        Rc::ptr_eq(x, y)
    }

    /// Logs the quirks mode chosen by the tree builder.
    fn set_quirks_mode(&self, mode: QuirksMode) {
        debug!("document quirks mode: {:?}", mode);
    }

    /// Inserts a node or text immediately before `sibling`.
    fn append_before_sibling(&self, sibling: &Self::Handle, child: NodeOrText<Self::Handle>) {
        match child {
            NodeOrText::AppendNode(node) => {
                dom_tree::insert_before(sibling, &node);
            }
            NodeOrText::AppendText(text) => {
                dom_tree::insert_text_before(sibling, &text);
            }
        }
    }

    /// Adds the attributes `target` does not already carry.
    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        if let NodeData::Element(elem) = &mut target.borrow_mut().data {
            for attr in attrs {
                let key = attr.name.local.to_string();
                if elem.attribute(&key).is_none() {
                    elem.attributes.push((key, attr.value.to_string()));
                }
            }
        }
    }

    /// Detaches `target` from its parent.
    fn remove_from_parent(&self, target: &Self::Handle) {
        dom_tree::detach(target);
    }

    /// Moves all children of `node` to the end of `new_parent`.
    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        dom_tree::reparent_children(node, new_parent);
    }
}
