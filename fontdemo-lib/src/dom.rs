use html5ever::namespace_url;
use html5ever::ns;
use html5ever::{LocalName, QualName};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub mod dom_tree {
    use super::*;

    /// Shared handle to a node of the tree.
    pub type NodeHandle = Rc<RefCell<Node>>;

    #[derive(Debug)]
    pub struct Node {
        pub data: NodeData,
        pub parent: Option<Weak<RefCell<Node>>>,
        pub children: Vec<NodeHandle>,
    }

    #[derive(Debug, Clone)]
    pub enum NodeData {
        DocumentRoot,
        Element(ElementNode),
        Text(String),
        Comment(String),
    }

    #[derive(Debug, Clone)]
    pub struct ElementNode {
        pub tag: String,
        pub qual_name: QualName,
        /// Attributes in source order.
        pub attributes: Vec<(String, String)>,
    }

    #[derive(Debug)]
    pub struct Document {
        pub root: NodeHandle,
        pub doctype: RefCell<Option<Doctype>>,
    }

    #[derive(Debug, Clone)]
    pub struct Doctype {
        pub name: String,
        pub public_id: String,
        pub system_id: String,
    }

    impl Node {
        fn new(data: NodeData) -> Self {
            Node {
                data,
                parent: None,
                children: Vec::new(),
            }
        }

        pub fn as_element(&self) -> Option<&ElementNode> {
            match &self.data {
                NodeData::Element(elem) => Some(elem),
                _ => None,
            }
        }

        pub fn is_element(&self) -> bool {
            matches!(self.data, NodeData::Element(_))
        }

        pub fn is_text(&self) -> bool {
            matches!(self.data, NodeData::Text(_))
        }
    }

    impl ElementNode {
        pub fn new(qual_name: QualName, attributes: Vec<(String, String)>) -> Self {
            ElementNode {
                tag: qual_name.local.to_string(),
                qual_name,
                attributes,
            }
        }

        pub fn attribute(&self, name: &str) -> Option<&str> {
            self.attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }

        /// True if the whitespace-separated attribute `name` contains `token`
        /// (ASCII case-insensitive, as for `rel`).
        pub fn has_token(&self, name: &str, token: &str) -> bool {
            self.attribute(name)
                .map(|value| {
                    value
                        .split_ascii_whitespace()
                        .any(|t| t.eq_ignore_ascii_case(token))
                })
                .unwrap_or(false)
        }
    }

    impl Document {
        /// The first `<body>` element in tree order.
        pub fn body(&self) -> Option<NodeHandle> {
            find_first_element(&self.root, "body")
        }
    }

    /// An empty document with only a root node.
    pub fn new_document() -> Document {
        Document {
            root: Rc::new(RefCell::new(Node::new(NodeData::DocumentRoot))),
            doctype: RefCell::new(None),
        }
    }

    pub fn new_node(data: NodeData) -> NodeHandle {
        Rc::new(RefCell::new(Node::new(data)))
    }

    /// Creates a detached HTML element.
    ///
    /// # Arguments
    ///
    /// * `tag` - Local name of the element, e.g. `"h2"`.
    /// * `attributes` - Attributes in the order they should be serialized.
    pub fn new_element(tag: &str, attributes: &[(&str, &str)]) -> NodeHandle {
        let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
        let attributes = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        new_node(NodeData::Element(ElementNode::new(qual_name, attributes)))
    }

    /// Creates a detached text node.
    pub fn new_text(text: &str) -> NodeHandle {
        new_node(NodeData::Text(text.to_string()))
    }

    pub fn parent_of(node: &NodeHandle) -> Option<NodeHandle> {
        node.borrow().parent.as_ref().and_then(Weak::upgrade)
    }

    /// Removes `node` from its parent, if it has one.
    pub fn detach(node: &NodeHandle) {
        let parent = node.borrow_mut().parent.take().and_then(|w| w.upgrade());
        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|child| !Rc::ptr_eq(child, node));
        }
    }

    fn insert_at(parent: &NodeHandle, index: usize, child: &NodeHandle) {
        child.borrow_mut().parent = Some(Rc::downgrade(parent));
        let mut parent_borrow = parent.borrow_mut();
        let index = index.min(parent_borrow.children.len());
        parent_borrow.children.insert(index, Rc::clone(child));
    }

    /// Appends `child` as the last child of `parent`, moving it if attached elsewhere.
    pub fn append_child(parent: &NodeHandle, child: &NodeHandle) {
        detach(child);
        let len = parent.borrow().children.len();
        insert_at(parent, len, child);
    }

    /// Inserts `child` before the current first child of `parent`.
    pub fn prepend_child(parent: &NodeHandle, child: &NodeHandle) {
        detach(child);
        insert_at(parent, 0, child);
    }

    /// Inserts `child` immediately before `sibling`.
    ///
    /// # Arguments
    ///
    /// * `sibling` - The node `child` is placed in front of.
    /// * `child` - The node to insert; it is detached from any previous parent.
    ///
    /// # Returns
    ///
    /// `false` when `sibling` has no parent.
    pub fn insert_before(sibling: &NodeHandle, child: &NodeHandle) -> bool {
        detach(child);
        let Some(parent) = parent_of(sibling) else {
            return false;
        };
        let index = position_in_parent(&parent, sibling).unwrap_or(0);
        insert_at(&parent, index, child);
        true
    }

    /// Appends text to `parent`, merging with a trailing text node.
    pub fn append_text(parent: &NodeHandle, text: &str) {
        let last = parent.borrow().children.last().cloned();
        if let Some(last) = last {
            let mut last_node = last.borrow_mut();
            if let NodeData::Text(existing) = &mut last_node.data {
                existing.push_str(text);
                return;
            }
        }
        append_child(parent, &new_text(text));
    }

    /// Inserts text before `sibling`, merging with a preceding text node.
    ///
    /// # Arguments
    ///
    /// * `sibling` - The node the text goes in front of.
    /// * `text` - The text to insert.
    ///
    /// # Returns
    ///
    /// `false` when `sibling` has no parent and nothing was inserted.
    pub fn insert_text_before(sibling: &NodeHandle, text: &str) -> bool {
        let Some(parent) = parent_of(sibling) else {
            return false;
        };
        let index = position_in_parent(&parent, sibling).unwrap_or(0);
        if index > 0 {
            let previous = Rc::clone(&parent.borrow().children[index - 1]);
            let mut previous_node = previous.borrow_mut();
            if let NodeData::Text(existing) = &mut previous_node.data {
                existing.push_str(text);
                return true;
            }
        }
        insert_at(&parent, index, &new_text(text));
        true
    }

    /// Moves every child of `node` to the end of `new_parent`.
    pub fn reparent_children(node: &NodeHandle, new_parent: &NodeHandle) {
        let children = std::mem::take(&mut node.borrow_mut().children);
        for child in children {
            child.borrow_mut().parent = None;
            append_child(new_parent, &child);
        }
    }

    fn position_in_parent(parent: &NodeHandle, node: &NodeHandle) -> Option<usize> {
        parent
            .borrow()
            .children
            .iter()
            .position(|child| Rc::ptr_eq(child, node))
    }

    /// All element nodes below `root`, in tree order.
    pub fn elements(root: &NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        collect_elements(root, &mut out);
        out
    }

    fn collect_elements(node: &NodeHandle, out: &mut Vec<NodeHandle>) {
        for child in &node.borrow().children {
            if child.borrow().is_element() {
                out.push(Rc::clone(child));
            }
            collect_elements(child, out);
        }
    }

    /// First element named `tag` (ASCII case-insensitive) below `root`.
    pub fn find_first_element(root: &NodeHandle, tag: &str) -> Option<NodeHandle> {
        elements(root).into_iter().find(|node| {
            node.borrow()
                .as_element()
                .is_some_and(|elem| elem.tag.eq_ignore_ascii_case(tag))
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(node: &NodeHandle) -> String {
        let mut out = String::new();
        collect_text(node, &mut out);
        out
    }

    fn collect_text(node: &NodeHandle, out: &mut String) {
        for child in &node.borrow().children {
            match &child.borrow().data {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Element(_) => collect_text(child, out),
                _ => {}
            }
        }
    }
}
