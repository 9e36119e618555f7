//! Node tree for the arbor HTML parser.
//!
//! This crate provides an arena-based tree of typed nodes modelled on the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), reduced to what a
//! lenient HTML parser and the tooling built on top of it need.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! A node's parent is a plain index and never owns anything, so moving a node
//! to another parent is an edit of two index lists.

mod serialize;

use std::fmt;

use strum_macros::Display;

pub use serialize::{VOID_ELEMENTS, is_void_element};

/// A type-safe index into a [`DomTree`].
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// How an attribute value was quoted in the source markup.
///
/// Kept so that serialization reproduces the original quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum QuoteStyle {
    /// `name=value` or a bare `name`.
    #[default]
    None,
    /// `name='value'`
    Single,
    /// `name="value"`
    Double,
}

impl QuoteStyle {
    /// The quote style introduced by `c`, if `c` is a quote character.
    #[must_use]
    pub const fn from_quote_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    /// The quote character written around a value, if any.
    #[must_use]
    pub const fn quote_char(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Single => Some('\''),
            Self::Double => Some('"'),
        }
    }
}

/// One attribute of an element.
///
/// "An element has an associated attribute list"; unlike the DOM, repeated
/// names are kept as separate entries in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, lowercased by the parser.
    pub name: String,
    /// Attribute value, verbatim.
    pub value: String,
    /// Quoting used in the source.
    pub quote: QuoteStyle,
}

impl Attribute {
    /// Create an attribute that serializes with double quotes.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quote: QuoteStyle::Double,
        }
    }

    /// Create an attribute with an explicit quote style.
    #[must_use]
    pub fn with_quote(name: impl Into<String>, value: impl Into<String>, quote: QuoteStyle) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quote,
        }
    }
}

/// Element-specific data.
///
/// NOTE: Only the local name and attributes are stored. Namespaces and custom
/// element state are outside the scope of this tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// Create an element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: Vec::new(),
        }
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Class names from the class attribute, in source order.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.get_attribute("class")
            .map(|classes| classes.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }
}

/// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
///
/// Only one identifier is kept; `public` and `system` record which keyword
/// introduced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctypeData {
    /// Lowercased doctype name, e.g. `html`.
    pub name: String,
    /// Set when the `PUBLIC` keyword was present.
    pub public: bool,
    /// Set when the `SYSTEM` keyword was present.
    pub system: bool,
    /// The quoted identifier following the keyword.
    pub identifier: String,
}

/// The kind of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    /// The synthetic root produced by the parser.
    Document,
    /// An element.
    Element,
    /// A run of character data.
    Text,
    /// A comment, including bogus comments.
    Comment,
    /// A document type declaration.
    Doctype,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    Doctype(DoctypeData),
}

impl NodeType {
    /// Create an element node type with no attributes.
    #[must_use]
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::Element(ElementData::new(tag_name))
    }

    /// The kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::Doctype(_) => NodeKind::Doctype,
        }
    }

    /// The node's character data: tag name, text, comment text or doctype
    /// name. Empty for the document.
    #[must_use]
    pub fn data(&self) -> &str {
        match self {
            Self::Document => "",
            Self::Element(element) => &element.tag_name,
            Self::Text(data) | Self::Comment(data) => data,
            Self::Doctype(doctype) => &doctype.name,
        }
    }

    /// Append one character to the node's data. Ignored for the document.
    pub fn push_data(&mut self, c: char) {
        match self {
            Self::Document => {}
            Self::Element(element) => element.tag_name.push(c),
            Self::Text(data) | Self::Comment(data) => data.push(c),
            Self::Doctype(doctype) => doctype.name.push(c),
        }
    }

    /// Append a string to the node's data. Ignored for the document.
    pub fn push_str(&mut self, s: &str) {
        match self {
            Self::Document => {}
            Self::Element(element) => element.tag_name.push_str(s),
            Self::Text(data) | Self::Comment(data) => data.push_str(s),
            Self::Doctype(doctype) => doctype.name.push_str(s),
        }
    }
}

/// A node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.node_type.kind()
    }

    /// See [`NodeType::data`].
    #[must_use]
    pub fn data(&self) -> &str {
        self.node_type.data()
    }

    /// The attribute list of an element, empty for other nodes.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match &self.node_type {
            NodeType::Element(element) => &element.attrs,
            _ => &[],
        }
    }
}

/// Arena-based node tree.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// All nodes live in one vector and refer to each other by [`NodeId`].
/// Nodes removed from their parent stay in the arena, detached, until the
/// tree is dropped. Cloning a `DomTree` yields a fully independent copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The root is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only a Document node.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(NodeType::Document)
    }

    /// Create a tree whose root is a node of the given type.
    #[must_use]
    pub fn with_root(node_type: NodeType) -> Self {
        Self {
            nodes: vec![Node::new(node_type)],
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new, detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type));
        id
    }

    /// The kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    /// The character data of a node, see [`NodeType::data`].
    #[must_use]
    pub fn data(&self, id: NodeId) -> &str {
        self.get(id).map_or("", Node::data)
    }

    /// Append one character to a node's data.
    pub fn push_data(&mut self, id: NodeId, c: char) {
        if let Some(node) = self.get_mut(id) {
            node.node_type.push_data(c);
        }
    }

    /// Append a string to a node's data.
    pub fn push_str(&mut self, id: NodeId, s: &str) {
        if let Some(node) = self.get_mut(id) {
            node.node_type.push_str(s);
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Position of `id` within its parent's children.
    #[must_use]
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?.checked_sub(1)?;
        self.children(parent).get(index).copied()
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Pre-order iterator over `id` and all of its descendants.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.get(id).is_some() { vec![id] } else { Vec::new() };
        Descendants { tree: self, stack }
    }

    /// Visit `id` and every node below it in document (pre-)order.
    ///
    /// Comments, doctypes and text nodes are visited as well as elements.
    pub fn walk<F>(&self, id: NodeId, mut visitor: F)
    where
        F: FnMut(NodeId, &Node),
    {
        for node_id in self.descendants(id) {
            if let Some(node) = self.get(node_id) {
                visitor(node_id, node);
            }
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get doctype data if this node is a doctype.
    #[must_use]
    pub fn as_doctype(&self, id: NodeId) -> Option<&DoctypeData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Doctype(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable doctype data if this node is a doctype.
    pub fn as_doctype_mut(&mut self, id: NodeId) -> Option<&mut DoctypeData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Doctype(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// Concatenated data of every text node below `id`.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node_id| self.as_text(node_id))
            .collect()
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| matches!(self.tag_name(id), Some("body" | "frameset")))
            .copied()
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Value of the first attribute called `name` on an element.
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.get_attribute(name))
    }

    /// Append an attribute without looking for an existing one of the same
    /// name. This is what the parser does for every attribute it reads.
    pub fn push_attribute(&mut self, id: NodeId, attribute: Attribute) {
        if let Some(element) = self.as_element_mut(id) {
            element.attrs.push(attribute);
        }
    }

    /// Set every attribute called `name` to `value`, or append a new
    /// double-quoted attribute when there is none.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(element) = self.as_element_mut(id) else {
            return;
        };
        let mut found = false;
        for attr in element.attrs.iter_mut().filter(|attr| attr.name == name) {
            value.clone_into(&mut attr.value);
            found = true;
        }
        if !found {
            element.attrs.push(Attribute::new(name, value));
        }
    }

    /// Rewrite the value of every attribute called `name`.
    pub fn transform_attribute<F>(&mut self, id: NodeId, name: &str, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        if let Some(element) = self.as_element_mut(id) {
            for attr in element.attrs.iter_mut().filter(|attr| attr.name == name) {
                attr.value = f(&attr.value);
            }
        }
    }

    /// Remove every attribute called `name`. Returns how many were removed.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> usize {
        let Some(element) = self.as_element_mut(id) else {
            return 0;
        };
        let before = element.attrs.len();
        element.attrs.retain(|attr| attr.name != name);
        before - element.attrs.len()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Remove `id` from its parent's children, if it has a parent.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&child| child != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Detach `child` and point it at `parent`. The caller places it in the
    /// children list.
    ///
    /// Refused when either node is not in this tree, or when `child` is
    /// `parent` or one of its ancestors. A leaf can never be an ancestor, so
    /// only a child with children of its own needs the ancestor walk.
    fn adopt(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.get(parent).is_none() || self.get(child).is_none() || parent == child {
            return false;
        }
        if !self.children(child).is_empty() && self.is_descendant_of(parent, child) {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        true
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`. A child that already
    /// has a parent is moved, never duplicated. Unknown ids and moves that
    /// would create a cycle leave the tree unchanged.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.adopt(parent, child) {
            return;
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.adopt(parent, child) {
            return;
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.insert(0, child);
        }
    }

    /// [§ 4.2.1 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// Insert `child` into `parent` immediately before `reference`. Appends
    /// when `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        if !self.adopt(parent, child) {
            return;
        }
        let Some(node) = self.get_mut(parent) else {
            return;
        };
        match node.children.iter().position(|&c| c == reference) {
            Some(index) => node.children.insert(index, child),
            None => node.children.push(child),
        }
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Returns false when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child);
        true
    }

    /// Replace `old` with `replacements`, in order, at the same position.
    /// Returns false when `old` is not a child of `parent`.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, replacements: &[NodeId]) -> bool {
        if self.parent(old) != Some(parent) {
            return false;
        }
        for &replacement in replacements {
            if replacement != old {
                self.insert_before(parent, replacement, old);
            }
        }
        if !replacements.contains(&old) {
            self.detach(old);
        }
        true
    }

    /// Move all children of `from` to the end of `to`, keeping their order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        for child in self.children(from).to_vec() {
            self.append_child(to, child);
        }
    }

    /// Detach every child of `parent`.
    pub fn clear_children(&mut self, parent: NodeId) {
        let Some(node) = self.get_mut(parent) else {
            return;
        };
        for child in std::mem::take(&mut node.children) {
            if let Some(child) = self.get_mut(child) {
                child.parent = None;
            }
        }
    }

    // =========================================================================
    // Copying
    // =========================================================================

    /// Deep copy of the subtree at `id` as a new tree rooted at the copy.
    #[must_use]
    pub fn clone_subtree(&self, id: NodeId) -> Self {
        let Some(node) = self.get(id) else {
            return Self::new();
        };
        let mut copy = Self::with_root(node.node_type.clone());
        copy.copy_children(self, id, NodeId::ROOT);
        copy
    }

    /// Copy the subtree at `id` of `other` into this tree. The copy is
    /// detached; the caller decides where to attach it.
    pub fn import_subtree(&mut self, other: &Self, id: NodeId) -> NodeId {
        let node_type = other
            .get(id)
            .map_or(NodeType::Document, |node| node.node_type.clone());
        let copy = self.alloc(node_type);
        self.copy_children(other, id, copy);
        copy
    }

    /// Copy the descendants of `from` in `other` below `to` in this tree.
    ///
    /// Works from an explicit stack, so the depth of the copied subtree is
    /// not limited by the call stack. Nodes are visited in document order,
    /// so appending keeps every children list in order.
    fn copy_children(&mut self, other: &Self, from: NodeId, to: NodeId) {
        let mut stack: Vec<(NodeId, NodeId)> =
            other.children(from).iter().rev().map(|&child| (child, to)).collect();
        while let Some((source, parent)) = stack.pop() {
            let Some(node) = other.get(source) else {
                continue;
            };
            let copy = self.alloc(node.node_type.clone());
            self.append_child(parent, copy);
            stack.extend(other.children(source).iter().rev().map(|&child| (child, copy)));
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(NodeId::ROOT))
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
