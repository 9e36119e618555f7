//! JSON view of a parsed tree.

use std::io::{self, Write};

use arbor_dom::{Attribute, DomTree, NodeId, NodeType, QuoteStyle};
use serde::Serialize;

/// The fields of one node, without its children.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonFields<'a> {
    Document,
    #[serde(rename_all = "camelCase")]
    Element {
        tag_name: &'a str,
        attributes: Vec<JsonAttribute<'a>>,
    },
    Text {
        content: &'a str,
    },
    Comment {
        content: &'a str,
    },
    Doctype {
        name: &'a str,
        public: bool,
        system: bool,
        identifier: &'a str,
    },
}

#[derive(Debug, Serialize)]
struct JsonAttribute<'a> {
    name: &'a str,
    value: &'a str,
    quote: &'static str,
}

impl<'a> JsonAttribute<'a> {
    fn new(attr: &'a Attribute) -> Self {
        let quote = match attr.quote {
            QuoteStyle::None => "none",
            QuoteStyle::Single => "single",
            QuoteStyle::Double => "double",
        };
        Self {
            name: &attr.name,
            value: &attr.value,
            quote,
        }
    }
}

impl<'a> JsonFields<'a> {
    fn new(node_type: &'a NodeType) -> Self {
        match node_type {
            NodeType::Document => Self::Document,
            NodeType::Element(data) => Self::Element {
                tag_name: &data.tag_name,
                attributes: data.attrs.iter().map(JsonAttribute::new).collect(),
            },
            NodeType::Text(data) => Self::Text { content: data },
            NodeType::Comment(data) => Self::Comment { content: data },
            NodeType::Doctype(doctype) => Self::Doctype {
                name: &doctype.name,
                public: doctype.public,
                system: doctype.system,
                identifier: &doctype.identifier,
            },
        }
    }

    /// Documents and elements carry a `children` array.
    const fn has_children(&self) -> bool {
        matches!(self, Self::Document | Self::Element { .. })
    }
}

enum Step {
    /// Write a node; `first` is false when a comma must precede it.
    Node { id: NodeId, first: bool },
    /// Close a `children` array and its object.
    Close,
}

/// Write the subtree at `id` as nested JSON objects.
///
/// Each node's fields go through `serde_json`; nesting is driven from an
/// explicit stack, so deep trees do not exhaust the call stack.
pub fn write_json<W: Write>(out: &mut W, tree: &DomTree, id: NodeId) -> io::Result<()> {
    let mut stack = vec![Step::Node { id, first: true }];
    while let Some(step) = stack.pop() {
        let (id, first) = match step {
            Step::Node { id, first } => (id, first),
            Step::Close => {
                out.write_all(b"]}")?;
                continue;
            }
        };
        let Some(node) = tree.get(id) else {
            continue;
        };
        if !first {
            out.write_all(b",")?;
        }
        let fields = JsonFields::new(&node.node_type);
        let object = serde_json::to_string(&fields)?;
        if !fields.has_children() {
            out.write_all(object.as_bytes())?;
            continue;
        }
        // Reopen the serialized object to append the children array.
        let head = object.strip_suffix('}').unwrap_or(&object);
        write!(out, "{head},\"children\":[")?;
        stack.push(Step::Close);
        stack.extend(
            node.children
                .iter()
                .enumerate()
                .rev()
                .map(|(index, &child)| Step::Node { id: child, first: index == 0 }),
        );
    }
    Ok(())
}
