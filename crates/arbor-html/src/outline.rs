//! Indented outline of a tree, one node per line.
//!
//! Front ends choose how the tag, attribute, comment and doctype parts are
//! highlighted; [`format_tree`] is the plain form used in logs.

use std::io::{self, Write};

use arbor_dom::{DomTree, NodeId, NodeType};

/// The parts of an outline line a front end may highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlinePart {
    /// An element's tag name.
    Tag,
    /// An attribute name.
    AttrName,
    /// A quoted attribute value.
    AttrValue,
    /// A whole comment, delimiters included.
    Comment,
    /// A whole doctype.
    Doctype,
}

/// Write an outline of the subtree at `id`, indenting two spaces per level.
/// Each highlightable part goes through `paint` before it is written.
///
/// The walk uses an explicit stack, so the tree depth is not limited by the
/// call stack.
///
/// # Errors
///
/// Any error returned by `out`.
pub fn write_outline<W, F>(out: &mut W, tree: &DomTree, id: NodeId, mut paint: F) -> io::Result<()>
where
    W: Write,
    F: FnMut(OutlinePart, &str) -> String,
{
    let mut stack = vec![(id, 0_usize)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let indent = "  ".repeat(depth);
        match &node.node_type {
            NodeType::Document => writeln!(out, "{indent}#document")?,
            NodeType::Element(data) => {
                write!(out, "{indent}<{}", paint(OutlinePart::Tag, &data.tag_name))?;
                for attr in &data.attrs {
                    write!(out, " {}", paint(OutlinePart::AttrName, &attr.name))?;
                    if !attr.value.is_empty() {
                        let value = format!("\"{}\"", attr.value);
                        write!(out, "={}", paint(OutlinePart::AttrValue, &value))?;
                    }
                }
                writeln!(out, ">")?;
            }
            NodeType::Text(data) => writeln!(out, "{indent}\"{}\"", data.replace('\n', "\\n"))?,
            NodeType::Comment(data) => {
                let comment = format!("<!--{data}-->");
                writeln!(out, "{indent}{}", paint(OutlinePart::Comment, &comment))?;
            }
            NodeType::Doctype(_) => {
                let doctype = tree.serialize(id);
                writeln!(out, "{indent}{}", paint(OutlinePart::Doctype, &doctype))?;
            }
        }
        stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
    }
    Ok(())
}

/// Plain outline of the subtree at `id`.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_outline(&mut out, tree, id, |_, text| text.to_string());
    String::from_utf8_lossy(&out).into_owned()
}
