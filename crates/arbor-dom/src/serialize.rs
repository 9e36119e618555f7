//! Rendering a subtree back to markup.
//!
//! Text and attribute values are written verbatim: the parser never decodes
//! character references, so re-escaping would change the document.

use crate::{Attribute, DoctypeData, DomTree, NodeId, NodeType, QuoteStyle};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// Elements that never have children and are written without an end tag.
/// Includes the legacy `bgsound`, `command`, `keygen` and `image` names.
pub const VOID_ELEMENTS: &[&str] = &[
    "base", "bgsound", "command", "link", "meta", "area", "br", "embed", "img", "keygen", "wbr",
    "param", "source", "track", "hr", "input", "image",
];

/// Returns true if `tag_name` is a void element.
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

impl DomTree {
    /// Render the subtree at `id` as markup.
    ///
    /// A Document renders as the concatenation of its children.
    #[must_use]
    pub fn serialize(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.serialize_into(id, &mut out);
        out
    }

    /// Render the children of `id`, without `id` itself.
    #[must_use]
    pub fn serialize_children(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.serialize_into(child, &mut out);
        }
        out
    }

    /// Writes from an explicit stack: an element pushes its end tag below
    /// its children, so arbitrarily deep trees render without recursion.
    fn serialize_into(&self, id: NodeId, out: &mut String) {
        let mut stack = vec![Step::Node(id)];
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Node(id) => id,
                Step::EndTag(tag_name) => {
                    out.push_str("</");
                    out.push_str(tag_name);
                    out.push('>');
                    continue;
                }
            };
            let Some(node) = self.get(id) else {
                continue;
            };
            match &node.node_type {
                NodeType::Document => {}
                NodeType::Element(element) => {
                    out.push('<');
                    out.push_str(&element.tag_name);
                    for attr in &element.attrs {
                        out.push(' ');
                        write_attribute(attr, out);
                    }
                    out.push('>');
                    if node.children.is_empty() && is_void_element(&element.tag_name) {
                        continue;
                    }
                    stack.push(Step::EndTag(&element.tag_name));
                }
                NodeType::Text(data) => out.push_str(data),
                NodeType::Comment(data) => {
                    out.push_str("<!--");
                    out.push_str(data);
                    out.push_str("-->");
                }
                NodeType::Doctype(doctype) => write_doctype(doctype, out),
            }
            stack.extend(node.children.iter().rev().map(|&child| Step::Node(child)));
        }
    }
}

/// Pending work for [`DomTree::serialize_into`].
enum Step<'a> {
    Node(NodeId),
    EndTag(&'a str),
}

fn write_attribute(attr: &Attribute, out: &mut String) {
    out.push_str(&attr.name);
    // A bare attribute stays bare; anything else needs a value.
    if attr.quote == QuoteStyle::None && attr.value.is_empty() {
        return;
    }
    out.push('=');
    // An unquoted value that could not be re-read unquoted falls back to
    // the quote character it does not contain.
    let quote = match attr.quote {
        QuoteStyle::None if needs_quotes(&attr.value) => {
            if attr.value.contains('"') { Some('\'') } else { Some('"') }
        }
        quote => quote.quote_char(),
    };
    match quote {
        Some(q) => {
            out.push(q);
            out.push_str(&attr.value);
            out.push(q);
        }
        None => out.push_str(&attr.value),
    }
}

fn needs_quotes(value: &str) -> bool {
    value.starts_with(['"', '\''])
        || value.contains(|c: char| c.is_ascii_whitespace() || c == '>')
}

fn write_doctype(doctype: &DoctypeData, out: &mut String) {
    out.push_str("<!DOCTYPE");
    if !doctype.name.is_empty() {
        out.push(' ');
        out.push_str(&doctype.name);
    }
    if doctype.public {
        out.push_str(" PUBLIC");
    } else if doctype.system {
        out.push_str(" SYSTEM");
    }
    if doctype.public || doctype.system {
        let q = if doctype.identifier.contains('"') { '\'' } else { '"' };
        out.push(' ');
        out.push(q);
        out.push_str(&doctype.identifier);
        out.push(q);
    }
    out.push('>');
}

#[cfg(test)]
mod tests {
    use crate::{Attribute, DoctypeData, DomTree, NodeId, NodeType, QuoteStyle};

    #[test]
    fn test_serialize_keeps_quote_style() {
        let mut tree = DomTree::new();
        let div = tree.alloc(NodeType::element("div"));
        tree.append_child(NodeId::ROOT, div);
        tree.push_attribute(div, Attribute::with_quote("a", "1", QuoteStyle::Single));
        tree.push_attribute(div, Attribute::with_quote("b", "2", QuoteStyle::Double));
        tree.push_attribute(div, Attribute::with_quote("c", "3", QuoteStyle::None));
        tree.push_attribute(div, Attribute::with_quote("hidden", "", QuoteStyle::None));

        assert_eq!(tree.serialize(NodeId::ROOT), r#"<div a='1' b="2" c=3 hidden></div>"#);
    }

    #[test]
    fn test_serialize_void_element_has_no_end_tag() {
        let mut tree = DomTree::new();
        let p = tree.alloc(NodeType::element("p"));
        let br = tree.alloc(NodeType::element("br"));
        tree.append_child(NodeId::ROOT, p);
        tree.append_child(p, br);

        assert_eq!(tree.serialize(NodeId::ROOT), "<p><br></p>");
    }

    #[test]
    fn test_serialize_deeply_nested_tree() {
        let mut tree = DomTree::new();
        let mut parent = NodeId::ROOT;
        for _ in 0..200_000 {
            let div = tree.alloc(NodeType::element("div"));
            tree.append_child(parent, div);
            parent = div;
        }

        let html = tree.serialize(NodeId::ROOT);
        assert_eq!(html.len(), 200_000 * "<div></div>".len());
        assert!(html.starts_with("<div><div>"));
        assert!(html.ends_with("</div></div>"));
    }

    #[test]
    fn test_serialize_doctype_and_comment() {
        let mut tree = DomTree::new();
        let doctype = tree.alloc(NodeType::Doctype(DoctypeData {
            name: "html".to_string(),
            public: true,
            system: false,
            identifier: "-//W3C//DTD HTML 4.01//EN".to_string(),
        }));
        let comment = tree.alloc(NodeType::Comment(" hi ".to_string()));
        tree.append_child(NodeId::ROOT, doctype);
        tree.append_child(NodeId::ROOT, comment);

        assert_eq!(
            tree.to_string(),
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN"><!-- hi -->"#
        );
    }
}
