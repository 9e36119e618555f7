//! Auto-closing and implied end tags.
//!
//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
//!
//! With no stack of open elements, the current node's ancestor chain stands
//! in for it. Auto-closing only ever looks at the new node's immediate
//! parent, and a scope set names the grandparents that block it.

use std::io::BufRead;

use arbor_dom::NodeId;

use super::InsertionMode;
use crate::parser::Parser;

/// A scope that blocks nothing.
pub(super) const ALL_SCOPE: &[&str] = &[];

/// "The stack of open elements is said to have a particular element in
/// scope when it has that element in the specific scope consisting of the
/// following element types"
pub(super) const BASE_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

/// "...in button scope when it has that element in the specific scope
/// consisting of the following element types: All the element types listed
/// above for the has an element in scope algorithm. button in the HTML
/// namespace"
pub(super) const BUTTON_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "button",
];

pub(super) const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
pub(super) const IMPLIED_END_TAGS: &[&str] = &["dd", "dt", "li", "option", "optgroup", "p", "rp", "rt"];

/// End tags that close open elements with implied end tags before being
/// matched.
pub(super) const END_TAGS_IMPLYING_END_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "button", "center", "details", "dir", "div", "dl",
    "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "listing", "menu", "nav",
    "ol", "pre", "section", "summary", "ul", "td", "th", "font", "body",
];

impl<R: BufRead> Parser<R> {
    /// Close the parent of `node` if it is a `target` element.
    pub(super) fn maybe_close_tag(&mut self, node: NodeId, target: &str, scope: &[&str]) {
        self.maybe_close_tags(node, &[target], scope);
    }

    /// If the parent of the freshly opened `node` is one of `targets`, and
    /// the grandparent is not in `scope`, close the parent: `node` moves up
    /// to become the grandparent's last child.
    pub(super) fn maybe_close_tags(&mut self, node: NodeId, targets: &[&str], scope: &[&str]) {
        let Some(parent) = self.tree.parent(node) else {
            return;
        };
        let Some(grandparent) = self.tree.parent(parent) else {
            return;
        };
        let Some(parent_name) = self.tree.tag_name(parent) else {
            return;
        };
        if !targets.contains(&parent_name) {
            return;
        }
        if self.tree.tag_name(grandparent).is_some_and(|name| scope.contains(&name)) {
            return;
        }

        log::debug!(
            target: "arbor::parser",
            "<{}> closes <{parent_name}>",
            self.tree.tag_name(node).unwrap_or_default()
        );
        self.tree.append_child(grandparent, node);
    }

    /// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element,
    /// an rp element, an rt element, or an rtc element, the user agent must
    /// pop the current node off the stack of open elements."
    pub(super) fn generate_implied_end_tags(&mut self) {
        self.close_text_run();
        while IMPLIED_END_TAGS.contains(&self.current_tag_name()) {
            log::debug!(target: "arbor::parser", "implied </{}>", self.current_tag_name());
            self.pop_node();
        }
    }

    /// Implied end tags for a freshly opened `node`: while its parent has
    /// an implied end tag, `node` moves up a level. The new node itself is
    /// never closed.
    pub(super) fn generate_implied_end_tags_before(&mut self, node: NodeId) {
        while let Some(parent) = self.tree.parent(node)
            && let Some(grandparent) = self.tree.parent(parent)
            && self
                .tree
                .tag_name(parent)
                .is_some_and(|name| IMPLIED_END_TAGS.contains(&name))
        {
            self.tree.append_child(grandparent, node);
        }
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    ///
    /// Walks up from the current node to the nearest element that decides
    /// the mode.
    pub(super) fn reset_insertion_mode(&mut self) {
        let mut mode = InsertionMode::InBody;
        let mut in_table = false;
        let mut select_seen = false;
        let chain = std::iter::once(self.current).chain(self.tree.ancestors(self.current));
        for id in chain {
            let found = match self.tree.tag_name(id) {
                Some("select") => {
                    select_seen = true;
                    None
                }
                Some("td" | "th") => Some(InsertionMode::InCell),
                Some("tr") => Some(InsertionMode::InRow),
                Some("tbody" | "thead" | "tfoot") => Some(InsertionMode::InTableBody),
                Some("caption") => Some(InsertionMode::InCaption),
                Some("colgroup") => Some(InsertionMode::InColumnGroup),
                Some("table") => Some(InsertionMode::InTable),
                Some("head") => Some(InsertionMode::InHead),
                Some("body") => Some(InsertionMode::InBody),
                Some("frameset") => Some(InsertionMode::InFrameset),
                _ => None,
            };
            if let Some(found) = found {
                in_table = found.is_table_mode();
                mode = found;
                break;
            }
        }
        if select_seen {
            mode = if in_table {
                InsertionMode::InSelectInTable
            } else {
                InsertionMode::InSelect
            };
        }
        self.switch_mode(mode);
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::tree_builder::InsertionMode;

    fn parse(html: &str) -> Parser<std::io::Cursor<String>> {
        let mut parser = Parser::from_string(html);
        parser.parse().unwrap();
        parser
    }

    #[test]
    fn test_button_scope_stops_paragraph_close() {
        // The <p> inside <button> cannot be closed from outside the button.
        let parser = parse("<button><p>a<div>b</div></p></button>");
        let tree = parser.tree().unwrap();
        let button = tree.children(tree.root())[0];
        let p = tree.children(button)[0];
        assert_eq!(tree.tag_name(p), Some("p"));
        let div = tree.children(p)[1];
        assert_eq!(tree.tag_name(div), Some("div"));
    }

    #[test]
    fn test_reset_mode_inside_nested_table() {
        let parser = parse("<table><tr><td><table><tr><td>x</td></tr></table>");
        assert_eq!(parser.insertion_mode(), InsertionMode::InCell);
    }

    #[test]
    fn test_select_in_table_mode() {
        let parser = parse("<table><tr><td><select><option>a");
        assert_eq!(parser.insertion_mode(), InsertionMode::InSelectInTable);
    }
}
