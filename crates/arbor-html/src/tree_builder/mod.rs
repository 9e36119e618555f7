//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! Insertion-mode dispatch. The rules run when the tokenizer completes a
//! start tag (at its `>`), an end tag, or a doctype.

mod scope;

use std::io::BufRead;

use arbor_dom::{NodeId, NodeKind, is_void_element};
use strum_macros::Display;

use crate::error::ParseError;
use crate::parser::Parser;
use crate::tokenizer::TokenizerState;
use scope::{ALL_SCOPE, BASE_SCOPE, BUTTON_SCOPE, END_TAGS_IMPLYING_END_TAGS, HEADINGS};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// The table and select modes are entered and left as in § 13.2.6.4 but
/// share the "in body" rules; there is no foster parenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

impl InsertionMode {
    const fn is_table_mode(self) -> bool {
        matches!(
            self,
            Self::InTable
                | Self::InTableText
                | Self::InCaption
                | Self::InColumnGroup
                | Self::InTableBody
                | Self::InRow
                | Self::InCell
        )
    }
}

/// Elements that may appear in `<head>`.
const HEAD_CONTENT: &[&str] = &[
    "base", "basefont", "bgsound", "link", "meta", "title", "noscript", "noframes", "style",
    "script", "template",
];

/// Elements whose content is read as RCDATA besides `title` and `textarea`.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "xmp", "iframe", "noembed", "noframes"];

/// Start tags that close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "menu", "nav", "ol",
    "p", "section", "summary", "ul", "pre", "listing", "form", "plaintext", "hr",
];

impl<R: BufRead> Parser<R> {
    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    ///
    /// "Switch the insertion mode to X"
    pub(crate) fn switch_mode(&mut self, mode: InsertionMode) {
        if self.insertion_mode != mode {
            log::debug!(target: "arbor::parser", "insertion mode {} -> {mode}", self.insertion_mode);
            self.insertion_mode = mode;
        }
    }

    /// A doctype moves the document out of the initial mode.
    pub(crate) fn doctype_seen(&mut self) {
        if self.insertion_mode == InsertionMode::Initial {
            self.switch_mode(InsertionMode::BeforeHtml);
        }
    }

    // =========================================================================
    // Start tags
    // =========================================================================

    /// Run the tree-construction rules for the start tag at the current
    /// node, then route the tokenizer: into a text state for text elements,
    /// otherwise back to data.
    ///
    /// A self-closing tag is closed straight away, text element or not.
    pub(crate) fn complete_start_tag(&mut self, self_closing: bool) {
        let node = self.current;
        let name = self.current_tag_name().to_string();
        let text_state = self.dispatch_start_tag(node, &name);

        if self_closing {
            if !is_void_element(&name) {
                log::debug!(target: "arbor::parser", "self-closing <{name}/> closed immediately");
            }
            self.pop_node();
            self.enter_data_state();
        } else if let Some(state) = text_state {
            // [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
            // "Let the original insertion mode be the current insertion mode.
            // Then, switch the insertion mode to 'text'."
            self.original_insertion_mode = Some(self.insertion_mode);
            self.switch_mode(InsertionMode::Text);
            self.switch_to(state);
        } else {
            self.enter_data_state();
        }
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// Returns the tokenizer state for text elements.
    fn dispatch_start_tag(&mut self, node: NodeId, name: &str) -> Option<TokenizerState> {
        match self.insertion_mode {
            InsertionMode::Initial | InsertionMode::BeforeHtml => {
                self.switch_mode(InsertionMode::BeforeHead);
                if name == "html" {
                    None
                } else {
                    self.before_head_start_tag(node, name)
                }
            }
            InsertionMode::BeforeHead => self.before_head_start_tag(node, name),
            InsertionMode::InHead => self.in_head_start_tag(node, name),
            InsertionMode::InHeadNoscript => self.in_head_noscript_start_tag(node, name),
            InsertionMode::AfterHead => self.after_head_start_tag(node, name),
            InsertionMode::InBody
            | InsertionMode::Text
            | InsertionMode::InTable
            | InsertionMode::InTableText
            | InsertionMode::InCaption
            | InsertionMode::InColumnGroup
            | InsertionMode::InTableBody
            | InsertionMode::InRow
            | InsertionMode::InCell
            | InsertionMode::InSelect
            | InsertionMode::InSelectInTable
            | InsertionMode::InTemplate => self.in_body_start_tag(node, name),
            // [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
            // "Anything else: Parse error. Switch the insertion mode to 'in
            // body' and reprocess the token."
            InsertionMode::AfterBody | InsertionMode::AfterAfterBody => {
                self.parse_error(format!("unexpected start tag <{name}> after body"));
                self.switch_mode(InsertionMode::InBody);
                self.in_body_start_tag(node, name)
            }
            InsertionMode::InFrameset
            | InsertionMode::AfterFrameset
            | InsertionMode::AfterAfterFrameset => None,
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    ///
    /// No implied `html`, `head` or `body` is created; an element that
    /// cannot start the head starts the body where it stands.
    fn before_head_start_tag(&mut self, node: NodeId, name: &str) -> Option<TokenizerState> {
        match name {
            "html" => None,
            "head" => {
                self.switch_mode(InsertionMode::InHead);
                None
            }
            "body" => {
                self.switch_mode(InsertionMode::InBody);
                None
            }
            "frameset" => {
                self.switch_mode(InsertionMode::InFrameset);
                None
            }
            name if HEAD_CONTENT.contains(&name) => self.in_head_start_tag(node, name),
            _ => {
                self.switch_mode(InsertionMode::InBody);
                self.in_body_start_tag(node, name)
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    fn in_head_start_tag(&mut self, node: NodeId, name: &str) -> Option<TokenizerState> {
        match name {
            "script" => Some(TokenizerState::ScriptData),
            "title" => Some(TokenizerState::RcData),
            name if RAW_TEXT_ELEMENTS.contains(&name) => Some(TokenizerState::RcData),
            "noscript" => {
                self.switch_mode(InsertionMode::InHeadNoscript);
                None
            }
            "template" => {
                Self::unsupported("template contents are parsed as ordinary children");
                None
            }
            "body" => {
                self.switch_mode(InsertionMode::InBody);
                None
            }
            "frameset" => {
                self.switch_mode(InsertionMode::InFrameset);
                None
            }
            "html" | "head" => {
                self.parse_error(format!("unexpected <{name}> in head"));
                None
            }
            name if HEAD_CONTENT.contains(&name) => None,
            _ => {
                self.switch_mode(InsertionMode::InBody);
                self.in_body_start_tag(node, name)
            }
        }
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    fn in_head_noscript_start_tag(&mut self, node: NodeId, name: &str) -> Option<TokenizerState> {
        match name {
            "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style" => {
                self.in_head_start_tag(node, name)
            }
            _ => {
                self.switch_mode(InsertionMode::InBody);
                self.in_body_start_tag(node, name)
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    fn after_head_start_tag(&mut self, node: NodeId, name: &str) -> Option<TokenizerState> {
        match name {
            "body" => {
                self.switch_mode(InsertionMode::InBody);
                None
            }
            "frameset" => {
                self.switch_mode(InsertionMode::InFrameset);
                None
            }
            name if HEAD_CONTENT.contains(&name) => {
                self.parse_error(format!("<{name}> after head"));
                self.in_head_start_tag(node, name)
            }
            _ => {
                self.switch_mode(InsertionMode::InBody);
                self.in_body_start_tag(node, name)
            }
        }
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// The element is already in the tree; the rules here only move it out
    /// of elements its start tag implicitly closes.
    fn in_body_start_tag(&mut self, node: NodeId, name: &str) -> Option<TokenizerState> {
        match name {
            "script" => return Some(TokenizerState::ScriptData),
            "title" | "textarea" => return Some(TokenizerState::RcData),
            name if RAW_TEXT_ELEMENTS.contains(&name) => return Some(TokenizerState::RcData),
            // "A start tag whose tag name is one of: 'h1', 'h2', 'h3', 'h4',
            // 'h5', 'h6'"
            // "If the current node is an HTML element whose tag name is one
            // of 'h1', 'h2', 'h3', 'h4', 'h5', or 'h6', then this is a parse
            // error; pop the current node off the stack of open elements."
            name if HEADINGS.contains(&name) => {
                self.maybe_close_tags(node, HEADINGS, ALL_SCOPE);
                self.maybe_close_tag(node, "p", BUTTON_SCOPE);
            }
            "li" => {
                self.maybe_close_tag(node, "li", ALL_SCOPE);
                self.maybe_close_tag(node, "p", BUTTON_SCOPE);
            }
            "dd" | "dt" => {
                self.maybe_close_tags(node, &["dd", "dt"], ALL_SCOPE);
                self.maybe_close_tag(node, "p", BUTTON_SCOPE);
            }
            "button" => self.maybe_close_tag(node, "button", BASE_SCOPE),
            "option" => self.maybe_close_tag(node, "option", ALL_SCOPE),
            "optgroup" => self.maybe_close_tags(node, &["optgroup", "option"], ALL_SCOPE),
            // "A start tag whose tag name is one of: 'rb', 'rtc'" / "'rp',
            // 'rt'": "generate implied end tags".
            "rp" | "rt" => self.generate_implied_end_tags_before(node),
            "table" => {
                Self::unsupported("table content is not foster-parented");
                self.switch_mode(InsertionMode::InTable);
            }
            "caption" => self.switch_mode(InsertionMode::InCaption),
            "colgroup" => self.switch_mode(InsertionMode::InColumnGroup),
            "tbody" | "thead" | "tfoot" => self.switch_mode(InsertionMode::InTableBody),
            "tr" => {
                self.maybe_close_tag(node, "tr", ALL_SCOPE);
                self.switch_mode(InsertionMode::InRow);
            }
            "td" | "th" => {
                self.maybe_close_tags(node, &["td", "th"], ALL_SCOPE);
                self.switch_mode(InsertionMode::InCell);
            }
            "select" => {
                let mode = if self.insertion_mode.is_table_mode() {
                    InsertionMode::InSelectInTable
                } else {
                    InsertionMode::InSelect
                };
                self.switch_mode(mode);
            }
            "math" | "svg" => Self::unsupported("foreign content is parsed as HTML elements"),
            name if CLOSES_PARAGRAPH.contains(&name) => {
                self.maybe_close_tag(node, "p", BUTTON_SCOPE);
            }
            _ => {}
        }
        None
    }

    // =========================================================================
    // End tags
    // =========================================================================

    /// Apply the end tag whose name is in the buffer.
    ///
    /// End tags of void elements are ignored. End tags of block and
    /// structural elements first close any open elements with implied end
    /// tags; after that the current node must carry the same name.
    ///
    /// # Errors
    ///
    /// [`ParseError::MismatchedEndTag`] if the names differ.
    pub(crate) fn complete_end_tag(&mut self) -> Result<(), ParseError> {
        let name = std::mem::take(&mut self.buffer);

        if is_void_element(&name) {
            self.parse_error(format!("end tag </{name}> for void element"));
            self.enter_data_state();
            return Ok(());
        }

        if END_TAGS_IMPLYING_END_TAGS.contains(&name.as_str()) {
            self.generate_implied_end_tags();
        }

        if self.tree.kind(self.current) != Some(NodeKind::Element) || self.current_tag_name() != name {
            return Err(ParseError::MismatchedEndTag {
                node: self.current,
                open: self.current_node_name(),
                found: name,
            });
        }

        self.pop_node();
        self.end_tag_mode_transition(&name);
        self.enter_data_state();
        Ok(())
    }

    /// Mode changes caused by closing structural elements.
    fn end_tag_mode_transition(&mut self, name: &str) {
        match name {
            "head" => self.switch_mode(InsertionMode::AfterHead),
            "noscript" if self.insertion_mode == InsertionMode::InHeadNoscript => {
                self.switch_mode(InsertionMode::InHead);
            }
            "body" => self.switch_mode(InsertionMode::AfterBody),
            "frameset" => self.switch_mode(InsertionMode::AfterFrameset),
            "html" => {
                let mode = if matches!(
                    self.insertion_mode,
                    InsertionMode::InFrameset | InsertionMode::AfterFrameset
                ) {
                    InsertionMode::AfterAfterFrameset
                } else {
                    InsertionMode::AfterAfterBody
                };
                self.switch_mode(mode);
            }
            "table" | "caption" | "colgroup" | "tbody" | "thead" | "tfoot" | "tr" | "td" | "th"
            | "select" => self.reset_insertion_mode(),
            _ => {}
        }
    }

    // =========================================================================
    // Text elements
    // =========================================================================

    /// The element whose content is being read as text.
    pub(crate) fn text_element(&self) -> NodeId {
        if self.tree.kind(self.current) == Some(NodeKind::Text) {
            self.tree.parent(self.current).unwrap_or(self.current)
        } else {
            self.current
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    ///
    /// "Any other end tag: Pop the current node off the stack of open
    /// elements. Switch the insertion mode to the original insertion mode."
    pub(crate) fn close_text_element(&mut self) {
        self.buffer.clear();
        self.close_text_run();
        self.pop_node();
        let mode = self.original_insertion_mode.take().unwrap_or(InsertionMode::InBody);
        self.switch_mode(mode);
        self.enter_data_state();
    }
}
