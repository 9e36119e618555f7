//! Markup declarations: comments, bogus comments and doctypes.

use std::io::BufRead;

use arbor_dom::{DoctypeData, NodeType};

use super::{TokenizerState, is_whitespace_char};
use crate::parser::Parser;

const DOCTYPE_KEYWORD: &str = "doctype";

impl<R: BufRead> Parser<R> {
    /// Open a comment node holding `data`; it receives characters until `>`.
    pub(super) fn start_bogus_comment(&mut self, data: &str) {
        self.push_node(NodeType::Comment(data.to_string()));
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// The lookahead ("if the next few characters are") is done one
    /// character at a time through the dash and keyword states.
    pub(super) fn handle_markup_declaration_open_state(&mut self, c: char) {
        match c {
            '-' => self.switch_to(TokenizerState::MarkupDeclarationDash),
            'd' | 'D' => {
                self.buffer.clear();
                self.buffer.push(c);
                self.switch_to(TokenizerState::MarkupDeclarationKeyword);
            }
            // "Otherwise, this is an incorrectly-opened-comment parse error.
            // Create a comment token whose data is the empty string. Switch to
            // the bogus comment state (don't consume anything in the current
            // state)."
            _ => {
                self.parse_error("incorrectly-opened-comment");
                self.start_bogus_comment("");
                self.reconsume_in(TokenizerState::BogusComment, c);
            }
        }
    }

    /// `<!-` has been read.
    pub(super) fn handle_markup_declaration_dash_state(&mut self, c: char) {
        if c == '-' {
            self.push_node(NodeType::Comment(String::new()));
            self.switch_to(TokenizerState::CommentStart);
        } else {
            self.parse_error("incorrectly-opened-comment");
            self.start_bogus_comment("-");
            self.reconsume_in(TokenizerState::BogusComment, c);
        }
    }

    /// "If the next few characters are: An ASCII case-insensitive match for
    /// the word 'DOCTYPE'"
    pub(super) fn handle_markup_declaration_keyword_state(&mut self, c: char) {
        self.buffer.push(c);
        let seen = self.buffer.to_ascii_lowercase();
        if seen == DOCTYPE_KEYWORD {
            self.buffer.clear();
            self.switch_to(TokenizerState::Doctype);
        } else if !DOCTYPE_KEYWORD.starts_with(seen.as_str()) {
            self.parse_error("incorrectly-opened-comment");
            let _ = self.buffer.pop();
            let data = std::mem::take(&mut self.buffer);
            self.start_bogus_comment(&data);
            self.reconsume_in(TokenizerState::BogusComment, c);
        }
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// The comment is done: close it and return to the data state.
    fn complete_comment(&mut self) {
        self.pop_node();
        self.enter_data_state();
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self, c: char) {
        match c {
            '-' => self.switch_to(TokenizerState::CommentStartDash),
            // "This is an abrupt-closing-of-empty-comment parse error."
            '>' => {
                self.parse_error("abrupt-closing-of-empty-comment");
                self.complete_comment();
            }
            _ => self.reconsume_in(TokenizerState::Comment, c),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self, c: char) {
        match c {
            '-' => self.switch_to(TokenizerState::CommentEnd),
            '>' => {
                self.parse_error("abrupt-closing-of-empty-comment");
                self.complete_comment();
            }
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment
            // token's data. Reconsume in the comment state."
            _ => {
                self.push_current_data('-');
                self.reconsume_in(TokenizerState::Comment, c);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self, c: char) {
        match c {
            '-' => self.switch_to(TokenizerState::CommentEndDash),
            _ => self.push_current_data(c),
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self, c: char) {
        if c == '-' {
            self.switch_to(TokenizerState::CommentEnd);
        } else {
            self.push_current_data('-');
            self.reconsume_in(TokenizerState::Comment, c);
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self, c: char) {
        match c {
            '>' => self.complete_comment(),
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment
            // token's data."
            '-' => self.push_current_data('-'),
            _ => {
                self.tree.push_str(self.current, "--");
                self.reconsume_in(TokenizerState::Comment, c);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self, c: char) {
        match c {
            '>' => self.complete_comment(),
            _ => self.push_current_data(c),
        }
    }

    // =========================================================================
    // Doctype
    // =========================================================================

    /// The doctype is done: close it and move past the initial insertion
    /// mode.
    fn complete_doctype(&mut self) {
        self.pop_node();
        self.doctype_seen();
        self.enter_data_state();
    }

    fn doctype_mut(&mut self) -> Option<&mut DoctypeData> {
        let current = self.current;
        self.tree.as_doctype_mut(current)
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self, c: char) {
        self.push_node(NodeType::Doctype(DoctypeData::default()));
        if is_whitespace_char(c) {
            self.switch_to(TokenizerState::BeforeDoctypeName);
        } else {
            // "This is a missing-whitespace-before-doctype-name parse error.
            // Reconsume in the before DOCTYPE name state."
            self.parse_error("missing-whitespace-before-doctype-name");
            self.reconsume_in(TokenizerState::BeforeDoctypeName, c);
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => {}
            '>' => {
                self.parse_error("missing-doctype-name");
                self.complete_doctype();
            }
            _ => {
                self.push_current_data(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::DoctypeName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => self.switch_to(TokenizerState::AfterDoctypeName),
            '>' => self.complete_doctype(),
            _ => self.push_current_data(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => {}
            '>' => self.complete_doctype(),
            _ => {
                self.buffer.clear();
                self.match_doctype_keyword(c);
            }
        }
    }

    /// "If the six characters starting from the current input character are
    /// an ASCII case-insensitive match for the word 'PUBLIC'" (or 'SYSTEM').
    pub(super) fn handle_doctype_keyword_state(&mut self, c: char) {
        if c == '>' {
            self.parse_error("invalid-character-sequence-after-doctype-name");
            self.complete_doctype();
        } else {
            self.match_doctype_keyword(c);
        }
    }

    fn match_doctype_keyword(&mut self, c: char) {
        self.buffer.push(c.to_ascii_lowercase());
        match self.buffer.as_str() {
            "public" => {
                if let Some(doctype) = self.doctype_mut() {
                    doctype.public = true;
                }
                self.buffer.clear();
                self.switch_to(TokenizerState::AfterDoctypeKeyword);
            }
            "system" => {
                if let Some(doctype) = self.doctype_mut() {
                    doctype.system = true;
                }
                self.buffer.clear();
                self.switch_to(TokenizerState::AfterDoctypeKeyword);
            }
            seen if "public".starts_with(seen) || "system".starts_with(seen) => {
                self.switch_to(TokenizerState::DoctypeKeyword);
            }
            // "Otherwise, this is an invalid-character-sequence-after-doctype-name
            // parse error. Set the current DOCTYPE token's force-quirks flag
            // to on. Reconsume in the bogus DOCTYPE state."
            _ => {
                self.parse_error("invalid-character-sequence-after-doctype-name");
                self.buffer.clear();
                self.switch_to(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn handle_after_doctype_keyword_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => self.switch_to(TokenizerState::BeforeDoctypeIdentifier),
            '"' | '\'' => {
                self.parse_error("missing-whitespace-after-doctype-keyword");
                self.switch_to(TokenizerState::DoctypeIdentifierQuoted(c));
            }
            '>' => {
                self.parse_error("missing-doctype-identifier");
                self.complete_doctype();
            }
            _ => {
                self.parse_error("missing-quote-before-doctype-identifier");
                self.switch_to(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_identifier_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => {}
            '"' | '\'' => self.switch_to(TokenizerState::DoctypeIdentifierQuoted(c)),
            '>' => {
                self.parse_error("missing-doctype-identifier");
                self.complete_doctype();
            }
            _ => {
                self.parse_error("missing-quote-before-doctype-identifier");
                self.switch_to(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// and the single-quoted state; `quote` is the closing quote.
    pub(super) fn handle_doctype_identifier_quoted_state(&mut self, c: char, quote: char) {
        match c {
            c if c == quote => self.switch_to(TokenizerState::AfterDoctypeIdentifier),
            // "This is an abrupt-doctype-public-identifier parse error."
            '>' => {
                self.parse_error("abrupt-doctype-identifier");
                self.complete_doctype();
            }
            _ => {
                if let Some(doctype) = self.doctype_mut() {
                    doctype.identifier.push(c);
                }
            }
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    ///
    /// Only one identifier is kept, so anything but `>` here is bogus.
    pub(super) fn handle_after_doctype_identifier_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => {}
            '>' => self.complete_doctype(),
            _ => {
                Self::unsupported("second doctype identifier is ignored");
                self.switch_to(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.69 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self, c: char) {
        if c == '>' {
            self.complete_doctype();
        }
    }
}
