//! Text elements: RCDATA (`title`, `textarea` and the raw text elements)
//! and script data. Only the appropriate end tag leaves these states; any
//! other `</name` is written back into the text as read.

use std::io::BufRead;

use super::{TokenizerState, is_whitespace_char};
use crate::parser::Parser;

impl<R: BufRead> Parser<R> {
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    pub(super) fn handle_rcdata_state(&mut self, c: char) {
        match c {
            // "U+003C LESS-THAN SIGN (<)"
            // "Switch to the RCDATA less-than sign state."
            '<' => self.switch_to(TokenizerState::RcDataLessThanSign),
            '&' => {
                Self::unsupported("character references are not decoded");
                self.append_char(c);
            }
            _ => self.append_char(c),
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    pub(super) fn handle_rcdata_less_than_sign_state(&mut self, c: char) {
        if c == '/' {
            self.buffer.clear();
            self.switch_to(TokenizerState::RcDataEndTagOpen);
        } else {
            // "Emit a U+003C LESS-THAN SIGN character token. Reconsume in the
            // RCDATA state."
            self.append_char('<');
            self.reconsume_in(TokenizerState::RcData, c);
        }
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ///
    /// String literals are tracked so that `</script>` inside quotes does
    /// not end the element.
    pub(super) fn handle_script_data_state(&mut self, c: char) {
        match c {
            '<' => self.switch_to(TokenizerState::ScriptDataLessThanSign),
            '"' | '\'' => {
                self.append_char(c);
                self.switch_to(TokenizerState::ScriptDataString(c));
            }
            _ => self.append_char(c),
        }
    }

    /// Inside a script string literal. A backslash escapes the next
    /// character; a line break ends an unterminated literal.
    pub(super) fn handle_script_data_string_state(&mut self, c: char, quote: char) {
        self.append_char(c);
        match c {
            '\\' => self.switch_to(TokenizerState::ScriptDataStringEscape(quote)),
            '\n' => self.switch_to(TokenizerState::ScriptData),
            c if c == quote => self.switch_to(TokenizerState::ScriptData),
            _ => {}
        }
    }

    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn handle_script_data_less_than_sign_state(&mut self, c: char) {
        if c == '/' {
            self.buffer.clear();
            self.switch_to(TokenizerState::ScriptDataEndTagOpen);
        } else {
            self.append_char('<');
            self.reconsume_in(TokenizerState::ScriptData, c);
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    /// and [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state).
    pub(super) fn handle_text_end_tag_open_state(&mut self, c: char, text_state: TokenizerState) {
        if c.is_ascii_alphabetic() {
            self.buffer.push(c);
            self.switch_to(end_tag_name_state(text_state));
        } else {
            // "Emit a U+003C LESS-THAN SIGN character token and a U+002F
            // SOLIDUS character token. Reconsume in the RCDATA state."
            self.append_text("</");
            self.reconsume_in(text_state, c);
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// and [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state).
    pub(super) fn handle_text_end_tag_name_state(&mut self, c: char, text_state: TokenizerState) {
        match c {
            // "ASCII alpha"
            // "Append the current input character to the temporary buffer."
            c if c.is_ascii_alphabetic() => self.buffer.push(c),
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the data state and emit the current tag token."
            '>' if self.is_appropriate_end_tag() => self.close_text_element(),
            c if (is_whitespace_char(c) || c == '/') && self.is_appropriate_end_tag() => {
                self.switch_to(TokenizerState::TextEndTagAttributes);
            }
            // "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
            // character token, and a character token for each of the
            // characters in the temporary buffer (in the order they were
            // added to the buffer). Reconsume in the RCDATA state."
            _ => {
                self.flush_end_tag_candidate();
                self.reconsume_in(text_state, c);
            }
        }
    }

    /// Skip to the `>` of the appropriate end tag.
    pub(super) fn handle_text_end_tag_attributes_state(&mut self, c: char) {
        if c == '>' {
            self.close_text_element();
        }
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-end-tag-token)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted from
    /// this tokenizer". The element being filled is that start tag.
    fn is_appropriate_end_tag(&self) -> bool {
        let element = self.text_element();
        self.tree
            .tag_name(element)
            .is_some_and(|name| name.eq_ignore_ascii_case(&self.buffer))
    }

    /// Write a rejected `</name` back into the text, in its original case.
    pub(crate) fn flush_end_tag_candidate(&mut self) {
        let candidate = format!("</{}", self.buffer);
        self.buffer.clear();
        self.append_text(&candidate);
    }
}

const fn end_tag_name_state(text_state: TokenizerState) -> TokenizerState {
    match text_state {
        TokenizerState::ScriptData => TokenizerState::ScriptDataEndTagName,
        _ => TokenizerState::RcDataEndTagName,
    }
}
