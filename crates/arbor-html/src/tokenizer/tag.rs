//! Data, tag and attribute states.

use std::io::BufRead;

use arbor_dom::NodeType;

use super::{TokenizerState, is_whitespace_char};
use crate::error::ParseError;
use crate::parser::Parser;

impl<R: BufRead> Parser<R> {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    pub(super) fn handle_data_state(&mut self, c: char) {
        match c {
            // "U+003C LESS-THAN SIGN (<)"
            // "Switch to the tag open state."
            // The text run stays open until a node is actually opened, so a
            // literal `<` continues it.
            '<' => self.switch_to(TokenizerState::TagOpen),
            // Character references are kept as written.
            '&' => {
                Self::unsupported("character references are not decoded");
                self.append_char(c);
            }
            // "Anything else"
            // "Emit the current input character as a character token."
            _ => self.append_char(c),
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    pub(super) fn handle_tag_open_state(&mut self, c: char) {
        match c {
            // "U+0021 EXCLAMATION MARK (!)"
            // "Switch to the markup declaration open state."
            '!' => {
                self.close_text_run();
                self.switch_to(TokenizerState::MarkupDeclarationOpen);
            }
            // "U+002F SOLIDUS (/)"
            // "Switch to the end tag open state."
            '/' => {
                self.buffer.clear();
                self.switch_to(TokenizerState::EndTagOpen);
            }
            // "ASCII alpha"
            // "Create a new start tag token, set its tag name to the empty
            // string. Reconsume in the tag name state."
            c if c.is_ascii_alphabetic() => {
                self.close_text_run();
                self.push_node(NodeType::element(c.to_ascii_lowercase()));
                self.switch_to(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?)"
            // "This is an unexpected-question-mark-instead-of-tag-name parse
            // error. Create a comment token whose data is the empty string.
            // Reconsume in the bogus comment state."
            '?' => {
                self.parse_error("unexpected-question-mark-instead-of-tag-name");
                self.close_text_run();
                self.start_bogus_comment("");
                self.reconsume_in(TokenizerState::BogusComment, c);
            }
            // "Anything else"
            // "This is an invalid-first-character-of-tag-name parse error.
            // Emit a U+003C LESS-THAN SIGN character token. Reconsume in the
            // data state."
            _ => {
                self.parse_error("invalid-first-character-of-tag-name");
                self.append_char('<');
                self.reconsume_in(TokenizerState::Data, c);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    pub(super) fn handle_end_tag_open_state(&mut self, c: char) {
        match c {
            c if c.is_ascii_alphabetic() => {
                self.close_text_run();
                self.buffer.push(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::EndTagName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-end-tag-name parse error. Switch to the data
            // state."
            '>' => {
                self.parse_error("missing-end-tag-name");
                self.enter_data_state();
            }
            // "Anything else"
            // "This is an invalid-first-character-of-tag-name parse error.
            // Create a comment token whose data is the empty string.
            // Reconsume in the bogus comment state."
            _ => {
                self.parse_error("invalid-first-character-of-tag-name");
                self.close_text_run();
                self.start_bogus_comment("");
                self.reconsume_in(TokenizerState::BogusComment, c);
            }
        }
    }

    /// Name of an end tag outside text elements. The end tag takes effect
    /// at `>`.
    pub(super) fn handle_end_tag_name_state(&mut self, c: char) -> Result<(), ParseError> {
        match c {
            '>' => return self.complete_end_tag(),
            c if is_whitespace_char(c) || c == '/' => {
                self.switch_to(TokenizerState::EndTagAttributes);
            }
            // A character that cannot be part of a tag name turns the whole
            // construct into a bogus comment.
            c if matches!(c, '<' | '"' | '\'' | '=') || c.is_control() => {
                self.parse_error(format!("unexpected {c:?} in end tag name"));
                let data = format!("{}{c}", self.buffer);
                self.buffer.clear();
                self.start_bogus_comment(&data);
                self.switch_to(TokenizerState::BogusComment);
            }
            _ => self.buffer.push(c.to_ascii_lowercase()),
        }
        Ok(())
    }

    /// Whatever follows an end tag name is read and dropped.
    pub(super) fn handle_end_tag_attributes_state(&mut self, c: char) -> Result<(), ParseError> {
        if c == '>' {
            return self.complete_end_tag();
        }
        if !is_whitespace_char(c) && c != '/' {
            Self::unsupported("end tag attributes are ignored");
        }
        Ok(())
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    pub(super) fn handle_tag_name_state(&mut self, c: char) {
        match c {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+0020 SPACE"
            // "Switch to the before attribute name state."
            c if is_whitespace_char(c) => self.switch_to(TokenizerState::BeforeAttributeName),
            // "U+002F SOLIDUS (/)"
            // "Switch to the self-closing start tag state."
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current tag token."
            '>' => self.complete_start_tag(false),
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character"
            // "Anything else"
            // "Append the current input character to the current tag token's
            // tag name."
            _ => self.push_current_data(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    pub(super) fn handle_before_attribute_name_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => {}
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            '>' => self.complete_start_tag(false),
            // "U+003D EQUALS SIGN (=)"
            // "This is an unexpected-equals-sign-before-attribute-name parse
            // error. Start a new attribute in the current tag token. Set that
            // attribute's name to the current input character"
            '=' | '"' | '\'' | '<' => {
                self.parse_error("unexpected-character-before-attribute-name");
                self.start_attribute(c);
                self.switch_to(TokenizerState::AttributeName);
            }
            _ => {
                self.start_attribute(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    pub(super) fn handle_attribute_name_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => self.switch_to(TokenizerState::AfterAttributeName),
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            '>' => self.complete_start_tag(false),
            // "U+003D EQUALS SIGN (=)"
            // "Switch to the before attribute value state."
            '=' => self.switch_to(TokenizerState::BeforeAttributeValue),
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C
            // LESS-THAN SIGN (<)"
            // "This is an unexpected-character-in-attribute-name parse error.
            // Treat it as per the 'anything else' entry below."
            '"' | '\'' | '<' => {
                self.parse_error("unexpected-character-in-attribute-name");
                self.push_attribute_name(c);
            }
            _ => self.push_attribute_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    pub(super) fn handle_after_attribute_name_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => {}
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            '=' => self.switch_to(TokenizerState::BeforeAttributeValue),
            '>' => self.complete_start_tag(false),
            // "Anything else"
            // "Start a new attribute in the current tag token. Set that
            // attribute name and value to the empty string. Reconsume in the
            // attribute name state."
            _ => {
                self.start_attribute(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    pub(super) fn handle_before_attribute_value_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => {}
            '"' | '\'' => {
                self.set_attribute_quote(c);
                self.switch_to(TokenizerState::AttributeValueQuoted(c));
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-attribute-value parse error. Switch to the
            // data state. Emit the current tag token."
            '>' => {
                self.parse_error("missing-attribute-value");
                self.complete_start_tag(false);
            }
            _ => {
                if matches!(c, '<' | '=' | '`') {
                    self.parse_error("unexpected-character-in-unquoted-attribute-value");
                }
                self.push_attribute_value(c);
                self.switch_to(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and the single-quoted state; `quote` is the closing quote.
    pub(super) fn handle_attribute_value_quoted_state(&mut self, c: char, quote: char) {
        match c {
            c if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            '&' => {
                Self::unsupported("character references are not decoded");
                self.push_attribute_value(c);
            }
            _ => self.push_attribute_value(c),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    pub(super) fn handle_attribute_value_unquoted_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => self.switch_to(TokenizerState::BeforeAttributeName),
            '>' => self.complete_start_tag(false),
            '"' | '\'' | '<' | '=' | '`' => {
                self.parse_error("unexpected-character-in-unquoted-attribute-value");
                self.push_attribute_value(c);
            }
            _ => self.push_attribute_value(c),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    pub(super) fn handle_after_attribute_value_quoted_state(&mut self, c: char) {
        match c {
            c if is_whitespace_char(c) => self.switch_to(TokenizerState::BeforeAttributeName),
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            '>' => self.complete_start_tag(false),
            // "Anything else"
            // "This is a missing-whitespace-between-attributes parse error.
            // Reconsume in the before attribute name state."
            _ => {
                self.parse_error("missing-whitespace-between-attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName, c);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    pub(super) fn handle_self_closing_start_tag_state(&mut self, c: char) {
        match c {
            // "U+003E GREATER-THAN SIGN (>)"
            // "Set the self-closing flag of the current tag token. Switch to
            // the data state. Emit the current tag token."
            '>' => self.complete_start_tag(true),
            // "Anything else"
            // "This is an unexpected-solidus-in-tag parse error. Reconsume in
            // the before attribute name state."
            _ => {
                self.parse_error("unexpected-solidus-in-tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName, c);
            }
        }
    }
}
