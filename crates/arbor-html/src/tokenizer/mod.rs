//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! The tokenizer consumes one character per step and edits the tree
//! directly. Handlers are grouped by construct:
//! - `tag`: data, tags and attributes
//! - `markup`: comments, bogus comments and doctypes
//! - `text`: RCDATA and script data inside text elements

mod helpers;
mod markup;
mod state;
mod tag;
mod text;

use std::io::BufRead;

pub use helpers::is_whitespace_char;
pub use state::TokenizerState;

use crate::error::ParseError;
use crate::parser::Parser;

impl<R: BufRead> Parser<R> {
    /// Run the handler for the current state on one character.
    pub(crate) fn step(&mut self, c: char) -> Result<(), ParseError> {
        match self.state {
            TokenizerState::Data => self.handle_data_state(c),
            TokenizerState::TagOpen => self.handle_tag_open_state(c),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(c),
            TokenizerState::EndTagName => return self.handle_end_tag_name_state(c),
            TokenizerState::EndTagAttributes => return self.handle_end_tag_attributes_state(c),
            TokenizerState::TagName => self.handle_tag_name_state(c),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(c),
            TokenizerState::AttributeName => self.handle_attribute_name_state(c),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(c),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(c),
            TokenizerState::AttributeValueQuoted(quote) => {
                self.handle_attribute_value_quoted_state(c, quote);
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(c),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state(c);
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(c),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(c),
            TokenizerState::MarkupDeclarationDash => self.handle_markup_declaration_dash_state(c),
            TokenizerState::MarkupDeclarationKeyword => {
                self.handle_markup_declaration_keyword_state(c);
            }
            TokenizerState::CommentStart => self.handle_comment_start_state(c),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(c),
            TokenizerState::Comment => self.handle_comment_state(c),
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(c),
            TokenizerState::CommentEnd => self.handle_comment_end_state(c),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(c),
            TokenizerState::Doctype => self.handle_doctype_state(c),
            TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state(c),
            TokenizerState::DoctypeName => self.handle_doctype_name_state(c),
            TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state(c),
            TokenizerState::DoctypeKeyword => self.handle_doctype_keyword_state(c),
            TokenizerState::AfterDoctypeKeyword => self.handle_after_doctype_keyword_state(c),
            TokenizerState::BeforeDoctypeIdentifier => {
                self.handle_before_doctype_identifier_state(c);
            }
            TokenizerState::DoctypeIdentifierQuoted(quote) => {
                self.handle_doctype_identifier_quoted_state(c, quote);
            }
            TokenizerState::AfterDoctypeIdentifier => self.handle_after_doctype_identifier_state(c),
            TokenizerState::BogusDoctype => self.handle_bogus_doctype_state(c),
            TokenizerState::RcData => self.handle_rcdata_state(c),
            TokenizerState::RcDataLessThanSign => self.handle_rcdata_less_than_sign_state(c),
            TokenizerState::RcDataEndTagOpen => {
                self.handle_text_end_tag_open_state(c, TokenizerState::RcData);
            }
            TokenizerState::RcDataEndTagName => {
                self.handle_text_end_tag_name_state(c, TokenizerState::RcData);
            }
            TokenizerState::ScriptData => self.handle_script_data_state(c),
            TokenizerState::ScriptDataString(quote) => {
                self.handle_script_data_string_state(c, quote);
            }
            TokenizerState::ScriptDataStringEscape(quote) => {
                self.append_char(c);
                self.switch_to(TokenizerState::ScriptDataString(quote));
            }
            TokenizerState::ScriptDataLessThanSign => {
                self.handle_script_data_less_than_sign_state(c);
            }
            TokenizerState::ScriptDataEndTagOpen => {
                self.handle_text_end_tag_open_state(c, TokenizerState::ScriptData);
            }
            TokenizerState::ScriptDataEndTagName => {
                self.handle_text_end_tag_name_state(c, TokenizerState::ScriptData);
            }
            TokenizerState::TextEndTagAttributes => self.handle_text_end_tag_attributes_state(c),
        }
        Ok(())
    }
}
