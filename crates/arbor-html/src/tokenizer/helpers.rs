//! State transition and attribute helpers shared by the tokenizer states.

use std::io::BufRead;

use arbor_dom::{Attribute, QuoteStyle};

use super::TokenizerState;
use crate::parser::Parser;

/// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
///
/// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
/// or U+0020 SPACE."
#[must_use]
pub const fn is_whitespace_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<R: BufRead> Parser<R> {
    /// "Switch to the X state"
    pub(crate) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Pushes `c` back so the next step hands it to `new_state`.
    pub(crate) fn reconsume_in(&mut self, new_state: TokenizerState, c: char) {
        self.input.push_back(c);
        self.state = new_state;
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl<R: BufRead> Parser<R> {
    /// "Start a new attribute in the current tag token."
    ///
    /// Duplicates are kept; every attribute read is appended in order.
    pub(super) fn start_attribute(&mut self, first: char) {
        let current = self.current;
        self.tree
            .push_attribute(current, Attribute::with_quote(first, "", QuoteStyle::None));
    }

    fn current_attribute(&mut self) -> Option<&mut Attribute> {
        let current = self.current;
        self.tree
            .as_element_mut(current)
            .and_then(|element| element.attrs.last_mut())
    }

    pub(super) fn push_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_attribute() {
            attr.name.push(c);
        }
    }

    pub(super) fn push_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_attribute() {
            attr.value.push(c);
        }
    }

    pub(super) fn set_attribute_quote(&mut self, quote: char) {
        if let Some(attr) = self.current_attribute() {
            attr.quote = QuoteStyle::from_quote_char(quote).unwrap_or_default();
        }
    }
}
