//! Streaming HTML parser producing an arena DOM tree.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, tag, attribute, comment and DOCTYPE states
//!   - RCDATA for `title`, `textarea` and raw text elements
//!   - Script data with string-literal awareness
//!
//! - **Tree Construction** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Insertion modes from Initial to `AfterAfterFrameset`
//!   - Auto-closing of the parent element, guarded by scope sets
//!   - Implied end tags
//!
//! The tokenizer writes straight into the tree; there is no token stream.
//!
//! # Not Implemented
//!
//! - Character reference decoding (text is kept as written)
//! - Encoding sniffing (input is UTF-8)
//! - Foster parenting and the adoption agency algorithm
//! - Recovery from mismatched end tags

/// Errors and tolerated parse issues.
pub mod error;
/// UTF-8 character input with one character of pushback.
pub mod input;
/// Indented outline of a tree for debugging and the CLI.
pub mod outline;
/// The parser driving tokenizer and tree construction.
pub mod parser;
/// Tokenizer states and handlers.
pub mod tokenizer;
/// Insertion modes and tree-construction rules.
pub mod tree_builder;

use std::io::BufRead;

use arbor_dom::DomTree;

pub use error::{ParseError, ParseIssue};
pub use input::CharReader;
pub use outline::{OutlinePart, format_tree, write_outline};
pub use parser::Parser;
pub use tokenizer::TokenizerState;
pub use tree_builder::InsertionMode;

/// Parse a complete document from a reader.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse<R: BufRead>(reader: R) -> Result<DomTree, ParseError> {
    let mut parser = Parser::new(reader);
    parser.parse()?;
    Ok(parser.into_tree().unwrap_or_default())
}

/// Parse a complete document held in memory.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse_str(html: &str) -> Result<DomTree, ParseError> {
    parse(html.as_bytes())
}
