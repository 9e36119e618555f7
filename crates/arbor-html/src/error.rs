//! Errors and tolerated parse issues.

use std::io;

use arbor_dom::NodeId;
use thiserror::Error;

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// A tolerated parse error: the parser recovered and kept going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Description of the malformation.
    pub message: String,
    /// Number of characters consumed when the issue was noticed.
    pub position: usize,
}

/// Failures that stop a parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the input failed, or the input ended inside an end tag or a
    /// quoted doctype identifier.
    #[error("I/O error while reading input: {0}")]
    Io(#[from] io::Error),

    /// An end tag did not match the open element, even after generating
    /// implied end tags.
    #[error("NotSameTag: End Tag does not match Start Tag start:[{open}] end:[{found}]")]
    MismatchedEndTag {
        /// The element that was open when the end tag was read.
        node: NodeId,
        /// Tag name of that element.
        open: String,
        /// Name of the end tag that was read.
        found: String,
    },

    /// Strict mode: a malformation the lenient parser would have tolerated.
    #[error("parse error at character {}: {}", .0.position, .0.message)]
    Strict(ParseIssue),
}

impl ParseError {
    /// The node that was current when the error was raised, if known.
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        match self {
            Self::MismatchedEndTag { node, .. } => Some(*node),
            Self::Io(_) | Self::Strict(_) => None,
        }
    }
}
