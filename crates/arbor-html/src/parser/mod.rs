//! HTML parser module: the parse loop and tree-editing primitives.

/// Parser state and input loop.
pub mod core;

pub use core::Parser;
