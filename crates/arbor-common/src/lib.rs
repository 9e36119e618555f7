//! Common utilities for the arbor HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - deduplicated warnings routed through the `log` facade

pub mod warning;
