//! esparse_core: Core utilities for the esparse ECMAScript parser.
//!
//! Provides text spans, line/column lookup and string interning used by
//! the scanner, parser and binder.

pub mod intern;
pub mod text;

// Re-export commonly used types
pub use intern::{Name, NameInterner};
pub use text::{LineAndColumn, LineMap, TextPos, TextSpan};
