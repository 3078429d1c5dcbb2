//! esparse_ast: ESTree syntax tree definitions for the esparse parser.
//!
//! Nodes are allocated in a bump arena and reference their children by
//! `&'a` reference. Every node serializes (via serde) to the exact ESTree
//! JSON shape, including `start`/`end`/`loc` when the parser was asked for
//! them.

pub mod node;
pub mod span;
pub mod token;
pub mod types;

// Re-export key types
pub use node::*;
pub use span::{Position, SourceLocation, Span};
pub use token::TokenKind;
pub use types::*;
