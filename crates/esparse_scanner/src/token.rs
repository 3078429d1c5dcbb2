//! Token information produced by the scanner.

use esparse_ast::token::TokenKind;
use esparse_ast::types::TokenFlags;

/// A scanned token, detached from the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    /// The kind of token.
    pub kind: TokenKind,
    /// Start byte offset in the source text.
    pub pos: u32,
    /// End byte offset in the source text (exclusive).
    pub end: u32,
    /// Decoded value: identifier name, cooked string, number or regex source.
    pub text: String,
    /// Token flags (preceding line break, numeric format, etc.).
    pub flags: TokenFlags,
}

impl TokenInfo {
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }
}
