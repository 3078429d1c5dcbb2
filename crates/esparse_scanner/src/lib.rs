//! esparse_scanner: Lexer for ECMAScript source text.
//!
//! The [`Scanner`] produces tokens on demand for the parser, which drives
//! regular expression and template rescanning from grammar position.
//! [`tokenize`] scans a whole file standalone, deciding `/` with the
//! previous-token heuristic instead.

mod char_codes;
mod scanner;
mod token;

pub use char_codes::{is_identifier_part, is_identifier_start};
pub use scanner::{Scanner, ScannerState};
pub use token::TokenInfo;

use esparse_ast::token::TokenKind;
use esparse_core::{LineMap, TextSpan};
use esparse_diagnostics::{messages, ParseError, ParseResult};

/// Scan a whole source text into tokens.
///
/// A `/` starts a regular expression when the previous significant token
/// cannot end an expression (see [`TokenKind::precedes_expression`]).
pub fn tokenize(source: &str) -> ParseResult<Vec<TokenInfo>> {
    let mut scanner = Scanner::new(source);
    scanner.skip_shebang();
    let mut tokens: Vec<TokenInfo> = Vec::new();
    // Brace depth at each open template substitution.
    let mut template_braces: Vec<usize> = Vec::new();
    let mut depth = 0usize;

    loop {
        let mut kind = scanner.scan();
        let previous = tokens.last().map(|t| t.kind);
        match kind {
            TokenKind::SlashToken | TokenKind::SlashEqualsToken
                if previous.map_or(true, TokenKind::precedes_expression) =>
            {
                kind = scanner.rescan_slash_token();
            }
            TokenKind::OpenBraceToken => depth += 1,
            TokenKind::CloseBraceToken => {
                if template_braces.last() == Some(&depth) {
                    kind = scanner.rescan_template_token();
                    if kind == TokenKind::TemplateTail {
                        template_braces.pop();
                    }
                } else {
                    depth = depth.saturating_sub(1);
                }
            }
            _ => {}
        }
        match kind {
            TokenKind::Unknown => {
                let error = scanner.take_error().unwrap_or_else(|| {
                    let span = TextSpan::new(scanner.token_start() as u32, scanner.token_end() as u32);
                    ParseError::new(&messages::UNEXPECTED_TOKEN, &[scanner.token_text()], span)
                });
                tracing::debug!(code = error.code, "tokenize failed");
                return Err(error.located(&LineMap::new(source)));
            }
            TokenKind::EndOfFileToken => break,
            TokenKind::TemplateHead => template_braces.push(depth),
            _ => {}
        }
        tokens.push(scanner.token_info());
    }

    tracing::debug!(tokens = tokens.len(), "tokenized");
    Ok(tokens)
}
