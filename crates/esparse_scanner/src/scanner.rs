//! The ECMAScript scanner.
//!
//! Converts source text into tokens on demand. The scanner is context-free:
//! contextual keywords come out as `Identifier`, a `/` is always a division
//! operator until the parser asks for [`Scanner::rescan_slash_token`], and a
//! `}` only continues a template after [`Scanner::rescan_template_token`].
//!
//! Positions are UTF-8 byte offsets into the source.

use crate::char_codes::*;
use crate::token::TokenInfo;
use esparse_ast::token::TokenKind;
use esparse_ast::types::TokenFlags;
use esparse_core::TextSpan;
use esparse_diagnostics::{messages, DiagnosticMessage, ParseError};
use std::borrow::Cow;

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pos: usize,
    token_start: usize,
    token: TokenKind,
    token_value: String,
    token_number: f64,
    token_flags: TokenFlags,
    regex_flags_start: usize,
    error: Option<ParseError>,
    escape_error: Option<ParseError>,
}

/// The scanner converts ECMAScript source text into tokens.
pub struct Scanner<'s> {
    source: &'s str,
    bytes: &'s [u8],
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token: TokenKind,
    /// Decoded text of the current token.
    token_value: String,
    /// Numeric value of the current `NumericLiteral`.
    token_number: f64,
    token_flags: TokenFlags,
    regex_flags_start: usize,
    /// Error for the current `Unknown` token.
    error: Option<ParseError>,
    /// First invalid escape in the current template chunk.
    escape_error: Option<ParseError>,
    module_goal: bool,
    web_compat: bool,
    numeric_separators: bool,
}

impl<'s> Scanner<'s> {
    /// Create a new scanner for the given source text.
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            token_start: 0,
            token: TokenKind::Unknown,
            token_value: String::new(),
            token_number: 0.0,
            token_flags: TokenFlags::NONE,
            regex_flags_start: 0,
            error: None,
            escape_error: None,
            module_goal: false,
            web_compat: false,
            numeric_separators: true,
        }
    }

    /// Module code never recognizes HTML-like comments.
    pub fn set_module_goal(&mut self, module_goal: bool) {
        self.module_goal = module_goal;
    }

    pub fn set_web_compat(&mut self, web_compat: bool) {
        self.web_compat = web_compat;
    }

    pub fn set_numeric_separators(&mut self, enabled: bool) {
        self.numeric_separators = enabled;
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Skip a hashbang line at the very beginning of the file.
    /// Call this before the first `scan()` call.
    pub fn skip_shebang(&mut self) {
        if self.pos == 0 && self.bytes.starts_with(b"#!") {
            self.pos = 2;
            self.skip_line_comment_body();
        }
    }

    /// Look ahead: save state, call f, restore state and return the result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.save_state();
        let result = f(self);
        self.restore_state(saved);
        result
    }

    #[inline]
    pub fn token(&self) -> TokenKind {
        self.token
    }

    /// Decoded value of the current token.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[inline]
    pub fn token_number(&self) -> f64 {
        self.token_number
    }

    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// End of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Source text of the current token, exactly as written.
    #[inline]
    pub fn token_text(&self) -> &'s str {
        &self.source[self.token_start..self.pos]
    }

    /// Take the error describing the current `Unknown` token.
    pub fn take_error(&mut self) -> Option<ParseError> {
        self.error.take()
    }

    /// Take the invalid-escape error of the current template chunk.
    pub fn take_escape_error(&mut self) -> Option<ParseError> {
        self.escape_error.take()
    }

    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            pos: self.token_start as u32,
            end: self.pos as u32,
            text: self.token_value.clone(),
            flags: self.token_flags,
        }
    }

    /// Save the full scanner state for lookahead.
    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_number: self.token_number,
            token_flags: self.token_flags,
            regex_flags_start: self.regex_flags_start,
            error: self.error.clone(),
            escape_error: self.escape_error.clone(),
        }
    }

    /// Restore the full scanner state from a saved state.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_number = state.token_number;
        self.token_flags = state.token_flags;
        self.regex_flags_start = state.regex_flags_start;
        self.error = state.error;
        self.escape_error = state.escape_error;
    }

    /// Pattern of the current regular expression literal.
    pub fn regex_pattern(&self) -> &'s str {
        &self.source[self.token_start + 1..self.regex_flags_start - 1]
    }

    /// Flags of the current regular expression literal.
    pub fn regex_flags(&self) -> &'s str {
        &self.source[self.regex_flags_start..self.pos]
    }

    /// Raw text of the current template chunk, with line terminators
    /// normalized to `\n`.
    pub fn template_raw(&self) -> Cow<'s, str> {
        let text = self.token_text();
        let open = 1;
        let close = match self.token {
            TokenKind::TemplateHead | TokenKind::TemplateMiddle => 2,
            _ => 1,
        };
        let end = text.len().saturating_sub(close).max(open);
        let raw = &text[open..end];
        if raw.contains('\r') {
            Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
        } else {
            Cow::Borrowed(raw)
        }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.source.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    /// Record the error for the current token and produce `Unknown`.
    fn fail(&mut self, message: &DiagnosticMessage, args: &[&str], start: usize, end: usize) -> TokenKind {
        if self.error.is_none() {
            let span = TextSpan::new(start as u32, end.max(start) as u32);
            self.error = Some(ParseError::new(message, args, span));
        }
        TokenKind::Unknown
    }

    fn html_comments_allowed(&self) -> bool {
        self.web_compat && !self.module_goal
    }

    /// Skip whitespace and comments, setting `PRECEDING_LINE_BREAK`.
    /// Returns `false` after recording an error.
    fn skip_trivia(&mut self) -> bool {
        let trivia_start = self.pos;
        while let Some(b) = self.peek(0) {
            match b {
                b'\n' | b'\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' => match self.peek(1) {
                    Some(b'/') => {
                        self.pos += 2;
                        self.skip_line_comment_body();
                    }
                    Some(b'*') => {
                        if !self.skip_block_comment() {
                            return false;
                        }
                    }
                    _ => return true,
                },
                b'<' if self.html_comments_allowed() && self.bytes[self.pos..].starts_with(b"<!--") => {
                    self.pos += 4;
                    self.skip_line_comment_body();
                }
                b'-' if self.html_comments_allowed()
                    && (self.has_preceding_line_break() || trivia_start == 0)
                    && self.bytes[self.pos..].starts_with(b"-->") =>
                {
                    self.pos += 3;
                    self.skip_line_comment_body();
                }
                _ if b < 0x80 => return true,
                _ => match self.current_char() {
                    Some(ch) if is_line_break(ch) => {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        self.pos += ch.len_utf8();
                    }
                    Some(ch) if is_white_space_single_line(ch) => self.pos += ch.len_utf8(),
                    _ => return true,
                },
            }
        }
        true
    }

    /// Advance to the next line terminator (not consuming it).
    fn skip_line_comment_body(&mut self) {
        let mut offset = self.pos;
        while let Some(found) = memchr::memchr3(b'\n', b'\r', 0xE2, &self.bytes[offset..]) {
            let at = offset + found;
            if self.bytes[at] != 0xE2 || is_separator_at(self.bytes, at) {
                self.pos = at;
                return;
            }
            offset = at + 1;
        }
        self.pos = self.bytes.len();
    }

    fn skip_block_comment(&mut self) -> bool {
        let start = self.pos;
        let body_start = self.pos + 2;
        match memchr::memmem::find(&self.bytes[body_start..], b"*/") {
            Some(len) => {
                if contains_line_break(&self.bytes[body_start..body_start + len]) {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                }
                self.pos = body_start + len + 2;
                true
            }
            None => {
                self.pos = self.bytes.len();
                self.fail(&messages::UNTERMINATED_COMMENT, &[], start, self.pos);
                false
            }
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> TokenKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        self.error = None;
        self.escape_error = None;

        if !self.skip_trivia() {
            self.token_start = self.pos;
            self.token = TokenKind::Unknown;
            return self.token;
        }
        self.token_start = self.pos;

        let Some(b) = self.peek(0) else {
            self.token = TokenKind::EndOfFileToken;
            return self.token;
        };

        self.token = match b {
            b'(' => self.single(TokenKind::OpenParenToken),
            b')' => self.single(TokenKind::CloseParenToken),
            b'{' => self.single(TokenKind::OpenBraceToken),
            b'}' => self.single(TokenKind::CloseBraceToken),
            b'[' => self.single(TokenKind::OpenBracketToken),
            b']' => self.single(TokenKind::CloseBracketToken),
            b';' => self.single(TokenKind::SemicolonToken),
            b',' => self.single(TokenKind::CommaToken),
            b'~' => self.single(TokenKind::TildeToken),
            b':' => self.single(TokenKind::ColonToken),
            b'.' => self.scan_dot(),
            b'?' => self.scan_question(),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),
            b'=' => self.scan_equals(),
            b'!' => self.scan_exclamation(),
            b'+' => self.scan_repeatable(b'+', TokenKind::PlusToken, TokenKind::PlusPlusToken, TokenKind::PlusEqualsToken),
            b'-' => self.scan_repeatable(b'-', TokenKind::MinusToken, TokenKind::MinusMinusToken, TokenKind::MinusEqualsToken),
            b'*' => self.scan_asterisk(),
            b'/' => self.with_equals(TokenKind::SlashToken, TokenKind::SlashEqualsToken),
            b'%' => self.with_equals(TokenKind::PercentToken, TokenKind::PercentEqualsToken),
            b'^' => self.with_equals(TokenKind::CaretToken, TokenKind::CaretEqualsToken),
            b'&' => self.scan_logical(b'&', TokenKind::AmpersandToken, TokenKind::AmpersandEqualsToken, TokenKind::AmpersandAmpersandToken, TokenKind::AmpersandAmpersandEqualsToken),
            b'|' => self.scan_logical(b'|', TokenKind::BarToken, TokenKind::BarEqualsToken, TokenKind::BarBarToken, TokenKind::BarBarEqualsToken),
            b'\'' | b'"' => self.scan_string_literal(b),
            b'`' => {
                self.pos += 1;
                self.scan_template(true)
            }
            b'0'..=b'9' => self.scan_number(),
            b'#' => self.scan_private_name(),
            b'\\' => self.scan_identifier(),
            _ if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => self.scan_identifier(),
            _ => match self.current_char() {
                Some(ch) if ch as u32 > 0x7F && is_identifier_start(ch) => self.scan_identifier(),
                Some(ch) => {
                    let end = self.pos + ch.len_utf8();
                    let text = ch.to_string();
                    self.fail(&messages::INVALID_CHARACTER, &[text.as_str()], self.pos, end)
                }
                None => TokenKind::EndOfFileToken,
            },
        };

        self.token
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    #[inline]
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn with_equals(&mut self, plain: TokenKind, assign: TokenKind) -> TokenKind {
        if self.peek(1) == Some(b'=') {
            self.pos += 2;
            assign
        } else {
            self.pos += 1;
            plain
        }
    }

    /// `+`, `++`, `+=` and the `-` family.
    fn scan_repeatable(&mut self, ch: u8, plain: TokenKind, double: TokenKind, assign: TokenKind) -> TokenKind {
        if self.peek(1) == Some(ch) {
            self.pos += 2;
            double
        } else {
            self.with_equals(plain, assign)
        }
    }

    /// `&`, `&=`, `&&`, `&&=` and the `|` family.
    fn scan_logical(
        &mut self,
        ch: u8,
        plain: TokenKind,
        assign: TokenKind,
        double: TokenKind,
        double_assign: TokenKind,
    ) -> TokenKind {
        if self.peek(1) == Some(ch) {
            if self.peek(2) == Some(b'=') {
                self.pos += 3;
                double_assign
            } else {
                self.pos += 2;
                double
            }
        } else {
            self.with_equals(plain, assign)
        }
    }

    fn scan_dot(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'.'), Some(b'.')) => {
                self.pos += 3;
                TokenKind::DotDotDotToken
            }
            (Some(b'0'..=b'9'), _) => self.scan_number(),
            _ => self.single(TokenKind::DotToken),
        }
    }

    fn scan_question(&mut self) -> TokenKind {
        match self.peek(1) {
            Some(b'?') => {
                if self.peek(2) == Some(b'=') {
                    self.pos += 3;
                    TokenKind::QuestionQuestionEqualsToken
                } else {
                    self.pos += 2;
                    TokenKind::QuestionQuestionToken
                }
            }
            // `a?.5:b` is a conditional, not an optional chain.
            Some(b'.') if !matches!(self.peek(2), Some(b'0'..=b'9')) => {
                self.pos += 2;
                TokenKind::QuestionDotToken
            }
            _ => self.single(TokenKind::QuestionToken),
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        match self.peek(1) {
            Some(b'<') => {
                if self.peek(2) == Some(b'=') {
                    self.pos += 3;
                    TokenKind::LessThanLessThanEqualsToken
                } else {
                    self.pos += 2;
                    TokenKind::LessThanLessThanToken
                }
            }
            _ => self.with_equals(TokenKind::LessThanToken, TokenKind::LessThanEqualsToken),
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2), self.peek(3)) {
            (Some(b'>'), Some(b'>'), Some(b'=')) => {
                self.pos += 4;
                TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken
            }
            (Some(b'>'), Some(b'>'), _) => {
                self.pos += 3;
                TokenKind::GreaterThanGreaterThanGreaterThanToken
            }
            (Some(b'>'), Some(b'='), _) => {
                self.pos += 3;
                TokenKind::GreaterThanGreaterThanEqualsToken
            }
            (Some(b'>'), _, _) => {
                self.pos += 2;
                TokenKind::GreaterThanGreaterThanToken
            }
            _ => self.with_equals(TokenKind::GreaterThanToken, TokenKind::GreaterThanEqualsToken),
        }
    }

    fn scan_equals(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'='), Some(b'=')) => {
                self.pos += 3;
                TokenKind::EqualsEqualsEqualsToken
            }
            (Some(b'='), _) => {
                self.pos += 2;
                TokenKind::EqualsEqualsToken
            }
            (Some(b'>'), _) => {
                self.pos += 2;
                TokenKind::EqualsGreaterThanToken
            }
            _ => self.single(TokenKind::EqualsToken),
        }
    }

    fn scan_exclamation(&mut self) -> TokenKind {
        match (self.peek(1), self.peek(2)) {
            (Some(b'='), Some(b'=')) => {
                self.pos += 3;
                TokenKind::ExclamationEqualsEqualsToken
            }
            (Some(b'='), _) => {
                self.pos += 2;
                TokenKind::ExclamationEqualsToken
            }
            _ => self.single(TokenKind::ExclamationToken),
        }
    }

    fn scan_asterisk(&mut self) -> TokenKind {
        if self.peek(1) == Some(b'*') {
            if self.peek(2) == Some(b'=') {
                self.pos += 3;
                TokenKind::AsteriskAsteriskEqualsToken
            } else {
                self.pos += 2;
                TokenKind::AsteriskAsteriskToken
            }
        } else {
            self.with_equals(TokenKind::AsteriskToken, TokenKind::AsteriskEqualsToken)
        }
    }

    // ========================================================================
    // Strings and templates
    // ========================================================================

    fn scan_string_literal(&mut self, quote: u8) -> TokenKind {
        let start = self.pos;
        self.pos += 1;
        let mut chunk_start = self.pos;
        loop {
            let Some(b) = self.peek(0) else {
                return self.fail(&messages::UNTERMINATED_STRING_LITERAL, &[], start, self.pos);
            };
            if b == quote {
                self.token_value.push_str(&self.source[chunk_start..self.pos]);
                self.pos += 1;
                return TokenKind::StringLiteral;
            }
            match b {
                b'\\' => {
                    self.token_value.push_str(&self.source[chunk_start..self.pos]);
                    let escape_start = self.pos;
                    if let Err(message) = self.scan_escape(false) {
                        return self.fail(message, &[], escape_start, self.pos);
                    }
                    chunk_start = self.pos;
                }
                b'\n' | b'\r' => {
                    return self.fail(&messages::UNTERMINATED_STRING_LITERAL, &[], start, self.pos);
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Scan a template chunk; `self.pos` is just past the opening `` ` `` or `}`.
    fn scan_template(&mut self, is_head: bool) -> TokenKind {
        let start = self.token_start;
        let mut chunk_start = self.pos;
        loop {
            let Some(b) = self.peek(0) else {
                return self.fail(&messages::UNTERMINATED_TEMPLATE, &[], start, self.pos);
            };
            match b {
                b'`' => {
                    self.token_value.push_str(&self.source[chunk_start..self.pos]);
                    self.pos += 1;
                    return if is_head {
                        TokenKind::NoSubstitutionTemplateLiteral
                    } else {
                        TokenKind::TemplateTail
                    };
                }
                b'$' if self.peek(1) == Some(b'{') => {
                    self.token_value.push_str(&self.source[chunk_start..self.pos]);
                    self.pos += 2;
                    return if is_head {
                        TokenKind::TemplateHead
                    } else {
                        TokenKind::TemplateMiddle
                    };
                }
                b'\\' => {
                    self.token_value.push_str(&self.source[chunk_start..self.pos]);
                    let escape_start = self.pos;
                    if let Err(message) = self.scan_escape(true) {
                        if self.peek(0).is_none() {
                            return self.fail(&messages::UNTERMINATED_TEMPLATE, &[], start, self.pos);
                        }
                        self.token_flags |= TokenFlags::INVALID_ESCAPE;
                        if self.escape_error.is_none() {
                            let span = TextSpan::new(escape_start as u32, self.pos as u32);
                            self.escape_error = Some(ParseError::new(message, &[], span));
                        }
                    }
                    chunk_start = self.pos;
                }
                b'\r' => {
                    self.token_value.push_str(&self.source[chunk_start..self.pos]);
                    self.token_value.push('\n');
                    self.pos += 1;
                    if self.peek(0) == Some(b'\n') {
                        self.pos += 1;
                    }
                    chunk_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Continue a template after the `}` that closes a substitution.
    pub fn rescan_template_token(&mut self) -> TokenKind {
        self.pos = self.token_start + 1;
        self.token_value.clear();
        self.token_flags &= TokenFlags::PRECEDING_LINE_BREAK;
        self.error = None;
        self.escape_error = None;
        self.token = self.scan_template(false);
        self.token
    }

    /// Decode one escape sequence starting at the backslash into `token_value`.
    fn scan_escape(&mut self, in_template: bool) -> Result<(), &'static DiagnosticMessage> {
        let unterminated = if in_template {
            &messages::UNTERMINATED_TEMPLATE
        } else {
            &messages::UNTERMINATED_STRING_LITERAL
        };
        let Some(b) = self.peek(1) else {
            self.pos += 1;
            return Err(unterminated);
        };
        match b {
            b'n' | b't' | b'r' | b'b' | b'f' | b'v' => {
                let ch = match b {
                    b'n' => '\n',
                    b't' => '\t',
                    b'r' => '\r',
                    b'b' => '\u{8}',
                    b'f' => '\u{c}',
                    _ => '\u{b}',
                };
                self.token_value.push(ch);
                self.pos += 2;
            }
            b'\r' => {
                self.pos += 2;
                if self.peek(0) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            b'\n' => self.pos += 2,
            b'x' => {
                self.pos += 2;
                let hi = self.peek(0).and_then(hex_value);
                let lo = self.peek(1).and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        self.pos += 2;
                        self.token_value.push(char::from_u32(hi * 16 + lo).unwrap_or('\u{FFFD}'));
                    }
                    _ => return Err(&messages::INVALID_HEX_ESCAPE),
                }
            }
            b'u' => {
                let value = self.scan_unicode_escape()?;
                self.push_code_point(value);
            }
            b'0' if !matches!(self.peek(2), Some(b'0'..=b'9')) => {
                self.token_value.push('\0');
                self.pos += 2;
            }
            b'0'..=b'7' => {
                self.pos += 1;
                if in_template {
                    self.pos += 1;
                    return Err(&messages::INVALID_OCTAL_ESCAPE_IN_TEMPLATE);
                }
                self.token_flags |= TokenFlags::OCTAL_ESCAPE;
                let max_len = if b <= b'3' { 3 } else { 2 };
                let mut value = 0u32;
                let mut len = 0;
                while len < max_len {
                    match self.peek(0) {
                        Some(d) if is_octal_digit(d) => {
                            value = value * 8 + u32::from(d - b'0');
                            self.pos += 1;
                            len += 1;
                        }
                        _ => break,
                    }
                }
                self.token_value.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
            }
            b'8' | b'9' => {
                self.pos += 2;
                if in_template {
                    return Err(&messages::INVALID_TEMPLATE_ESCAPE);
                }
                self.token_flags |= TokenFlags::OCTAL_ESCAPE;
                self.token_value.push(b as char);
            }
            _ => {
                self.pos += 1;
                // Any other character escapes to itself; LS and PS are line continuations.
                match self.current_char() {
                    Some(ch) => {
                        self.pos += ch.len_utf8();
                        if ch != LINE_SEPARATOR && ch != PARAGRAPH_SEPARATOR {
                            self.token_value.push(ch);
                        }
                    }
                    None => return Err(unterminated),
                }
            }
        }
        Ok(())
    }

    /// Push a decoded code point, pairing a high surrogate with a following
    /// `\u` low surrogate. Lone surrogates become U+FFFD.
    fn push_code_point(&mut self, value: u32) {
        if (0xD800..=0xDBFF).contains(&value) && self.bytes[self.pos..].starts_with(b"\\u") {
            let saved = self.pos;
            match self.scan_unicode_escape() {
                Ok(low) if (0xDC00..=0xDFFF).contains(&low) => {
                    let combined = 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
                    self.token_value.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                    return;
                }
                _ => self.pos = saved,
            }
        }
        self.token_value.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
    }

    /// Scan `\uXXXX` or `\u{X...}` starting at the backslash.
    fn scan_unicode_escape(&mut self) -> Result<u32, &'static DiagnosticMessage> {
        if self.peek(1) != Some(b'u') {
            self.pos += 1;
            return Err(&messages::INVALID_UNICODE_ESCAPE);
        }
        self.pos += 2;
        if self.peek(0) == Some(b'{') {
            self.pos += 1;
            let mut value = 0u32;
            let mut digits = 0;
            loop {
                let Some(b) = self.peek(0) else {
                    return Err(&messages::INVALID_UNICODE_ESCAPE);
                };
                if b == b'}' && digits > 0 {
                    self.pos += 1;
                    return Ok(value);
                }
                let Some(digit) = hex_value(b) else {
                    return Err(&messages::INVALID_UNICODE_ESCAPE);
                };
                value = value * 16 + digit;
                if value > 0x10FFFF {
                    return Err(&messages::UNICODE_ESCAPE_OUT_OF_RANGE);
                }
                digits += 1;
                self.pos += 1;
            }
        }
        let mut value = 0u32;
        for _ in 0..4 {
            let Some(digit) = self.peek(0).and_then(hex_value) else {
                return Err(&messages::INVALID_UNICODE_ESCAPE);
            };
            value = value * 16 + digit;
            self.pos += 1;
        }
        Ok(value)
    }

    // ========================================================================
    // Regular expressions
    // ========================================================================

    /// Rescan the current `/` or `/=` token as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> TokenKind {
        let start = self.token_start;
        self.pos = start + 1;
        self.token_value.clear();
        let mut in_class = false;
        loop {
            let Some(b) = self.peek(0) else {
                self.token = self.fail(&messages::UNTERMINATED_REGEXP, &[], start, self.pos);
                return self.token;
            };
            match b {
                b'\n' | b'\r' => {
                    self.token = self.fail(&messages::UNTERMINATED_REGEXP, &[], start, self.pos);
                    return self.token;
                }
                b'\\' => {
                    self.pos += 1;
                    match self.current_char() {
                        Some(ch) if !is_line_break(ch) => self.pos += ch.len_utf8(),
                        _ => {
                            self.token = self.fail(&messages::UNTERMINATED_REGEXP, &[], start, self.pos);
                            return self.token;
                        }
                    }
                }
                b'/' if !in_class => {
                    self.pos += 1;
                    break;
                }
                b'[' => {
                    in_class = true;
                    self.pos += 1;
                }
                b']' => {
                    in_class = false;
                    self.pos += 1;
                }
                _ if b < 0x80 => self.pos += 1,
                _ => match self.current_char() {
                    Some(ch) if is_line_break(ch) => {
                        self.token = self.fail(&messages::UNTERMINATED_REGEXP, &[], start, self.pos);
                        return self.token;
                    }
                    Some(ch) => self.pos += ch.len_utf8(),
                    None => self.pos += 1,
                },
            }
        }

        self.regex_flags_start = self.pos;
        let mut seen = 0u8;
        while let Some(ch) = self.current_char() {
            if ch == '\\' {
                self.token = self.fail(&messages::INVALID_REGEXP_FLAGS, &[], self.regex_flags_start, self.pos + 1);
                return self.token;
            }
            if !is_identifier_part(ch) {
                break;
            }
            let bit = match ch {
                'd' => 1,
                'g' => 2,
                'i' => 4,
                'm' => 8,
                's' => 16,
                'u' => 32,
                'y' => 64,
                'v' => 128,
                _ => 0,
            };
            self.pos += ch.len_utf8();
            if bit == 0 || seen & bit != 0 {
                self.token = self.fail(&messages::INVALID_REGEXP_FLAGS, &[], self.regex_flags_start, self.pos);
                return self.token;
            }
            seen |= bit;
        }
        if seen & 32 != 0 && seen & 128 != 0 {
            self.token = self.fail(&messages::INVALID_REGEXP_FLAGS, &[], self.regex_flags_start, self.pos);
            return self.token;
        }
        self.token_value.push_str(self.regex_pattern());
        self.token = TokenKind::RegularExpressionLiteral;
        self.token
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;
        if self.peek(0) == Some(b'0') {
            match self.peek(1) {
                Some(b'x' | b'X') => return self.scan_radix_number(start, 16, TokenFlags::HEX_SPECIFIER),
                Some(b'b' | b'B') => return self.scan_radix_number(start, 2, TokenFlags::BINARY_SPECIFIER),
                Some(b'o' | b'O') => return self.scan_radix_number(start, 8, TokenFlags::OCTAL_SPECIFIER),
                Some(b'0'..=b'9') => return self.scan_legacy_octal(start),
                Some(b'_') => {
                    return self.fail(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], self.pos + 1, self.pos + 2)
                }
                _ => {}
            }
        }
        if self.peek(0) != Some(b'.') && !self.scan_digits(|b| b.is_ascii_digit()) {
            return TokenKind::Unknown;
        }
        self.scan_decimal_tail(start)
    }

    /// Fraction, exponent and BigInt suffix of a decimal literal.
    fn scan_decimal_tail(&mut self, start: usize) -> TokenKind {
        if self.peek(0) == Some(b'.') {
            self.token_flags |= TokenFlags::HAS_DECIMAL_POINT;
            self.pos += 1;
            if self.peek(0) == Some(b'_') {
                return self.fail(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], self.pos, self.pos + 1);
            }
            if !self.scan_digits(|b| b.is_ascii_digit()) {
                return TokenKind::Unknown;
            }
        }

        if let Some(b'e' | b'E') = self.peek(0) {
            self.token_flags |= TokenFlags::SCIENTIFIC;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek(0) {
                self.pos += 1;
            }
            match self.peek(0) {
                Some(b'0'..=b'9') => {}
                Some(b'_') => {
                    return self.fail(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], self.pos, self.pos + 1)
                }
                _ => return self.fail(&messages::DIGIT_EXPECTED, &[], self.pos, self.pos),
            }
            if !self.scan_digits(|b| b.is_ascii_digit()) {
                return TokenKind::Unknown;
            }
        }

        if self.peek(0) == Some(b'n') {
            let invalid = TokenFlags::HAS_DECIMAL_POINT | TokenFlags::SCIENTIFIC | TokenFlags::NON_OCTAL_DECIMAL;
            if self.token_flags.intersects(invalid) {
                return self.fail(&messages::INVALID_BIGINT, &[], start, self.pos + 1);
            }
            return self.finish_bigint(start);
        }

        let text = &self.source[start..self.pos];
        self.token_number = if self.token_flags.contains(TokenFlags::CONTAINS_SEPARATOR) {
            text.replace('_', "").parse().unwrap_or(f64::NAN)
        } else {
            text.parse().unwrap_or(f64::NAN)
        };
        self.token_value.push_str(text);
        self.finish_number()
    }

    fn scan_radix_number(&mut self, start: usize, radix: u32, flag: TokenFlags) -> TokenKind {
        self.pos += 2;
        self.token_flags |= flag;
        let digits_start = self.pos;
        if !self.scan_digits(|b| (b as char).is_digit(radix)) {
            return TokenKind::Unknown;
        }
        if self.pos == digits_start {
            return self.fail(&messages::DIGIT_EXPECTED, &[], self.pos, self.pos);
        }
        if self.peek(0) == Some(b'n') {
            return self.finish_bigint(start);
        }
        self.token_number = self.source[digits_start..self.pos]
            .bytes()
            .filter_map(|b| (b as char).to_digit(radix))
            .fold(0f64, |acc, digit| acc * radix as f64 + digit as f64);
        self.token_value.push_str(&self.source[start..self.pos]);
        self.finish_number()
    }

    /// `017` (octal) or `089` (decimal with a leading zero).
    fn scan_legacy_octal(&mut self, start: usize) -> TokenKind {
        self.pos += 1;
        let mut octal = true;
        while let Some(b @ b'0'..=b'9') = self.peek(0) {
            octal &= b < b'8';
            self.pos += 1;
        }
        if self.peek(0) == Some(b'_') {
            return self.fail(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], self.pos, self.pos + 1);
        }
        if !octal {
            self.token_flags |= TokenFlags::NON_OCTAL_DECIMAL;
            return self.scan_decimal_tail(start);
        }
        self.token_flags |= TokenFlags::OCTAL;
        if self.peek(0) == Some(b'n') {
            return self.fail(&messages::INVALID_BIGINT, &[], start, self.pos + 1);
        }
        self.token_number = self.source[start + 1..self.pos]
            .bytes()
            .fold(0f64, |acc, b| acc * 8.0 + f64::from(b - b'0'));
        self.token_value.push_str(&self.source[start..self.pos]);
        self.finish_number()
    }

    fn finish_bigint(&mut self, start: usize) -> TokenKind {
        let digits = self.source[start..self.pos].replace('_', "");
        self.token_value.push_str(&digits);
        self.pos += 1;
        match self.finish_number() {
            TokenKind::NumericLiteral => TokenKind::BigIntLiteral,
            other => other,
        }
    }

    /// A numeric literal must not be directly followed by an identifier or digit.
    fn finish_number(&mut self) -> TokenKind {
        match self.current_char() {
            Some(ch) if ch == '\\' || ch.is_ascii_digit() || is_identifier_start(ch) => {
                let end = self.pos + ch.len_utf8();
                self.fail(&messages::IDENTIFIER_AFTER_NUMBER, &[], self.pos, end)
            }
            _ => TokenKind::NumericLiteral,
        }
    }

    /// Scan a run of digits with `_` separators allowed between digits.
    /// Returns `false` after recording an error.
    fn scan_digits(&mut self, is_digit: impl Fn(u8) -> bool) -> bool {
        let mut any = false;
        let mut after_separator = false;
        while let Some(b) = self.peek(0) {
            if b == b'_' {
                if !self.numeric_separators {
                    self.fail(&messages::NUMERIC_SEPARATORS_DISABLED, &[], self.pos, self.pos + 1);
                    return false;
                }
                if !any {
                    self.fail(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], self.pos, self.pos + 1);
                    return false;
                }
                if after_separator {
                    self.fail(&messages::CONSECUTIVE_NUMERIC_SEPARATORS, &[], self.pos, self.pos + 1);
                    return false;
                }
                after_separator = true;
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                self.pos += 1;
            } else if is_digit(b) {
                any = true;
                after_separator = false;
                self.pos += 1;
            } else {
                break;
            }
        }
        if after_separator {
            self.fail(&messages::TRAILING_NUMERIC_SEPARATOR, &[], self.pos - 1, self.pos);
            return false;
        }
        true
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if matches!(self.peek(0), Some(b) if b == b'\\' || b >= 0x80) {
            return self.scan_identifier_slow(start);
        }
        let text = &self.source[start..self.pos];
        self.token_value.push_str(text);
        TokenKind::from_keyword(text).unwrap_or(TokenKind::Identifier)
    }

    /// Identifier containing escapes or non-ASCII characters.
    fn scan_identifier_slow(&mut self, start: usize) -> TokenKind {
        let mut escaped = false;
        self.token_value.push_str(&self.source[start..self.pos]);
        while let Some(ch) = self.current_char() {
            let at_start = self.token_value.is_empty();
            if ch == '\\' {
                let escape_start = self.pos;
                let value = match self.scan_unicode_escape() {
                    Ok(value) => value,
                    Err(message) => return self.fail(message, &[], escape_start, self.pos),
                };
                let decoded = char::from_u32(value).filter(|&c| {
                    if at_start {
                        is_identifier_start(c)
                    } else {
                        is_identifier_part(c)
                    }
                });
                let Some(decoded) = decoded else {
                    let position = if at_start { "start" } else { "part" };
                    return self.fail(&messages::INVALID_IDENTIFIER_ESCAPE, &[position], escape_start, self.pos);
                };
                self.token_value.push(decoded);
                escaped = true;
            } else if (at_start && is_identifier_start(ch)) || (!at_start && is_identifier_part(ch)) {
                self.token_value.push(ch);
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        if escaped {
            self.token_flags |= TokenFlags::UNICODE_ESCAPE;
            return TokenKind::Identifier;
        }
        TokenKind::from_keyword(&self.token_value).unwrap_or(TokenKind::Identifier)
    }

    fn scan_private_name(&mut self) -> TokenKind {
        let start = self.pos;
        self.pos += 1;
        match self.current_char() {
            Some(ch) if ch == '\\' || is_identifier_start(ch) => {
                let kind = self.scan_identifier();
                if kind == TokenKind::Unknown {
                    return kind;
                }
                TokenKind::PrivateName
            }
            _ => self.fail(&messages::INVALID_PRIVATE_NAME, &[], start, self.pos),
        }
    }
}

/// Whether the bytes at `at` encode U+2028 or U+2029.
#[inline]
fn is_separator_at(bytes: &[u8], at: usize) -> bool {
    matches!(bytes.get(at..at + 3), Some([0xE2, 0x80, 0xA8 | 0xA9]))
}

fn contains_line_break(bytes: &[u8]) -> bool {
    let mut offset = 0;
    while let Some(found) = memchr::memchr3(b'\n', b'\r', 0xE2, &bytes[offset..]) {
        let at = offset + found;
        if bytes[at] != 0xE2 || is_separator_at(bytes, at) {
            return true;
        }
        offset = at + 1;
    }
    false
}
