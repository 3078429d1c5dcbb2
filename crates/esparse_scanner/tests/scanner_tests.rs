//! Scanner integration tests.
//!
//! Verifies that the scanner tokenizes ECMAScript constructs and rejects
//! malformed literals with the right diagnostic.

use esparse_ast::token::TokenKind;
use esparse_ast::types::TokenFlags;
use esparse_diagnostics::{messages, ErrorKind};
use esparse_scanner::{tokenize, Scanner};
use pretty_assertions::assert_eq;

/// Helper: scan all tokens from source and return as (kind, value) pairs.
fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .unwrap_or_else(|e| panic!("tokenize failed for {:?}: {}", source, e))
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: the code of the lexical error for `source`.
fn lex_error(source: &str) -> u32 {
    match tokenize(source) {
        Ok(tokens) => panic!("expected a lex error for {:?}, got {} tokens", source, tokens.len()),
        Err(e) => {
            assert_eq!(e.kind, ErrorKind::Lex, "{:?}: {}", source, e);
            e.code
        }
    }
}

/// Helper: scan a single token with a fresh scanner.
fn scan_one(source: &str) -> Scanner<'_> {
    let mut scanner = Scanner::new(source);
    scanner.scan();
    scanner
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
}

#[test]
fn test_whitespace_only() {
    assert!(scan_all("   \n\t \u{2028} \u{FEFF}").is_empty());
}

// ========================================================================
// Numbers
// ========================================================================

#[test]
fn test_numeric_literals() {
    for (source, value) in [
        ("42", 42.0),
        ("3.14", 3.14),
        ("0xFF", 255.0),
        ("0b1010", 10.0),
        ("0o777", 511.0),
        ("1e3", 1000.0),
        ("2E-2", 0.02),
        (".5", 0.5),
        ("5.", 5.0),
    ] {
        let scanner = scan_one(source);
        assert_eq!(scanner.token(), TokenKind::NumericLiteral, "{}", source);
        assert_eq!(scanner.token_number(), value, "{}", source);
    }
}

#[test]
fn test_legacy_octal_flags() {
    let scanner = scan_one("017");
    assert_eq!(scanner.token_number(), 15.0);
    assert!(scanner.token_flags().contains(TokenFlags::OCTAL));

    let scanner = scan_one("089");
    assert_eq!(scanner.token_number(), 89.0);
    assert!(scanner.token_flags().contains(TokenFlags::NON_OCTAL_DECIMAL));

    let scanner = scan_one("08.5");
    assert_eq!(scanner.token_number(), 8.5);
}

#[test]
fn test_bigint_literals() {
    assert_eq!(scan_all("10n"), vec![(TokenKind::BigIntLiteral, "10".to_string())]);
    assert_eq!(scan_all("0x1Fn"), vec![(TokenKind::BigIntLiteral, "0x1F".to_string())]);
    assert_eq!(scan_all("0b1n"), vec![(TokenKind::BigIntLiteral, "0b1".to_string())]);
    assert_eq!(scan_all("1_000n"), vec![(TokenKind::BigIntLiteral, "1000".to_string())]);
}

#[test]
fn test_invalid_bigint() {
    for source in ["1.5n", "1e3n", "017n", "08n"] {
        assert_eq!(lex_error(source), messages::INVALID_BIGINT.code, "{}", source);
    }
}

#[test]
fn test_numeric_separator() {
    let scanner = scan_one("1_0_0_0");
    assert_eq!(scanner.token_number(), 1000.0);
    assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_SEPARATOR));

    let scanner = scan_one("0x1_F");
    assert_eq!(scanner.token_number(), 31.0);

    let scanner = scan_one("1_0.0_1e1_0");
    assert_eq!(scanner.token(), TokenKind::NumericLiteral);
}

#[test]
fn test_numeric_separator_placement_errors() {
    assert_eq!(lex_error("1_0_0_0_"), messages::TRAILING_NUMERIC_SEPARATOR.code);
    assert_eq!(lex_error("0_x1"), messages::NUMERIC_SEPARATOR_NOT_ALLOWED.code);
    assert_eq!(lex_error("0x1__1"), messages::CONSECUTIVE_NUMERIC_SEPARATORS.code);
    assert_eq!(lex_error("1e_1"), messages::NUMERIC_SEPARATOR_NOT_ALLOWED.code);
    assert_eq!(lex_error("0x_1"), messages::NUMERIC_SEPARATOR_NOT_ALLOWED.code);
    assert_eq!(lex_error("1_.5"), messages::TRAILING_NUMERIC_SEPARATOR.code);
    assert_eq!(lex_error("1._5"), messages::NUMERIC_SEPARATOR_NOT_ALLOWED.code);
    assert_eq!(lex_error("07_1"), messages::NUMERIC_SEPARATOR_NOT_ALLOWED.code);
}

#[test]
fn test_numeric_separators_disabled() {
    let mut scanner = Scanner::new("1_000");
    scanner.set_numeric_separators(false);
    assert_eq!(scanner.scan(), TokenKind::Unknown);
    let error = scanner.take_error().expect("error recorded");
    assert_eq!(error.code, messages::NUMERIC_SEPARATORS_DISABLED.code);
}

#[test]
fn test_identifier_after_number() {
    assert_eq!(lex_error("3in x"), messages::IDENTIFIER_AFTER_NUMBER.code);
    assert_eq!(lex_error("0b12"), messages::IDENTIFIER_AFTER_NUMBER.code);
    assert_eq!(lex_error("1.toString()"), messages::IDENTIFIER_AFTER_NUMBER.code);
    assert_eq!(lex_error("0x"), messages::DIGIT_EXPECTED.code);
}

// ========================================================================
// Strings and templates
// ========================================================================

#[test]
fn test_string_literals() {
    assert_eq!(scan_all(r#""hello""#), vec![(TokenKind::StringLiteral, "hello".to_string())]);
    assert_eq!(scan_all(r"'a\nb'"), vec![(TokenKind::StringLiteral, "a\nb".to_string())]);
    assert_eq!(scan_all(r"'\x41B\u{43}'"), vec![(TokenKind::StringLiteral, "ABC".to_string())]);
    assert_eq!(scan_all("'a\\\nb'"), vec![(TokenKind::StringLiteral, "ab".to_string())]);
    assert_eq!(scan_all("'\u{2028}'"), vec![(TokenKind::StringLiteral, "\u{2028}".to_string())]);
}

#[test]
fn test_octal_escape_flag() {
    let scanner = scan_one(r"'\101'");
    assert_eq!(scanner.token_value(), "A");
    assert!(scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE));

    let scanner = scan_one(r"'\0'");
    assert_eq!(scanner.token_value(), "\0");
    assert!(!scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE));

    let scanner = scan_one(r"'\8'");
    assert!(scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE));
}

#[test]
fn test_string_errors() {
    assert_eq!(lex_error("'abc"), messages::UNTERMINATED_STRING_LITERAL.code);
    assert_eq!(lex_error("'a\nb'"), messages::UNTERMINATED_STRING_LITERAL.code);
    assert_eq!(lex_error(r"'\x4'"), messages::INVALID_HEX_ESCAPE.code);
    assert_eq!(lex_error(r"'\u{110000}'"), messages::UNICODE_ESCAPE_OUT_OF_RANGE.code);
    assert_eq!(lex_error(r"'\u12'"), messages::INVALID_UNICODE_ESCAPE.code);
}

#[test]
fn test_template_literal() {
    assert_eq!(
        scan_kinds("`a${b}c${d}e`"),
        vec![
            TokenKind::TemplateHead,
            TokenKind::Identifier,
            TokenKind::TemplateMiddle,
            TokenKind::Identifier,
            TokenKind::TemplateTail,
        ]
    );
    assert_eq!(
        scan_kinds("`${ {a} }`"),
        vec![
            TokenKind::TemplateHead,
            TokenKind::OpenBraceToken,
            TokenKind::Identifier,
            TokenKind::CloseBraceToken,
            TokenKind::TemplateTail,
        ]
    );
}

#[test]
fn test_template_raw_and_cooked() {
    let scanner = scan_one("`a\\u0041\r\nb`");
    assert_eq!(scanner.token(), TokenKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.token_value(), "aA\nb");
    assert_eq!(scanner.template_raw(), "a\\u0041\nb");
}

#[test]
fn test_template_invalid_escape_is_deferred() {
    let mut scanner = Scanner::new(r"`\unicode`");
    assert_eq!(scanner.scan(), TokenKind::NoSubstitutionTemplateLiteral);
    assert!(scanner.token_flags().contains(TokenFlags::INVALID_ESCAPE));
    assert!(scanner.take_escape_error().is_some());

    assert_eq!(lex_error("`abc"), messages::UNTERMINATED_TEMPLATE.code);
}

// ========================================================================
// Identifiers and keywords
// ========================================================================

#[test]
fn test_identifiers() {
    assert_eq!(
        scan_all("foo _bar $baz café"),
        vec![
            (TokenKind::Identifier, "foo".to_string()),
            (TokenKind::Identifier, "_bar".to_string()),
            (TokenKind::Identifier, "$baz".to_string()),
            (TokenKind::Identifier, "café".to_string()),
        ]
    );
}

#[test]
fn test_contextual_keywords_are_identifiers() {
    assert_eq!(
        scan_kinds("let async await yield static of get set"),
        vec![TokenKind::Identifier; 8]
    );
    assert_eq!(
        scan_kinds("var typeof instanceof"),
        vec![TokenKind::VarKeyword, TokenKind::TypeOfKeyword, TokenKind::InstanceOfKeyword]
    );
}

#[test]
fn test_identifier_escapes() {
    assert_eq!(scan_all(r"ab\u{63}"), vec![(TokenKind::Identifier, "abc".to_string())]);
    assert_eq!(lex_error(r"\u0031abc"), messages::INVALID_IDENTIFIER_ESCAPE.code);
    assert_eq!(lex_error(r"a\u002D"), messages::INVALID_IDENTIFIER_ESCAPE.code);
    assert_eq!(lex_error(r"a\x41"), messages::INVALID_UNICODE_ESCAPE.code);
}

#[test]
fn test_private_name() {
    assert_eq!(scan_all("#foo"), vec![(TokenKind::PrivateName, "foo".to_string())]);
    assert_eq!(lex_error("# foo"), messages::INVALID_PRIVATE_NAME.code);
}

// ========================================================================
// Operators and punctuation
// ========================================================================

#[test]
fn test_operators() {
    assert_eq!(
        scan_kinds("a ** b **= c ?? d ?. e => f"),
        vec![
            TokenKind::Identifier,
            TokenKind::AsteriskAsteriskToken,
            TokenKind::Identifier,
            TokenKind::AsteriskAsteriskEqualsToken,
            TokenKind::Identifier,
            TokenKind::QuestionQuestionToken,
            TokenKind::Identifier,
            TokenKind::QuestionDotToken,
            TokenKind::Identifier,
            TokenKind::EqualsGreaterThanToken,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_spread_and_dots() {
    assert_eq!(
        scan_kinds("...a.b"),
        vec![
            TokenKind::DotDotDotToken,
            TokenKind::Identifier,
            TokenKind::DotToken,
            TokenKind::Identifier,
        ]
    );
}

// ========================================================================
// Regular expressions
// ========================================================================

#[test]
fn test_regex_after_operator() {
    assert_eq!(
        scan_kinds("x = /ab+c/gi"),
        vec![TokenKind::Identifier, TokenKind::EqualsToken, TokenKind::RegularExpressionLiteral]
    );
    assert_eq!(
        scan_kinds("a / b / c"),
        vec![
            TokenKind::Identifier,
            TokenKind::SlashToken,
            TokenKind::Identifier,
            TokenKind::SlashToken,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_regex_class_and_escape() {
    let tokens = tokenize(r"/[/]\//u").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::RegularExpressionLiteral);
    assert_eq!(tokens[0].text, r"[/]\/");
}

#[test]
fn test_regex_flag_errors() {
    assert_eq!(lex_error("/a/gg"), messages::INVALID_REGEXP_FLAGS.code);
    assert_eq!(lex_error("/a/x"), messages::INVALID_REGEXP_FLAGS.code);
    assert_eq!(lex_error("/a/uv"), messages::INVALID_REGEXP_FLAGS.code);
    assert_eq!(lex_error("/a\n/"), messages::UNTERMINATED_REGEXP.code);
}

// ========================================================================
// Trivia
// ========================================================================

#[test]
fn test_comments_skipped() {
    assert_eq!(scan_kinds("a // line\n/* block */ b"), vec![TokenKind::Identifier; 2]);
    assert_eq!(lex_error("a /* open"), messages::UNTERMINATED_COMMENT.code);
}

#[test]
fn test_preceding_line_break() {
    let tokens = tokenize("a\nb /*\n*/ c d\u{2029}e").unwrap();
    let breaks: Vec<bool> = tokens.iter().map(|t| t.has_preceding_line_break()).collect();
    assert_eq!(breaks, vec![false, true, true, false, true]);
}

#[test]
fn test_shebang_skipping() {
    assert_eq!(scan_kinds("#!/usr/bin/env node\nfoo"), vec![TokenKind::Identifier]);
}

#[test]
fn test_html_comments_need_web_compat() {
    let mut scanner = Scanner::new("<!-- comment\nx");
    scanner.set_web_compat(true);
    assert_eq!(scanner.scan(), TokenKind::Identifier);
    assert_eq!(scanner.token_value(), "x");

    let mut scanner = Scanner::new("x\n--> comment");
    scanner.set_web_compat(true);
    scanner.scan();
    assert_eq!(scanner.scan(), TokenKind::EndOfFileToken);

    let mut scanner = Scanner::new("<!-- comment");
    scanner.set_web_compat(true);
    scanner.set_module_goal(true);
    assert_eq!(scanner.scan(), TokenKind::LessThanToken);
}

#[test]
fn test_error_location() {
    let error = tokenize("a\n  'open").unwrap_err();
    assert_eq!((error.line, error.column), (2, 2));
}
