//! Parser utility functions.

use esparse_ast::token::TokenKind;

/// How a word behaves when it appears where an identifier is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierClass {
    /// An ordinary name.
    Plain,
    /// Always a reserved word (only reachable through an escaped spelling).
    Reserved,
    /// Reserved in strict mode code only.
    StrictReserved,
    /// `yield`: reserved in generators and strict code.
    Yield,
    /// `await`: reserved in async functions, modules and static blocks.
    Await,
    /// `eval` or `arguments`: not assignable or bindable in strict code.
    EvalOrArguments,
    /// `let`: strict reserved, and never a lexically bound name.
    Let,
}

/// Classify an identifier name. Context-dependent decisions are left to the
/// caller, which knows the current grammar flags.
pub fn classify_identifier(name: &str) -> IdentifierClass {
    match name {
        "yield" => IdentifierClass::Yield,
        "await" => IdentifierClass::Await,
        "eval" | "arguments" => IdentifierClass::EvalOrArguments,
        "let" => IdentifierClass::Let,
        "implements" | "interface" | "package" | "private" | "protected" | "public" | "static" => {
            IdentifierClass::StrictReserved
        }
        _ if TokenKind::from_keyword(name).is_some() => IdentifierClass::Reserved,
        _ => IdentifierClass::Plain,
    }
}

/// Check if a token kind can start an expression.
pub fn can_start_expression(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::PrivateName
            | TokenKind::NumericLiteral
            | TokenKind::BigIntLiteral
            | TokenKind::StringLiteral
            | TokenKind::NoSubstitutionTemplateLiteral
            | TokenKind::TemplateHead
            | TokenKind::OpenParenToken
            | TokenKind::OpenBracketToken
            | TokenKind::OpenBraceToken
            | TokenKind::PlusToken
            | TokenKind::MinusToken
            | TokenKind::TildeToken
            | TokenKind::ExclamationToken
            | TokenKind::PlusPlusToken
            | TokenKind::MinusMinusToken
            | TokenKind::SlashToken
            | TokenKind::SlashEqualsToken
            | TokenKind::NewKeyword
            | TokenKind::DeleteKeyword
            | TokenKind::TypeOfKeyword
            | TokenKind::VoidKeyword
            | TokenKind::SuperKeyword
            | TokenKind::ThisKeyword
            | TokenKind::TrueKeyword
            | TokenKind::FalseKeyword
            | TokenKind::NullKeyword
            | TokenKind::FunctionKeyword
            | TokenKind::ClassKeyword
            | TokenKind::ImportKeyword
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_identifier() {
        assert_eq!(classify_identifier("foo"), IdentifierClass::Plain);
        assert_eq!(classify_identifier("async"), IdentifierClass::Plain);
        assert_eq!(classify_identifier("of"), IdentifierClass::Plain);
        assert_eq!(classify_identifier("static"), IdentifierClass::StrictReserved);
        assert_eq!(classify_identifier("yield"), IdentifierClass::Yield);
        assert_eq!(classify_identifier("await"), IdentifierClass::Await);
        assert_eq!(classify_identifier("arguments"), IdentifierClass::EvalOrArguments);
        assert_eq!(classify_identifier("let"), IdentifierClass::Let);
        assert_eq!(classify_identifier("typeof"), IdentifierClass::Reserved);
    }

    #[test]
    fn test_can_start_expression() {
        assert!(can_start_expression(TokenKind::Identifier));
        assert!(can_start_expression(TokenKind::SlashToken));
        assert!(!can_start_expression(TokenKind::CloseParenToken));
        assert!(!can_start_expression(TokenKind::SemicolonToken));
    }
}
