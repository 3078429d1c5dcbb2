//! Operator precedence for binary and logical operators.

use esparse_ast::token::TokenKind;
use esparse_ast::{AssignmentOperator, BinaryOperator, LogicalOperator};

/// Operator precedence levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    NullishCoalescing = 1,
    LogicalOr = 2,
    LogicalAnd = 3,
    BitwiseOr = 4,
    BitwiseXor = 5,
    BitwiseAnd = 6,
    Equality = 7,
    Relational = 8,
    Shift = 9,
    Additive = 10,
    Multiplicative = 11,
    Exponentiation = 12,
    Invalid = 255,
}

impl OperatorPrecedence {
    /// `**` groups to the right; every other binary operator to the left.
    pub fn is_right_associative(self) -> bool {
        self == OperatorPrecedence::Exponentiation
    }
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: TokenKind) -> OperatorPrecedence {
    match kind {
        TokenKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        TokenKind::BarBarToken => OperatorPrecedence::LogicalOr,
        TokenKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        TokenKind::BarToken => OperatorPrecedence::BitwiseOr,
        TokenKind::CaretToken => OperatorPrecedence::BitwiseXor,
        TokenKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        TokenKind::EqualsEqualsToken
        | TokenKind::ExclamationEqualsToken
        | TokenKind::EqualsEqualsEqualsToken
        | TokenKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        TokenKind::LessThanToken
        | TokenKind::GreaterThanToken
        | TokenKind::LessThanEqualsToken
        | TokenKind::GreaterThanEqualsToken
        | TokenKind::InstanceOfKeyword
        | TokenKind::InKeyword => OperatorPrecedence::Relational,
        TokenKind::LessThanLessThanToken
        | TokenKind::GreaterThanGreaterThanToken
        | TokenKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        TokenKind::PlusToken | TokenKind::MinusToken => OperatorPrecedence::Additive,
        TokenKind::AsteriskToken | TokenKind::SlashToken | TokenKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        TokenKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

/// The operator a binary token produces: either a `BinaryExpression` or a
/// `LogicalExpression`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

pub fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    use InfixOperator::{Binary, Logical};
    let op = match kind {
        TokenKind::QuestionQuestionToken => Logical(LogicalOperator::Coalesce),
        TokenKind::BarBarToken => Logical(LogicalOperator::Or),
        TokenKind::AmpersandAmpersandToken => Logical(LogicalOperator::And),
        TokenKind::BarToken => Binary(BinaryOperator::BitwiseOr),
        TokenKind::CaretToken => Binary(BinaryOperator::BitwiseXor),
        TokenKind::AmpersandToken => Binary(BinaryOperator::BitwiseAnd),
        TokenKind::EqualsEqualsToken => Binary(BinaryOperator::Equality),
        TokenKind::ExclamationEqualsToken => Binary(BinaryOperator::Inequality),
        TokenKind::EqualsEqualsEqualsToken => Binary(BinaryOperator::StrictEquality),
        TokenKind::ExclamationEqualsEqualsToken => Binary(BinaryOperator::StrictInequality),
        TokenKind::LessThanToken => Binary(BinaryOperator::LessThan),
        TokenKind::GreaterThanToken => Binary(BinaryOperator::GreaterThan),
        TokenKind::LessThanEqualsToken => Binary(BinaryOperator::LessEqualThan),
        TokenKind::GreaterThanEqualsToken => Binary(BinaryOperator::GreaterEqualThan),
        TokenKind::InstanceOfKeyword => Binary(BinaryOperator::Instanceof),
        TokenKind::InKeyword => Binary(BinaryOperator::In),
        TokenKind::LessThanLessThanToken => Binary(BinaryOperator::ShiftLeft),
        TokenKind::GreaterThanGreaterThanToken => Binary(BinaryOperator::ShiftRight),
        TokenKind::GreaterThanGreaterThanGreaterThanToken => Binary(BinaryOperator::ShiftRightZeroFill),
        TokenKind::PlusToken => Binary(BinaryOperator::Addition),
        TokenKind::MinusToken => Binary(BinaryOperator::Subtraction),
        TokenKind::AsteriskToken => Binary(BinaryOperator::Multiplication),
        TokenKind::SlashToken => Binary(BinaryOperator::Division),
        TokenKind::PercentToken => Binary(BinaryOperator::Remainder),
        TokenKind::AsteriskAsteriskToken => Binary(BinaryOperator::Exponential),
        _ => return None,
    };
    Some(op)
}

pub fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
    let op = match kind {
        TokenKind::EqualsToken => AssignmentOperator::Assign,
        TokenKind::PlusEqualsToken => AssignmentOperator::Addition,
        TokenKind::MinusEqualsToken => AssignmentOperator::Subtraction,
        TokenKind::AsteriskEqualsToken => AssignmentOperator::Multiplication,
        TokenKind::AsteriskAsteriskEqualsToken => AssignmentOperator::Exponential,
        TokenKind::SlashEqualsToken => AssignmentOperator::Division,
        TokenKind::PercentEqualsToken => AssignmentOperator::Remainder,
        TokenKind::LessThanLessThanEqualsToken => AssignmentOperator::ShiftLeft,
        TokenKind::GreaterThanGreaterThanEqualsToken => AssignmentOperator::ShiftRight,
        TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken => AssignmentOperator::ShiftRightZeroFill,
        TokenKind::AmpersandEqualsToken => AssignmentOperator::BitwiseAnd,
        TokenKind::BarEqualsToken => AssignmentOperator::BitwiseOr,
        TokenKind::CaretEqualsToken => AssignmentOperator::BitwiseXor,
        TokenKind::AmpersandAmpersandEqualsToken => AssignmentOperator::LogicalAnd,
        TokenKind::BarBarEqualsToken => AssignmentOperator::LogicalOr,
        TokenKind::QuestionQuestionEqualsToken => AssignmentOperator::LogicalNullish,
        _ => return None,
    };
    Some(op)
}
