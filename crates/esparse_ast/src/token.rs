//! TokenKind enum - every token the ECMAScript scanner produces.
//!
//! Only reserved words get keyword kinds. Contextual words (`let`, `async`,
//! `await`, `yield`, `static`, `of`, `get`, `set`, ...) are scanned as
//! `Identifier` and classified by the parser.

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // ========================================================================
    // Special
    // ========================================================================
    /// The scanner hit a lexical error; the error slot holds the details.
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Names
    Identifier,
    PrivateName,

    // ========================================================================
    // Punctuation
    // ========================================================================
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    QuestionQuestionToken,
    ColonToken,

    // Assignment operators (keep contiguous, `EqualsToken` first)
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,

    // ========================================================================
    // Reserved words (keep contiguous, `BreakKeyword` first)
    // ========================================================================
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,
}

impl TokenKind {
    /// Whether this kind is a reserved word.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u8;
        v >= TokenKind::BreakKeyword as u8 && v <= TokenKind::WithKeyword as u8
    }

    /// Whether this kind is `=` or a compound assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        let v = self as u8;
        v >= TokenKind::EqualsToken as u8 && v <= TokenKind::QuestionQuestionEqualsToken as u8
    }

    /// Whether this kind starts or continues a template literal.
    #[inline]
    pub fn is_template(self) -> bool {
        matches!(
            self,
            TokenKind::NoSubstitutionTemplateLiteral
                | TokenKind::TemplateHead
                | TokenKind::TemplateMiddle
                | TokenKind::TemplateTail
        )
    }

    /// Whether this kind may be used as an IdentifierName (property keys,
    /// member names, export names).
    #[inline]
    pub fn is_identifier_name(self) -> bool {
        self == TokenKind::Identifier || self.is_keyword()
    }

    /// Whether a `/` after this token starts a regular expression rather
    /// than a division. Used by standalone tokenization; the parser decides
    /// by grammar position instead.
    pub fn precedes_expression(self) -> bool {
        match self {
            TokenKind::Identifier
            | TokenKind::PrivateName
            | TokenKind::NumericLiteral
            | TokenKind::BigIntLiteral
            | TokenKind::StringLiteral
            | TokenKind::RegularExpressionLiteral
            | TokenKind::NoSubstitutionTemplateLiteral
            | TokenKind::TemplateTail
            | TokenKind::CloseParenToken
            | TokenKind::CloseBracketToken
            | TokenKind::CloseBraceToken
            | TokenKind::PlusPlusToken
            | TokenKind::MinusMinusToken
            | TokenKind::ThisKeyword
            | TokenKind::SuperKeyword
            | TokenKind::NullKeyword
            | TokenKind::TrueKeyword
            | TokenKind::FalseKeyword => false,
            _ => true,
        }
    }

    /// Look up a reserved word from its text.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "break" => TokenKind::BreakKeyword,
            "case" => TokenKind::CaseKeyword,
            "catch" => TokenKind::CatchKeyword,
            "class" => TokenKind::ClassKeyword,
            "const" => TokenKind::ConstKeyword,
            "continue" => TokenKind::ContinueKeyword,
            "debugger" => TokenKind::DebuggerKeyword,
            "default" => TokenKind::DefaultKeyword,
            "delete" => TokenKind::DeleteKeyword,
            "do" => TokenKind::DoKeyword,
            "else" => TokenKind::ElseKeyword,
            "enum" => TokenKind::EnumKeyword,
            "export" => TokenKind::ExportKeyword,
            "extends" => TokenKind::ExtendsKeyword,
            "false" => TokenKind::FalseKeyword,
            "finally" => TokenKind::FinallyKeyword,
            "for" => TokenKind::ForKeyword,
            "function" => TokenKind::FunctionKeyword,
            "if" => TokenKind::IfKeyword,
            "import" => TokenKind::ImportKeyword,
            "in" => TokenKind::InKeyword,
            "instanceof" => TokenKind::InstanceOfKeyword,
            "new" => TokenKind::NewKeyword,
            "null" => TokenKind::NullKeyword,
            "return" => TokenKind::ReturnKeyword,
            "super" => TokenKind::SuperKeyword,
            "switch" => TokenKind::SwitchKeyword,
            "this" => TokenKind::ThisKeyword,
            "throw" => TokenKind::ThrowKeyword,
            "true" => TokenKind::TrueKeyword,
            "try" => TokenKind::TryKeyword,
            "typeof" => TokenKind::TypeOfKeyword,
            "var" => TokenKind::VarKeyword,
            "void" => TokenKind::VoidKeyword,
            "while" => TokenKind::WhileKeyword,
            "with" => TokenKind::WithKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Get the source text of a keyword or punctuation kind.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::OpenBraceToken => "{",
            TokenKind::CloseBraceToken => "}",
            TokenKind::OpenParenToken => "(",
            TokenKind::CloseParenToken => ")",
            TokenKind::OpenBracketToken => "[",
            TokenKind::CloseBracketToken => "]",
            TokenKind::DotToken => ".",
            TokenKind::DotDotDotToken => "...",
            TokenKind::SemicolonToken => ";",
            TokenKind::CommaToken => ",",
            TokenKind::QuestionDotToken => "?.",
            TokenKind::LessThanToken => "<",
            TokenKind::GreaterThanToken => ">",
            TokenKind::LessThanEqualsToken => "<=",
            TokenKind::GreaterThanEqualsToken => ">=",
            TokenKind::EqualsEqualsToken => "==",
            TokenKind::ExclamationEqualsToken => "!=",
            TokenKind::EqualsEqualsEqualsToken => "===",
            TokenKind::ExclamationEqualsEqualsToken => "!==",
            TokenKind::EqualsGreaterThanToken => "=>",
            TokenKind::PlusToken => "+",
            TokenKind::MinusToken => "-",
            TokenKind::AsteriskToken => "*",
            TokenKind::AsteriskAsteriskToken => "**",
            TokenKind::SlashToken => "/",
            TokenKind::PercentToken => "%",
            TokenKind::PlusPlusToken => "++",
            TokenKind::MinusMinusToken => "--",
            TokenKind::LessThanLessThanToken => "<<",
            TokenKind::GreaterThanGreaterThanToken => ">>",
            TokenKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            TokenKind::AmpersandToken => "&",
            TokenKind::BarToken => "|",
            TokenKind::CaretToken => "^",
            TokenKind::ExclamationToken => "!",
            TokenKind::TildeToken => "~",
            TokenKind::AmpersandAmpersandToken => "&&",
            TokenKind::BarBarToken => "||",
            TokenKind::QuestionToken => "?",
            TokenKind::QuestionQuestionToken => "??",
            TokenKind::ColonToken => ":",
            TokenKind::EqualsToken => "=",
            TokenKind::PlusEqualsToken => "+=",
            TokenKind::MinusEqualsToken => "-=",
            TokenKind::AsteriskEqualsToken => "*=",
            TokenKind::AsteriskAsteriskEqualsToken => "**=",
            TokenKind::SlashEqualsToken => "/=",
            TokenKind::PercentEqualsToken => "%=",
            TokenKind::LessThanLessThanEqualsToken => "<<=",
            TokenKind::GreaterThanGreaterThanEqualsToken => ">>=",
            TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            TokenKind::AmpersandEqualsToken => "&=",
            TokenKind::BarEqualsToken => "|=",
            TokenKind::CaretEqualsToken => "^=",
            TokenKind::AmpersandAmpersandEqualsToken => "&&=",
            TokenKind::BarBarEqualsToken => "||=",
            TokenKind::QuestionQuestionEqualsToken => "??=",
            TokenKind::BreakKeyword => "break",
            TokenKind::CaseKeyword => "case",
            TokenKind::CatchKeyword => "catch",
            TokenKind::ClassKeyword => "class",
            TokenKind::ConstKeyword => "const",
            TokenKind::ContinueKeyword => "continue",
            TokenKind::DebuggerKeyword => "debugger",
            TokenKind::DefaultKeyword => "default",
            TokenKind::DeleteKeyword => "delete",
            TokenKind::DoKeyword => "do",
            TokenKind::ElseKeyword => "else",
            TokenKind::EnumKeyword => "enum",
            TokenKind::ExportKeyword => "export",
            TokenKind::ExtendsKeyword => "extends",
            TokenKind::FalseKeyword => "false",
            TokenKind::FinallyKeyword => "finally",
            TokenKind::ForKeyword => "for",
            TokenKind::FunctionKeyword => "function",
            TokenKind::IfKeyword => "if",
            TokenKind::ImportKeyword => "import",
            TokenKind::InKeyword => "in",
            TokenKind::InstanceOfKeyword => "instanceof",
            TokenKind::NewKeyword => "new",
            TokenKind::NullKeyword => "null",
            TokenKind::ReturnKeyword => "return",
            TokenKind::SuperKeyword => "super",
            TokenKind::SwitchKeyword => "switch",
            TokenKind::ThisKeyword => "this",
            TokenKind::ThrowKeyword => "throw",
            TokenKind::TrueKeyword => "true",
            TokenKind::TryKeyword => "try",
            TokenKind::TypeOfKeyword => "typeof",
            TokenKind::VarKeyword => "var",
            TokenKind::VoidKeyword => "void",
            TokenKind::WhileKeyword => "while",
            TokenKind::WithKeyword => "with",
            _ => return None,
        };
        Some(text)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => f.write_str(text),
            None => write!(f, "{:?}", self),
        }
    }
}
