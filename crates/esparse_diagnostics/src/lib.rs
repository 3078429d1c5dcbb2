//! esparse_diagnostics: Parse errors and the message table.
//!
//! Parsing is fail-fast: the first violation aborts the parse and is reported
//! as a single [`ParseError`]. Every message the scanner and parser can
//! produce is declared once in [`messages`] with a stable code and the
//! [`ErrorKind`] it belongs to.

use esparse_core::text::{LineMap, TextSpan};
use std::fmt;

/// The category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed literal, comment or escape sequence.
    Lex,
    /// The parser expected one token and found another.
    UnexpectedToken,
    /// An expression could not be reinterpreted as an assignment or binding pattern.
    InvalidDestructuringTarget,
    /// A name, label, export or class member was declared twice.
    DuplicateBinding,
    /// A construct appeared where the current context forbids it.
    IllegalContext,
    /// A construct only legal in sloppy mode appeared in strict code.
    StrictMode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Lex => "LexError",
            ErrorKind::UnexpectedToken => "UnexpectedTokenError",
            ErrorKind::InvalidDestructuringTarget => "InvalidDestructuringTarget",
            ErrorKind::DuplicateBinding => "DuplicateBindingError",
            ErrorKind::IllegalContext => "IllegalContextError",
            ErrorKind::StrictMode => "StrictModeError",
        };
        f.write_str(name)
    }
}

/// A diagnostic message template with a code and kind.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002, 1401).
    pub code: u32,
    /// The error kind this message reports.
    pub kind: ErrorKind,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A fatal parse error with its source position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({line}:{column})")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub code: u32,
    pub message: String,
    /// Byte range of the offending source text.
    pub span: TextSpan,
    /// 1-based line of `span.start`.
    pub line: u32,
    /// 0-based column of `span.start`.
    pub column: u32,
}

impl ParseError {
    /// Create an error without line information; see [`ParseError::located`].
    pub fn new(message: &DiagnosticMessage, args: &[&str], span: TextSpan) -> Self {
        Self {
            kind: message.kind,
            code: message.code,
            message: format_message(message.message, args),
            span,
            line: 0,
            column: 0,
        }
    }

    /// Fill in the line and column of the error start.
    pub fn located(mut self, line_map: &LineMap) -> Self {
        let lc = line_map.line_and_column_of(self.span.start);
        self.line = lc.line + 1;
        self.column = lc.character;
        self
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $kind:ident, $msg:expr) => {
            DiagnosticMessage { code: $code, kind: ErrorKind::$kind, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1000, Lex, "Unterminated string literal");
    pub const UNTERMINATED_TEMPLATE: DiagnosticMessage = diag!(1001, Lex, "Unterminated template literal");
    pub const UNTERMINATED_REGEXP: DiagnosticMessage = diag!(1002, Lex, "Unterminated regular expression literal");
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(1003, Lex, "Unterminated comment");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1004, Lex, "Invalid or unexpected character '{0}'");
    pub const INVALID_HEX_ESCAPE: DiagnosticMessage = diag!(1005, Lex, "Invalid hexadecimal escape sequence");
    pub const INVALID_UNICODE_ESCAPE: DiagnosticMessage = diag!(1006, Lex, "Invalid Unicode escape sequence");
    pub const UNICODE_ESCAPE_OUT_OF_RANGE: DiagnosticMessage = diag!(1007, Lex, "Unicode escape sequence value is out of range");
    pub const INVALID_IDENTIFIER_ESCAPE: DiagnosticMessage = diag!(1008, Lex, "Escaped character is not valid at the {0} of an identifier");
    pub const NUMERIC_SEPARATOR_NOT_ALLOWED: DiagnosticMessage = diag!(1009, Lex, "Numeric separators are not allowed here");
    pub const CONSECUTIVE_NUMERIC_SEPARATORS: DiagnosticMessage = diag!(1010, Lex, "Only one underscore is allowed as numeric separator");
    pub const TRAILING_NUMERIC_SEPARATOR: DiagnosticMessage = diag!(1011, Lex, "Numeric separators are not allowed at the end of numeric literals");
    pub const NUMERIC_SEPARATORS_DISABLED: DiagnosticMessage = diag!(1012, Lex, "Numeric separators require the 'next' option");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1013, Lex, "Digit expected");
    pub const IDENTIFIER_AFTER_NUMBER: DiagnosticMessage = diag!(1014, Lex, "An identifier or keyword cannot immediately follow a numeric literal");
    pub const INVALID_BIGINT: DiagnosticMessage = diag!(1015, Lex, "Invalid BigInt syntax");
    pub const INVALID_REGEXP_FLAGS: DiagnosticMessage = diag!(1016, Lex, "Invalid regular expression flags");
    pub const INVALID_PRIVATE_NAME: DiagnosticMessage = diag!(1017, Lex, "Invalid character after '#'");
    pub const INVALID_TEMPLATE_ESCAPE: DiagnosticMessage = diag!(1018, Lex, "Invalid escape sequence in template");
    pub const INVALID_OCTAL_ESCAPE_IN_TEMPLATE: DiagnosticMessage = diag!(1019, Lex, "Octal escape sequences are not allowed in template strings");

    // ========================================================================
    // Unexpected tokens (1100-1199)
    // ========================================================================
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1100, UnexpectedToken, "Unexpected token '{0}'");
    pub const UNEXPECTED_EOF: DiagnosticMessage = diag!(1101, UnexpectedToken, "Unexpected end of input");
    pub const EXPECTED_TOKEN: DiagnosticMessage = diag!(1102, UnexpectedToken, "'{0}' expected");
    pub const ESCAPED_KEYWORD: DiagnosticMessage = diag!(1103, UnexpectedToken, "Keywords cannot contain escape characters");
    pub const UNEXPECTED_RESERVED_WORD: DiagnosticMessage = diag!(1104, UnexpectedToken, "Unexpected reserved word '{0}'");
    pub const MISSING_INITIALIZER: DiagnosticMessage = diag!(1105, UnexpectedToken, "Missing initializer in {0}");
    pub const NULLISH_MIXED_WITH_LOGICAL: DiagnosticMessage = diag!(1106, UnexpectedToken, "Nullish coalescing operator cannot be mixed with '||' or '&&' without parentheses");
    pub const UNARY_BEFORE_EXPONENT: DiagnosticMessage = diag!(1107, UnexpectedToken, "Unary operator used immediately before exponentiation expression; parentheses are required");
    pub const NEWLINE_AFTER_THROW: DiagnosticMessage = diag!(1108, UnexpectedToken, "Illegal newline after throw");
    pub const LINE_TERMINATOR_BEFORE_ARROW: DiagnosticMessage = diag!(1109, UnexpectedToken, "Line terminator not permitted before arrow");
    pub const ARROW_NOT_ALLOWED: DiagnosticMessage = diag!(1110, UnexpectedToken, "Arrow function is not allowed in this position");
    pub const GETTER_PARAMETERS: DiagnosticMessage = diag!(1111, UnexpectedToken, "Getter must not have any formal parameters");
    pub const SETTER_PARAMETERS: DiagnosticMessage = diag!(1112, UnexpectedToken, "Setter must have exactly one formal parameter");
    pub const SETTER_REST_PARAMETER: DiagnosticMessage = diag!(1113, UnexpectedToken, "Setter function argument must not be a rest parameter");
    pub const REST_TRAILING_COMMA: DiagnosticMessage = diag!(1114, UnexpectedToken, "A rest element may not have a trailing comma");
    pub const REST_INITIALIZER: DiagnosticMessage = diag!(1115, UnexpectedToken, "Rest element may not have a default initializer");
    pub const OPTIONAL_CHAIN_TEMPLATE: DiagnosticMessage = diag!(1116, UnexpectedToken, "Invalid tagged template on optional chain");
    pub const OPTIONAL_CHAIN_NEW: DiagnosticMessage = diag!(1117, UnexpectedToken, "Invalid optional chain from new expression");
    pub const FOR_IN_OF_SINGLE_BINDING: DiagnosticMessage = diag!(1118, UnexpectedToken, "Invalid left-hand side in {0} loop: must have a single binding");
    pub const FOR_IN_OF_INITIALIZER: DiagnosticMessage = diag!(1119, UnexpectedToken, "{0} loop variable declaration may not have an initializer");
    pub const FOR_OF_ASYNC: DiagnosticMessage = diag!(1120, UnexpectedToken, "The left-hand side of a for-of loop may not be 'async'");
    pub const FOR_OF_LET: DiagnosticMessage = diag!(1121, UnexpectedToken, "The left-hand side of a for-of loop may not start with 'let'");
    pub const FOR_AWAIT_REQUIRES_OF: DiagnosticMessage = diag!(1122, UnexpectedToken, "'for await' loops must use 'of'");
    pub const INVALID_OPTIONAL_CHAIN_TARGET: DiagnosticMessage = diag!(1123, UnexpectedToken, "Invalid left-hand side: optional chain");
    pub const MODULE_EXPORT_NAME_STRING: DiagnosticMessage = diag!(1124, UnexpectedToken, "A string literal cannot be used as an exported binding without 'from'");
    pub const MISSING_CATCH_OR_FINALLY: DiagnosticMessage = diag!(1125, UnexpectedToken, "Missing catch or finally after try");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(1126, UnexpectedToken, "Maximum nesting depth exceeded");
    pub const INVALID_IMPORT_CALL: DiagnosticMessage = diag!(1127, UnexpectedToken, "Dynamic import requires exactly one argument");

    // ========================================================================
    // Destructuring targets (1200-1299)
    // ========================================================================
    pub const INVALID_DESTRUCTURING_TARGET: DiagnosticMessage = diag!(1200, InvalidDestructuringTarget, "Invalid destructuring assignment target");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(1201, InvalidDestructuringTarget, "Invalid left-hand side in assignment");
    pub const INVALID_UPDATE_TARGET: DiagnosticMessage = diag!(1202, InvalidDestructuringTarget, "Invalid left-hand side expression in {0} operation");
    pub const INVALID_FOR_TARGET: DiagnosticMessage = diag!(1203, InvalidDestructuringTarget, "Invalid left-hand side in {0} loop");
    pub const REST_NOT_LAST: DiagnosticMessage = diag!(1204, InvalidDestructuringTarget, "Rest element must be last element");
    pub const INVALID_REST_TARGET: DiagnosticMessage = diag!(1205, InvalidDestructuringTarget, "'...' must be followed by an assignable reference in assignment contexts");
    pub const INVALID_OBJECT_REST_BINDING: DiagnosticMessage = diag!(1206, InvalidDestructuringTarget, "'...' must be followed by an identifier in declaration contexts");
    pub const INVALID_ARROW_PARAMETERS: DiagnosticMessage = diag!(1207, InvalidDestructuringTarget, "Invalid destructuring target in arrow function parameters");
    pub const INVALID_SHORTHAND_INITIALIZER: DiagnosticMessage = diag!(1208, InvalidDestructuringTarget, "Invalid shorthand property initializer");

    // ========================================================================
    // Duplicates (1300-1399)
    // ========================================================================
    pub const DUPLICATE_BINDING: DiagnosticMessage = diag!(1300, DuplicateBinding, "Identifier '{0}' has already been declared");
    pub const DUPLICATE_LABEL: DiagnosticMessage = diag!(1301, DuplicateBinding, "Label '{0}' has already been declared");
    pub const DUPLICATE_EXPORT: DiagnosticMessage = diag!(1302, DuplicateBinding, "Duplicate export of '{0}'");
    pub const DUPLICATE_CONSTRUCTOR: DiagnosticMessage = diag!(1303, DuplicateBinding, "A class may only have one constructor");
    pub const DUPLICATE_PRIVATE_NAME: DiagnosticMessage = diag!(1304, DuplicateBinding, "Identifier '#{0}' has already been declared");
    pub const DUPLICATE_PROTO: DiagnosticMessage = diag!(1305, DuplicateBinding, "Duplicate __proto__ fields are not allowed in object literals");
    pub const DUPLICATE_DEFAULT_CLAUSE: DiagnosticMessage = diag!(1306, DuplicateBinding, "More than one default clause in switch statement");

    // ========================================================================
    // Illegal context (1400-1499)
    // ========================================================================
    pub const LEXICAL_SINGLE_STATEMENT: DiagnosticMessage = diag!(1400, IllegalContext, "Lexical declaration cannot appear in a single-statement context");
    pub const FUNCTION_SINGLE_STATEMENT: DiagnosticMessage = diag!(1401, IllegalContext, "Function declarations are not allowed in a single-statement context");
    pub const LABELLED_FUNCTION: DiagnosticMessage = diag!(1402, IllegalContext, "Labelled function declarations are only allowed in sloppy web-compatible code");
    pub const ILLEGAL_RETURN: DiagnosticMessage = diag!(1403, IllegalContext, "Illegal return statement");
    pub const ILLEGAL_BREAK: DiagnosticMessage = diag!(1404, IllegalContext, "Illegal break statement");
    pub const ILLEGAL_CONTINUE: DiagnosticMessage = diag!(1405, IllegalContext, "Illegal continue statement: no surrounding iteration statement");
    pub const UNDEFINED_LABEL: DiagnosticMessage = diag!(1406, IllegalContext, "Undefined label '{0}'");
    pub const ILLEGAL_CONTINUE_LABEL: DiagnosticMessage = diag!(1407, IllegalContext, "Illegal continue statement: '{0}' does not denote an iteration statement");
    pub const AWAIT_OUTSIDE_ASYNC: DiagnosticMessage = diag!(1408, IllegalContext, "'await' is only valid in async functions and the top level bodies of modules");
    pub const AWAIT_IN_PARAMETERS: DiagnosticMessage = diag!(1409, IllegalContext, "'await' is not allowed in async function parameters");
    pub const YIELD_IN_PARAMETERS: DiagnosticMessage = diag!(1410, IllegalContext, "Yield expression not allowed in formal parameter");
    pub const AWAIT_AS_IDENTIFIER: DiagnosticMessage = diag!(1411, IllegalContext, "'await' cannot be used as an identifier here");
    pub const YIELD_AS_IDENTIFIER: DiagnosticMessage = diag!(1412, IllegalContext, "'yield' cannot be used as an identifier inside a generator");
    pub const SUPER_CALL_NOT_ALLOWED: DiagnosticMessage = diag!(1413, IllegalContext, "'super' call is only valid inside a derived class constructor");
    pub const SUPER_PROPERTY_NOT_ALLOWED: DiagnosticMessage = diag!(1414, IllegalContext, "'super' keyword unexpected here");
    pub const NEW_TARGET_NOT_ALLOWED: DiagnosticMessage = diag!(1415, IllegalContext, "new.target expression is not allowed here");
    pub const IMPORT_META_OUTSIDE_MODULE: DiagnosticMessage = diag!(1416, IllegalContext, "Cannot use 'import.meta' outside a module");
    pub const MODULE_ITEM_NOT_TOP_LEVEL: DiagnosticMessage = diag!(1417, IllegalContext, "'{0}' declarations may only appear at the top level of a module");
    pub const ARGUMENTS_IN_CLASS_BODY: DiagnosticMessage = diag!(1418, IllegalContext, "'arguments' is not allowed in class field initializers or static initialization blocks");
    pub const USE_STRICT_NON_SIMPLE_PARAMS: DiagnosticMessage = diag!(1419, IllegalContext, "Illegal 'use strict' directive in function with non-simple parameter list");
    pub const NEXT_REQUIRED: DiagnosticMessage = diag!(1420, IllegalContext, "{0} requires the 'next' option");
    pub const INVALID_CONSTRUCTOR: DiagnosticMessage = diag!(1421, IllegalContext, "Class constructor may not be {0}");
    pub const STATIC_PROTOTYPE: DiagnosticMessage = diag!(1422, IllegalContext, "Classes may not have a static property named 'prototype'");
    pub const FIELD_NAMED_CONSTRUCTOR: DiagnosticMessage = diag!(1423, IllegalContext, "Classes may not have a field named 'constructor'");
    pub const PRIVATE_CONSTRUCTOR: DiagnosticMessage = diag!(1424, IllegalContext, "Classes may not have a private element named '#constructor'");
    pub const UNDECLARED_PRIVATE_NAME: DiagnosticMessage = diag!(1425, IllegalContext, "Private field '#{0}' must be declared in an enclosing class");
    pub const DELETE_PRIVATE_FIELD: DiagnosticMessage = diag!(1426, IllegalContext, "Private fields can not be deleted");
    pub const UNEXPECTED_PRIVATE_NAME: DiagnosticMessage = diag!(1427, IllegalContext, "Unexpected private name '#{0}'");
    pub const UNDECLARED_EXPORT: DiagnosticMessage = diag!(1428, IllegalContext, "Export '{0}' is not defined in module");
    pub const LET_IN_LEXICAL_BINDING: DiagnosticMessage = diag!(1429, IllegalContext, "'let' is disallowed as a lexically bound name");
    pub const ASYNC_FUNCTION_SINGLE_STATEMENT: DiagnosticMessage = diag!(1430, IllegalContext, "Async functions can only be declared at the top level or inside a block");
    pub const GENERATOR_SINGLE_STATEMENT: DiagnosticMessage = diag!(1431, IllegalContext, "Generators can only be declared at the top level or inside a block");

    // ========================================================================
    // Strict mode (1500-1599)
    // ========================================================================
    pub const STRICT_WITH: DiagnosticMessage = diag!(1500, StrictMode, "Strict mode code may not include a with statement");
    pub const STRICT_OCTAL_LITERAL: DiagnosticMessage = diag!(1501, StrictMode, "Octal literals are not allowed in strict mode");
    pub const STRICT_OCTAL_ESCAPE: DiagnosticMessage = diag!(1502, StrictMode, "Octal escape sequences are not allowed in strict mode");
    pub const STRICT_EVAL_ARGUMENTS: DiagnosticMessage = diag!(1503, StrictMode, "Unexpected eval or arguments in strict mode");
    pub const STRICT_DELETE: DiagnosticMessage = diag!(1504, StrictMode, "Delete of an unqualified identifier in strict mode");
    pub const STRICT_RESERVED_WORD: DiagnosticMessage = diag!(1505, StrictMode, "Unexpected strict mode reserved word '{0}'");
    pub const STRICT_DUPLICATE_PARAMETER: DiagnosticMessage = diag!(1506, StrictMode, "Duplicate parameter name not allowed in this context");
    pub const STRICT_FUNCTION: DiagnosticMessage = diag!(1507, StrictMode, "In strict mode code, functions can only be declared at top level or inside a block");
}
