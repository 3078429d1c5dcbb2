//! ESTree node definitions.
//!
//! Nodes are arena-allocated and reference their children via `&'a`
//! references, so every enum below is `Copy`. Node structs that always have
//! the same ESTree `type` carry it as a serde struct tag; structs shared by
//! two node types (functions, classes, member and call expressions) carry an
//! explicit `type` field instead.

use crate::span::Span;
use serde::{Deserialize, Serialize, Serializer};

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Program
// ============================================================================

/// The goal symbol the source was parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
    /// Script grammar with a top-level `return` allowed.
    CommonJs,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Program<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub source_type: SourceType,
    pub body: NodeList<'a, Statement<'a>>,
}

// ============================================================================
// Names and literals
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Identifier<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub name: &'a str,
}

/// `#name` inside a class body, a member access, or a `#name in obj` check.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct PrivateIdentifier<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Null,
    Boolean(bool),
    Number(f64),
    String(&'a str),
    /// Serialized as `null`; the digits live in [`Literal::bigint`].
    BigInt,
    /// Serialized as `null`; pattern and flags live in [`Literal::regex`].
    RegExp,
}

impl Serialize for LiteralValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            LiteralValue::Null | LiteralValue::BigInt | LiteralValue::RegExp => {
                serializer.serialize_none()
            }
            LiteralValue::Boolean(b) => serializer.serialize_bool(b),
            // Integral values are written without a fraction, as JSON.stringify does.
            LiteralValue::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                if n == 0.0 && n.is_sign_negative() {
                    serializer.serialize_f64(n)
                } else {
                    serializer.serialize_i64(n as i64)
                }
            }
            LiteralValue::Number(n) => serializer.serialize_f64(n),
            LiteralValue::String(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegExpLiteral<'a> {
    pub pattern: &'a str,
    pub flags: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Literal<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub value: LiteralValue<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegExpLiteral<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bigint: Option<&'a str>,
}

impl Literal<'_> {
    pub fn is_string(&self) -> bool {
        matches!(self.value, LiteralValue::String(_))
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Expression<'a> {
    Identifier(&'a Identifier<'a>),
    PrivateIdentifier(&'a PrivateIdentifier<'a>),
    Literal(&'a Literal<'a>),
    This(&'a ThisExpression),
    Super(&'a Super),
    Array(&'a ArrayExpression<'a>),
    Object(&'a ObjectExpression<'a>),
    Function(&'a Function<'a>),
    ArrowFunction(&'a ArrowFunctionExpression<'a>),
    Class(&'a Class<'a>),
    TemplateLiteral(&'a TemplateLiteral<'a>),
    TaggedTemplate(&'a TaggedTemplateExpression<'a>),
    Member(&'a MemberExpression<'a>),
    Call(&'a CallExpression<'a>),
    New(&'a NewExpression<'a>),
    MetaProperty(&'a MetaProperty<'a>),
    Import(&'a ImportExpression<'a>),
    Update(&'a UpdateExpression<'a>),
    Unary(&'a UnaryExpression<'a>),
    Binary(&'a BinaryExpression<'a>),
    Logical(&'a LogicalExpression<'a>),
    Conditional(&'a ConditionalExpression<'a>),
    Assignment(&'a AssignmentExpression<'a>),
    Sequence(&'a SequenceExpression<'a>),
    Yield(&'a YieldExpression<'a>),
    Await(&'a AwaitExpression<'a>),
    Spread(&'a SpreadElement<'a>),
    Parenthesized(&'a ParenthesizedExpression<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ThisExpression {
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Super {
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ArrayExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub elements: NodeList<'a, Option<Expression<'a>>>,
    /// Position of a comma after the last element, if any.
    #[serde(skip)]
    pub trailing_comma: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ObjectMember<'a> {
    Property(&'a Property<'a>),
    Spread(&'a SpreadElement<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ObjectExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub properties: NodeList<'a, ObjectMember<'a>>,
    #[serde(skip)]
    pub trailing_comma: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct Property<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub key: Expression<'a>,
    pub value: Expression<'a>,
    pub kind: PropertyKind,
    pub computed: bool,
    pub method: bool,
    pub shorthand: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FunctionType {
    FunctionDeclaration,
    FunctionExpression,
}

/// A function declaration, function expression or method value.
#[derive(Debug, Clone, Serialize)]
pub struct Function<'a> {
    #[serde(rename = "type")]
    pub ty: FunctionType,
    #[serde(flatten)]
    pub span: Span,
    pub id: Option<&'a Identifier<'a>>,
    pub params: NodeList<'a, Pattern<'a>>,
    pub body: &'a BlockStatement<'a>,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub generator: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ArrowBody<'a> {
    Block(&'a BlockStatement<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ArrowFunctionExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub params: NodeList<'a, Pattern<'a>>,
    pub body: ArrowBody<'a>,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub expression: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateValue<'a> {
    pub raw: &'a str,
    /// `None` when a tagged template contains an invalid escape.
    pub cooked: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct TemplateElement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub value: TemplateValue<'a>,
    pub tail: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct TemplateLiteral<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub quasis: NodeList<'a, TemplateElement<'a>>,
    pub expressions: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct TaggedTemplateExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub tag: Expression<'a>,
    pub quasi: &'a TemplateLiteral<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemberType {
    MemberExpression,
    /// A member access inside an optional chain.
    OptionalMemberExpression,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberExpression<'a> {
    #[serde(rename = "type")]
    pub ty: MemberType,
    #[serde(flatten)]
    pub span: Span,
    pub object: Expression<'a>,
    /// An identifier, private identifier, or (when computed) any expression.
    pub property: Expression<'a>,
    pub computed: bool,
    /// Present only inside optional chains: whether this link is `?.`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl MemberExpression<'_> {
    pub fn is_optional_chain(&self) -> bool {
        self.ty == MemberType::OptionalMemberExpression
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CallType {
    CallExpression,
    /// A call inside an optional chain.
    OptionalCallExpression,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallExpression<'a> {
    #[serde(rename = "type")]
    pub ty: CallType,
    #[serde(flatten)]
    pub span: Span,
    pub callee: Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct NewExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub callee: Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct MetaProperty<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub meta: &'a Identifier<'a>,
    pub property: &'a Identifier<'a>,
}

/// Dynamic `import(source)`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ImportExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub source: Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct UpdateExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Pattern<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    LogicalNot,
    #[serde(rename = "~")]
    BitwiseNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct UnaryExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub operator: UnaryOperator,
    pub prefix: bool,
    pub argument: Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Equality,
    #[serde(rename = "!=")]
    Inequality,
    #[serde(rename = "===")]
    StrictEquality,
    #[serde(rename = "!==")]
    StrictInequality,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessEqualThan,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterEqualThan,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
    #[serde(rename = ">>>")]
    ShiftRightZeroFill,
    #[serde(rename = "+")]
    Addition,
    #[serde(rename = "-")]
    Subtraction,
    #[serde(rename = "*")]
    Multiplication,
    #[serde(rename = "/")]
    Division,
    #[serde(rename = "%")]
    Remainder,
    #[serde(rename = "**")]
    Exponential,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct BinaryExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub operator: BinaryOperator,
    /// May be a [`PrivateIdentifier`] when the operator is `in`.
    pub left: Expression<'a>,
    pub right: Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "??")]
    Coalesce,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct LogicalExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub operator: LogicalOperator,
    pub left: Expression<'a>,
    pub right: Expression<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ConditionalExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub test: Expression<'a>,
    pub consequent: Expression<'a>,
    pub alternate: Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    Addition,
    #[serde(rename = "-=")]
    Subtraction,
    #[serde(rename = "*=")]
    Multiplication,
    #[serde(rename = "/=")]
    Division,
    #[serde(rename = "%=")]
    Remainder,
    #[serde(rename = "**=")]
    Exponential,
    #[serde(rename = "<<=")]
    ShiftLeft,
    #[serde(rename = ">>=")]
    ShiftRight,
    #[serde(rename = ">>>=")]
    ShiftRightZeroFill,
    #[serde(rename = "|=")]
    BitwiseOr,
    #[serde(rename = "^=")]
    BitwiseXor,
    #[serde(rename = "&=")]
    BitwiseAnd,
    #[serde(rename = "||=")]
    LogicalOr,
    #[serde(rename = "&&=")]
    LogicalAnd,
    #[serde(rename = "??=")]
    LogicalNullish,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub operator: AssignmentOperator,
    pub left: Pattern<'a>,
    pub right: Expression<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct SequenceExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub expressions: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct YieldExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub argument: Option<Expression<'a>>,
    pub delegate: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct AwaitExpression<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub argument: Expression<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct SpreadElement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub argument: Expression<'a>,
}

/// A grouping `( expression )`.
///
/// Kept in the tree because parenthesization changes what is a valid
/// assignment target; it serializes as the inner expression.
#[derive(Debug, Clone)]
pub struct ParenthesizedExpression<'a> {
    pub span: Span,
    pub expression: Expression<'a>,
}

impl Serialize for ParenthesizedExpression<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.expression.serialize(serializer)
    }
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Pattern<'a> {
    Identifier(&'a Identifier<'a>),
    Object(&'a ObjectPattern<'a>),
    Array(&'a ArrayPattern<'a>),
    Rest(&'a RestElement<'a>),
    Assignment(&'a AssignmentPattern<'a>),
    /// Only valid in assignment (not binding) positions.
    Member(&'a MemberExpression<'a>),
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ObjectPatternMember<'a> {
    Property(&'a AssignmentProperty<'a>),
    Rest(&'a RestElement<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ObjectPattern<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub properties: NodeList<'a, ObjectPatternMember<'a>>,
}

/// A `Property` node inside an object pattern.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename = "Property")]
pub struct AssignmentProperty<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub key: Expression<'a>,
    pub value: Pattern<'a>,
    pub kind: PropertyKind,
    pub computed: bool,
    pub method: bool,
    pub shorthand: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ArrayPattern<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub elements: NodeList<'a, Option<Pattern<'a>>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct RestElement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub argument: Pattern<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentPattern<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub left: Pattern<'a>,
    pub right: Expression<'a>,
}

// ============================================================================
// Classes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassType {
    ClassDeclaration,
    ClassExpression,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class<'a> {
    #[serde(rename = "type")]
    pub ty: ClassType,
    #[serde(flatten)]
    pub span: Span,
    pub id: Option<&'a Identifier<'a>>,
    pub super_class: Option<Expression<'a>>,
    pub body: &'a ClassBody<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ClassBody<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub body: NodeList<'a, ClassElement<'a>>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ClassElement<'a> {
    Method(&'a MethodDefinition<'a>),
    Property(&'a PropertyDefinition<'a>),
    StaticBlock(&'a StaticBlock<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct MethodDefinition<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub key: Expression<'a>,
    pub value: &'a Function<'a>,
    pub kind: MethodKind,
    pub computed: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct PropertyDefinition<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub key: Expression<'a>,
    pub value: Option<Expression<'a>>,
    pub computed: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct StaticBlock<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub body: NodeList<'a, Statement<'a>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Statement<'a> {
    Expression(&'a ExpressionStatement<'a>),
    Block(&'a BlockStatement<'a>),
    Empty(&'a EmptyStatement),
    Debugger(&'a DebuggerStatement),
    With(&'a WithStatement<'a>),
    Return(&'a ReturnStatement<'a>),
    Labeled(&'a LabeledStatement<'a>),
    Break(&'a BreakStatement<'a>),
    Continue(&'a ContinueStatement<'a>),
    If(&'a IfStatement<'a>),
    Switch(&'a SwitchStatement<'a>),
    Throw(&'a ThrowStatement<'a>),
    Try(&'a TryStatement<'a>),
    While(&'a WhileStatement<'a>),
    DoWhile(&'a DoWhileStatement<'a>),
    For(&'a ForStatement<'a>),
    ForIn(&'a ForInStatement<'a>),
    ForOf(&'a ForOfStatement<'a>),
    FunctionDeclaration(&'a Function<'a>),
    VariableDeclaration(&'a VariableDeclaration<'a>),
    ClassDeclaration(&'a Class<'a>),
    Import(&'a ImportDeclaration<'a>),
    ExportNamed(&'a ExportNamedDeclaration<'a>),
    ExportDefault(&'a ExportDefaultDeclaration<'a>),
    ExportAll(&'a ExportAllDeclaration<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ExpressionStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub expression: Expression<'a>,
    /// Raw text of a directive-prologue string, when directives are requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct BlockStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub body: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct EmptyStatement {
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct DebuggerStatement {
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct WithStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub object: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ReturnStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub argument: Option<Expression<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct LabeledStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub label: &'a Identifier<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct BreakStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ContinueStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct IfStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub test: Expression<'a>,
    pub consequent: Statement<'a>,
    pub alternate: Option<Statement<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct SwitchStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub discriminant: Expression<'a>,
    pub cases: NodeList<'a, SwitchCase<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct SwitchCase<'a> {
    #[serde(flatten)]
    pub span: Span,
    /// `None` for the `default` clause.
    pub test: Option<Expression<'a>>,
    pub consequent: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ThrowStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub argument: Expression<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct TryStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub block: &'a BlockStatement<'a>,
    pub handler: Option<&'a CatchClause<'a>>,
    pub finalizer: Option<&'a BlockStatement<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct CatchClause<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub param: Option<Pattern<'a>>,
    pub body: &'a BlockStatement<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct WhileStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub test: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct DoWhileStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub body: Statement<'a>,
    pub test: Expression<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ForInit<'a> {
    VariableDeclaration(&'a VariableDeclaration<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ForStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub init: Option<ForInit<'a>>,
    pub test: Option<Expression<'a>>,
    pub update: Option<Expression<'a>>,
    pub body: Statement<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ForLeft<'a> {
    VariableDeclaration(&'a VariableDeclaration<'a>),
    Pattern(Pattern<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ForInStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub left: ForLeft<'a>,
    pub right: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ForOfStatement<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub left: ForLeft<'a>,
    pub right: Expression<'a>,
    pub body: Statement<'a>,
    #[serde(rename = "await")]
    pub is_await: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclaration<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub declarations: NodeList<'a, VariableDeclarator<'a>>,
    pub kind: VariableKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub id: Pattern<'a>,
    pub init: Option<Expression<'a>>,
}

// ============================================================================
// Modules
// ============================================================================

/// An export or import name: an identifier or a string literal.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ModuleExportName<'a> {
    Identifier(&'a Identifier<'a>),
    Literal(&'a Literal<'a>),
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ImportDeclarationSpecifier<'a> {
    Named(&'a ImportSpecifier<'a>),
    Default(&'a ImportDefaultSpecifier<'a>),
    Namespace(&'a ImportNamespaceSpecifier<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ImportDeclaration<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub specifiers: NodeList<'a, ImportDeclarationSpecifier<'a>>,
    pub source: &'a Literal<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ImportSpecifier<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub local: &'a Identifier<'a>,
    pub imported: ModuleExportName<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ImportDefaultSpecifier<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub local: &'a Identifier<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ImportNamespaceSpecifier<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub local: &'a Identifier<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ExportNamedDeclaration<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub declaration: Option<Statement<'a>>,
    pub specifiers: NodeList<'a, ExportSpecifier<'a>>,
    pub source: Option<&'a Literal<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ExportSpecifier<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub local: ModuleExportName<'a>,
    pub exported: ModuleExportName<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ExportDefaultKind<'a> {
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ExportDefaultDeclaration<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub declaration: ExportDefaultKind<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub struct ExportAllDeclaration<'a> {
    #[serde(flatten)]
    pub span: Span,
    pub exported: Option<ModuleExportName<'a>>,
    pub source: &'a Literal<'a>,
}

// ============================================================================
// Accessors
// ============================================================================

impl<'a> Expression<'a> {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(n) => n.span,
            Expression::PrivateIdentifier(n) => n.span,
            Expression::Literal(n) => n.span,
            Expression::This(n) => n.span,
            Expression::Super(n) => n.span,
            Expression::Array(n) => n.span,
            Expression::Object(n) => n.span,
            Expression::Function(n) => n.span,
            Expression::ArrowFunction(n) => n.span,
            Expression::Class(n) => n.span,
            Expression::TemplateLiteral(n) => n.span,
            Expression::TaggedTemplate(n) => n.span,
            Expression::Member(n) => n.span,
            Expression::Call(n) => n.span,
            Expression::New(n) => n.span,
            Expression::MetaProperty(n) => n.span,
            Expression::Import(n) => n.span,
            Expression::Update(n) => n.span,
            Expression::Unary(n) => n.span,
            Expression::Binary(n) => n.span,
            Expression::Logical(n) => n.span,
            Expression::Conditional(n) => n.span,
            Expression::Assignment(n) => n.span,
            Expression::Sequence(n) => n.span,
            Expression::Yield(n) => n.span,
            Expression::Await(n) => n.span,
            Expression::Spread(n) => n.span,
            Expression::Parenthesized(n) => n.span,
        }
    }

    /// Strip any number of grouping parentheses.
    pub fn without_parens(self) -> Expression<'a> {
        let mut expr = self;
        while let Expression::Parenthesized(p) = expr {
            expr = p.expression;
        }
        expr
    }

    pub fn is_parenthesized(&self) -> bool {
        matches!(self, Expression::Parenthesized(_))
    }

    /// Whether this is a member or call expression that belongs to an optional chain.
    pub fn is_optional_chain(&self) -> bool {
        match self {
            Expression::Member(m) => m.is_optional_chain(),
            Expression::Call(c) => c.ty == CallType::OptionalCallExpression,
            _ => false,
        }
    }
}

impl Pattern<'_> {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(n) => n.span,
            Pattern::Object(n) => n.span,
            Pattern::Array(n) => n.span,
            Pattern::Rest(n) => n.span,
            Pattern::Assignment(n) => n.span,
            Pattern::Member(n) => n.span,
        }
    }
}

impl Statement<'_> {
    pub fn span(&self) -> Span {
        match self {
            Statement::Expression(n) => n.span,
            Statement::Block(n) => n.span,
            Statement::Empty(n) => n.span,
            Statement::Debugger(n) => n.span,
            Statement::With(n) => n.span,
            Statement::Return(n) => n.span,
            Statement::Labeled(n) => n.span,
            Statement::Break(n) => n.span,
            Statement::Continue(n) => n.span,
            Statement::If(n) => n.span,
            Statement::Switch(n) => n.span,
            Statement::Throw(n) => n.span,
            Statement::Try(n) => n.span,
            Statement::While(n) => n.span,
            Statement::DoWhile(n) => n.span,
            Statement::For(n) => n.span,
            Statement::ForIn(n) => n.span,
            Statement::ForOf(n) => n.span,
            Statement::FunctionDeclaration(n) => n.span,
            Statement::VariableDeclaration(n) => n.span,
            Statement::ClassDeclaration(n) => n.span,
            Statement::Import(n) => n.span,
            Statement::ExportNamed(n) => n.span,
            Statement::ExportDefault(n) => n.span,
            Statement::ExportAll(n) => n.span,
        }
    }
}

impl<'a> ModuleExportName<'a> {
    /// The exported or imported name as written (string literals unquoted).
    pub fn name(&self) -> &'a str {
        match self {
            ModuleExportName::Identifier(id) => id.name,
            ModuleExportName::Literal(lit) => match lit.value {
                LiteralValue::String(s) => s,
                _ => "",
            },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ModuleExportName::Identifier(id) => id.span,
            ModuleExportName::Literal(lit) => lit.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{Position, SourceLocation};
    use serde_json::json;

    #[test]
    fn test_identifier_shape() {
        let id = Identifier {
            span: Span::new(0, 1),
            name: "a",
        };
        assert_eq!(
            serde_json::to_value(&id).unwrap(),
            json!({"type": "Identifier", "name": "a"})
        );
    }

    #[test]
    fn test_span_fields_follow_flags() {
        let mut span = Span::new(2, 5);
        span.ranges = true;
        span.loc = Some(SourceLocation {
            start: Position { line: 1, column: 2 },
            end: Position { line: 1, column: 5 },
        });
        let node = ThisExpression { span };
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "ThisExpression",
                "start": 2,
                "end": 5,
                "loc": {"start": {"line": 1, "column": 2}, "end": {"line": 1, "column": 5}}
            })
        );
    }

    #[test]
    fn test_literal_values() {
        let lit = |value| Literal {
            span: Span::new(0, 0),
            value,
            raw: None,
            regex: None,
            bigint: None,
        };
        assert_eq!(serde_json::to_value(lit(LiteralValue::Number(1.0))).unwrap()["value"], json!(1));
        assert_eq!(serde_json::to_value(lit(LiteralValue::Number(1.5))).unwrap()["value"], json!(1.5));
        assert_eq!(serde_json::to_value(lit(LiteralValue::Null)).unwrap()["value"], json!(null));
        assert_eq!(
            serde_json::to_value(lit(LiteralValue::String("s"))).unwrap()["value"],
            json!("s")
        );
    }

    #[test]
    fn test_parenthesized_is_transparent() {
        let id = Identifier {
            span: Span::new(1, 2),
            name: "x",
        };
        let paren = ParenthesizedExpression {
            span: Span::new(1, 2),
            expression: Expression::Identifier(&id),
        };
        let expr = Expression::Parenthesized(&paren);
        assert_eq!(
            serde_json::to_value(expr).unwrap(),
            json!({"type": "Identifier", "name": "x"})
        );
        assert!(matches!(expr.without_parens(), Expression::Identifier(_)));
    }
}
