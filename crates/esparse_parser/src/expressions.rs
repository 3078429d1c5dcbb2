//! Expressions.
//!
//! Binary operators use precedence climbing over the table in
//! [`crate::precedence`]. Object and array literals, parenthesized lists
//! and `async (...)` calls are parsed as covers: they may still turn into
//! assignment patterns or arrow parameters once the next token is seen.

use std::borrow::Cow;

use esparse_ast::*;
use esparse_diagnostics::{messages, ParseError, ParseResult};

use crate::context::Context;
use crate::functions::{FunctionKind, MethodKind};
use crate::parser::Parser;
use crate::patterns::PatternMode;
use crate::precedence::{
    assignment_operator, get_binary_operator_precedence, infix_operator, InfixOperator, OperatorPrecedence,
};
use crate::utilities::can_start_expression;

impl<'a> Parser<'a> {
    // ========================================================================
    // Comma and assignment expressions
    // ========================================================================

    /// Expression: one or more AssignmentExpressions separated by commas.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let first = self.parse_assignment_expression()?;
        if self.current_token() != TokenKind::CommaToken {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(TokenKind::CommaToken)? {
            expressions.push(self.parse_assignment_expression()?);
        }
        Ok(Expression::Sequence(self.alloc(SequenceExpression {
            span: self.span(start),
            expressions: self.alloc_slice(expressions),
        })))
    }

    /// AssignmentExpression in a position where it can only be an
    /// expression: pending cover errors become real errors.
    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<Expression<'a>> {
        let outer = self.cover_error.take();
        let expr = self.parse_assignment_expression_or_cover()?;
        if let Some(error) = self.cover_error.take() {
            return Err(error);
        }
        self.cover_error = outer;
        Ok(expr)
    }

    /// AssignmentExpression that may still become part of a pattern. An
    /// unparenthesized object or array literal keeps its pending cover
    /// error for the caller to decide on.
    pub(crate) fn parse_assignment_expression_or_cover(&mut self) -> ParseResult<Expression<'a>> {
        self.with_nesting(|p| p.parse_assignment_expression_inner())
    }

    fn parse_assignment_expression_inner(&mut self) -> ParseResult<Expression<'a>> {
        if self.context.contains(Context::IN_GENERATOR) && self.is_contextual("yield") {
            return self.parse_yield_expression();
        }

        let outer = self.cover_error.take();
        let start = self.token_pos();
        self.assign_expr_start = start;
        let left = self.parse_conditional_expression()?;

        let Some(operator) = assignment_operator(self.current_token()) else {
            if self.cover_error.is_some() && !matches!(left, Expression::Array(_) | Expression::Object(_)) {
                return Err(self.take_cover_error());
            }
            self.cover_error = outer.or(self.cover_error.take());
            return Ok(left);
        };

        let target = if operator == AssignmentOperator::Assign {
            if matches!(left, Expression::Array(_) | Expression::Object(_)) {
                self.cover_error = None;
            } else if self.cover_error.is_some() {
                return Err(self.take_cover_error());
            }
            self.to_pattern(left, PatternMode::Assignment)?
        } else {
            if self.cover_error.is_some() {
                return Err(self.take_cover_error());
            }
            self.to_simple_target(left, None)?
        };
        self.next_token()?;
        let right = self.parse_assignment_expression()?;
        self.cover_error = outer;
        Ok(Expression::Assignment(self.alloc(AssignmentExpression {
            span: self.span(start),
            operator,
            left: target,
            right,
        })))
    }

    fn take_cover_error(&mut self) -> ParseError {
        match self.cover_error.take() {
            Some(error) => error,
            None => self.unexpected(),
        }
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let test = self.parse_binary_expression(OperatorPrecedence::Lowest)?;
        if matches!(test, Expression::ArrowFunction(_)) || self.current_token() != TokenKind::QuestionToken {
            return Ok(test);
        }
        self.next_token()?;
        let consequent = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_assignment_expression())?;
        self.expect(TokenKind::ColonToken)?;
        let alternate = self.parse_assignment_expression()?;
        Ok(Expression::Conditional(self.alloc(ConditionalExpression {
            span: self.span(start),
            test,
            consequent,
            alternate,
        })))
    }

    // ========================================================================
    // Binary expressions
    // ========================================================================

    /// Parse operators binding tighter than `min`.
    fn parse_binary_expression(&mut self, min: OperatorPrecedence) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let mut left = if self.current_token() == TokenKind::PrivateName {
            self.parse_private_in_operand(min)?
        } else {
            self.parse_unary_expression()?
        };
        if matches!(left, Expression::ArrowFunction(_)) {
            return Ok(left);
        }

        loop {
            let kind = self.current_token();
            if kind == TokenKind::InKeyword && self.context.contains(Context::DISALLOW_IN) {
                break;
            }
            let precedence = get_binary_operator_precedence(kind);
            if precedence == OperatorPrecedence::Invalid || precedence <= min {
                break;
            }
            let Some(operator) = infix_operator(kind) else { break };
            if kind == TokenKind::AsteriskAsteriskToken && matches!(left, Expression::Unary(_) | Expression::Await(_)) {
                return Err(self.error_at(&messages::UNARY_BEFORE_EXPONENT, &[], left.span()));
            }
            self.next_token()?;

            let right_min = if precedence.is_right_associative() {
                OperatorPrecedence::Multiplicative
            } else {
                precedence
            };
            let right = self.with_nesting(|p| p.parse_binary_expression(right_min))?;

            left = match operator {
                InfixOperator::Binary(operator) => Expression::Binary(self.alloc(BinaryExpression {
                    span: self.span(start),
                    operator,
                    left,
                    right,
                })),
                InfixOperator::Logical(operator) => {
                    self.check_nullish_mixing(operator, left, right)?;
                    Expression::Logical(self.alloc(LogicalExpression {
                        span: self.span(start),
                        operator,
                        left,
                        right,
                    }))
                }
            };
        }
        Ok(left)
    }

    /// `??` cannot be combined with `||` or `&&` without parentheses.
    fn check_nullish_mixing(
        &self,
        operator: LogicalOperator,
        left: Expression<'a>,
        right: Expression<'a>,
    ) -> ParseResult<()> {
        let conflicts = |expr: Expression<'a>| match expr {
            Expression::Logical(logical) => {
                (operator == LogicalOperator::Coalesce) != (logical.operator == LogicalOperator::Coalesce)
            }
            _ => false,
        };
        if conflicts(left) || conflicts(right) {
            return Err(self.error_at(&messages::NULLISH_MIXED_WITH_LOGICAL, &[], self.span(left.span().start)));
        }
        Ok(())
    }

    /// The `#x` of `#x in obj`.
    fn parse_private_in_operand(&mut self, min: OperatorPrecedence) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let name = self.alloc_str(self.scanner.token_value());
        self.next_token()?;
        let span = self.span(start);
        let in_allowed = !self.context.contains(Context::DISALLOW_IN) && min < OperatorPrecedence::Relational;
        if self.current_token() != TokenKind::InKeyword || !in_allowed {
            return Err(self.error_at(&messages::UNEXPECTED_PRIVATE_NAME, &[name], span));
        }
        self.use_private_name(name, span)?;
        Ok(Expression::PrivateIdentifier(self.alloc(PrivateIdentifier { span, name })))
    }

    // ========================================================================
    // Unary, update, await and yield
    // ========================================================================

    /// Operands of prefix operators, `await` and update expressions nest here.
    fn parse_unary_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.with_nesting(|p| p.parse_unary_expression_inner())
    }

    fn parse_unary_expression_inner(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let operator = match self.current_token() {
            TokenKind::ExclamationToken => Some(UnaryOperator::LogicalNot),
            TokenKind::TildeToken => Some(UnaryOperator::BitwiseNot),
            TokenKind::PlusToken => Some(UnaryOperator::Plus),
            TokenKind::MinusToken => Some(UnaryOperator::Minus),
            TokenKind::TypeOfKeyword => Some(UnaryOperator::Typeof),
            TokenKind::VoidKeyword => Some(UnaryOperator::Void),
            TokenKind::DeleteKeyword => Some(UnaryOperator::Delete),
            _ => None,
        };

        if let Some(operator) = operator {
            self.next_token()?;
            let argument = self.parse_unary_expression()?;
            if operator == UnaryOperator::Delete {
                self.check_delete_operand(argument)?;
            }
            return Ok(Expression::Unary(self.alloc(UnaryExpression {
                span: self.span(start),
                operator,
                prefix: true,
                argument,
            })));
        }

        match self.current_token() {
            TokenKind::PlusPlusToken | TokenKind::MinusMinusToken => {
                let operator = if self.current_token() == TokenKind::PlusPlusToken {
                    UpdateOperator::Increment
                } else {
                    UpdateOperator::Decrement
                };
                self.next_token()?;
                let argument = self.parse_unary_expression()?;
                let argument = self.to_simple_target(argument, Some("prefix"))?;
                Ok(Expression::Update(self.alloc(UpdateExpression {
                    span: self.span(start),
                    operator,
                    prefix: true,
                    argument,
                })))
            }
            TokenKind::Identifier if self.context.contains(Context::IN_ASYNC) && self.is_contextual("await") => {
                self.parse_await_expression()
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn check_delete_operand(&self, argument: Expression<'a>) -> ParseResult<()> {
        match argument.without_parens() {
            Expression::Identifier(id) if self.context.is_strict() => {
                Err(self.error_at(&messages::STRICT_DELETE, &[], id.span))
            }
            Expression::Member(member) if matches!(member.property, Expression::PrivateIdentifier(_)) => {
                Err(self.error_at(&messages::DELETE_PRIVATE_FIELD, &[], member.span))
            }
            _ => Ok(()),
        }
    }

    fn parse_postfix_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let expr = self.parse_left_hand_side_expression()?;
        if matches!(expr, Expression::ArrowFunction(_)) || self.has_preceding_line_break() {
            return Ok(expr);
        }
        let operator = match self.current_token() {
            TokenKind::PlusPlusToken => UpdateOperator::Increment,
            TokenKind::MinusMinusToken => UpdateOperator::Decrement,
            _ => return Ok(expr),
        };
        let argument = self.to_simple_target(expr, Some("postfix"))?;
        self.next_token()?;
        Ok(Expression::Update(self.alloc(UpdateExpression {
            span: self.span(start),
            operator,
            prefix: false,
            argument,
        })))
    }

    fn parse_await_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        if self.context.contains(Context::IN_PARAMETERS) {
            return Err(self.error(&messages::AWAIT_IN_PARAMETERS, &[]));
        }
        self.cover.await_pos.get_or_insert(start);
        self.next_token()?;
        let argument = self.parse_unary_expression()?;
        Ok(Expression::Await(self.alloc(AwaitExpression { span: self.span(start), argument })))
    }

    fn parse_yield_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        if self.context.contains(Context::IN_PARAMETERS) {
            return Err(self.error(&messages::YIELD_IN_PARAMETERS, &[]));
        }
        self.cover.yield_pos.get_or_insert(start);
        self.next_token()?;

        let has_argument = !self.has_preceding_line_break()
            && (self.current_token() == TokenKind::AsteriskToken || can_start_expression(self.current_token()));
        let (argument, delegate) = if has_argument {
            let delegate = self.eat(TokenKind::AsteriskToken)?;
            (Some(self.parse_assignment_expression()?), delegate)
        } else {
            (None, false)
        };
        Ok(Expression::Yield(self.alloc(YieldExpression {
            span: self.span(start),
            argument,
            delegate,
        })))
    }

    // ========================================================================
    // Left-hand side expressions
    // ========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let expr = match self.current_token() {
            TokenKind::NewKeyword => self.parse_new_expression()?,
            TokenKind::SuperKeyword => self.parse_super(false)?,
            TokenKind::ImportKeyword => self.parse_import_meta_or_call()?,
            _ => self.parse_primary_expression()?,
        };
        if matches!(expr, Expression::ArrowFunction(_)) {
            return Ok(expr);
        }
        self.parse_subscripts(start, expr, false)
    }

    fn parse_super(&mut self, in_new: bool) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        let span = self.span(start);
        match self.current_token() {
            TokenKind::OpenParenToken if !in_new => {
                if !self.context.contains(Context::ALLOW_SUPER_CALL) {
                    return Err(self.error_at(&messages::SUPER_CALL_NOT_ALLOWED, &[], span));
                }
            }
            TokenKind::DotToken | TokenKind::OpenBracketToken => {
                if !self.context.contains(Context::ALLOW_SUPER_PROPERTY) {
                    return Err(self.error_at(&messages::SUPER_PROPERTY_NOT_ALLOWED, &[], span));
                }
                if self.peek_token() == TokenKind::PrivateName {
                    return Err(self.error_at(&messages::SUPER_PROPERTY_NOT_ALLOWED, &[], span));
                }
            }
            _ => return Err(self.error_at(&messages::SUPER_PROPERTY_NOT_ALLOWED, &[], span)),
        }
        Ok(Expression::Super(self.alloc(Super { span })))
    }

    /// `import(source)` or `import.meta`. The current token is `import`.
    fn parse_import_meta_or_call(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        match self.current_token() {
            TokenKind::OpenParenToken => {
                self.next_token()?;
                let source =
                    self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_assignment_expression())?;
                if self.current_token() == TokenKind::CommaToken {
                    return Err(self.error(&messages::INVALID_IMPORT_CALL, &[]));
                }
                self.expect(TokenKind::CloseParenToken)?;
                Ok(Expression::Import(self.alloc(ImportExpression { span: self.span(start), source })))
            }
            TokenKind::DotToken => {
                let meta = self.alloc(Identifier { span: self.span(start), name: "import" });
                self.next_token()?;
                if !self.is_contextual("meta") {
                    return Err(self.unexpected());
                }
                if !self.context.contains(Context::MODULE) {
                    return Err(self.error_at(&messages::IMPORT_META_OUTSIDE_MODULE, &[], self.make_span(start, self.token_end())));
                }
                self.require_next("import.meta")?;
                let property = self.parse_identifier_name()?;
                Ok(Expression::MetaProperty(self.alloc(MetaProperty {
                    span: self.span(start),
                    meta,
                    property,
                })))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_new_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        self.next_token()?;

        if self.current_token() == TokenKind::DotToken {
            let meta = self.alloc(Identifier { span: self.span(start), name: "new" });
            self.next_token()?;
            if !self.is_contextual("target") {
                return Err(self.unexpected());
            }
            if !self.context.contains(Context::ALLOW_NEW_TARGET) {
                return Err(self.error_at(&messages::NEW_TARGET_NOT_ALLOWED, &[], self.make_span(start, self.token_end())));
            }
            let property = self.parse_identifier_name()?;
            return Ok(Expression::MetaProperty(self.alloc(MetaProperty {
                span: self.span(start),
                meta,
                property,
            })));
        }

        let callee_start = self.token_pos();
        let callee = self.with_nesting(|p| match p.current_token() {
            TokenKind::NewKeyword => p.parse_new_expression(),
            TokenKind::SuperKeyword => p.parse_super(true),
            TokenKind::ImportKeyword => Err(p.unexpected()),
            _ => p.parse_primary_expression(),
        })?;
        let callee = self.parse_subscripts(callee_start, callee, true)?;

        let arguments = if self.current_token() == TokenKind::OpenParenToken {
            self.parse_arguments()?
        } else {
            &[]
        };
        Ok(Expression::New(self.alloc(NewExpression {
            span: self.span(start),
            callee,
            arguments,
        })))
    }

    /// Member accesses, calls and tagged templates following `expr`. With
    /// `no_call`, stop before a call (the callee of `new`).
    fn parse_subscripts(&mut self, start: u32, mut expr: Expression<'a>, no_call: bool) -> ParseResult<Expression<'a>> {
        // Once a `?.` appears, every later link belongs to the chain.
        let mut in_chain = false;
        loop {
            expr = match self.current_token() {
                TokenKind::QuestionDotToken => {
                    if no_call {
                        return Err(self.error(&messages::OPTIONAL_CHAIN_NEW, &[]));
                    }
                    self.require_next("Optional chaining")?;
                    self.next_token()?;
                    in_chain = true;
                    match self.current_token() {
                        TokenKind::OpenParenToken => {
                            let arguments = self.parse_arguments()?;
                            self.make_call(start, expr, arguments, Some(true))
                        }
                        TokenKind::OpenBracketToken => self.parse_computed_member(start, expr, Some(true))?,
                        TokenKind::NoSubstitutionTemplateLiteral | TokenKind::TemplateHead => {
                            return Err(self.error(&messages::OPTIONAL_CHAIN_TEMPLATE, &[]));
                        }
                        _ => self.parse_member_name(start, expr, Some(true))?,
                    }
                }
                TokenKind::DotToken => {
                    self.next_token()?;
                    self.parse_member_name(start, expr, in_chain.then_some(false))?
                }
                TokenKind::OpenBracketToken => self.parse_computed_member(start, expr, in_chain.then_some(false))?,
                TokenKind::OpenParenToken if !no_call => {
                    let arguments = self.parse_arguments()?;
                    self.make_call(start, expr, arguments, in_chain.then_some(false))
                }
                TokenKind::NoSubstitutionTemplateLiteral | TokenKind::TemplateHead => {
                    if in_chain {
                        return Err(self.error(&messages::OPTIONAL_CHAIN_TEMPLATE, &[]));
                    }
                    let quasi = self.parse_template_literal(true)?;
                    Expression::TaggedTemplate(self.alloc(TaggedTemplateExpression {
                        span: self.span(start),
                        tag: expr,
                        quasi,
                    }))
                }
                _ => break,
            };
        }
        Ok(expr)
    }

    /// `.name` or `.#name`, after the dot.
    fn parse_member_name(&mut self, start: u32, object: Expression<'a>, optional: Option<bool>) -> ParseResult<Expression<'a>> {
        let property = if self.current_token() == TokenKind::PrivateName {
            let name_start = self.token_pos();
            let name = self.alloc_str(self.scanner.token_value());
            self.next_token()?;
            let span = self.span(name_start);
            self.use_private_name(name, span)?;
            Expression::PrivateIdentifier(self.alloc(PrivateIdentifier { span, name }))
        } else {
            Expression::Identifier(self.parse_identifier_name()?)
        };
        Ok(self.make_member(start, object, property, false, optional))
    }

    /// `[expression]`. The current token is `[`.
    fn parse_computed_member(&mut self, start: u32, object: Expression<'a>, optional: Option<bool>) -> ParseResult<Expression<'a>> {
        self.next_token()?;
        let property = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_expression())?;
        self.expect(TokenKind::CloseBracketToken)?;
        Ok(self.make_member(start, object, property, true, optional))
    }

    fn make_member(
        &self,
        start: u32,
        object: Expression<'a>,
        property: Expression<'a>,
        computed: bool,
        optional: Option<bool>,
    ) -> Expression<'a> {
        let ty = if optional.is_some() { MemberType::OptionalMemberExpression } else { MemberType::MemberExpression };
        Expression::Member(self.alloc(MemberExpression {
            ty,
            span: self.span(start),
            object,
            property,
            computed,
            optional,
        }))
    }

    fn make_call(
        &self,
        start: u32,
        callee: Expression<'a>,
        arguments: &'a [Expression<'a>],
        optional: Option<bool>,
    ) -> Expression<'a> {
        let ty = if optional.is_some() { CallType::OptionalCallExpression } else { CallType::CallExpression };
        Expression::Call(self.alloc(CallExpression {
            ty,
            span: self.span(start),
            callee,
            arguments,
            optional,
        }))
    }

    /// `( arguments )`.
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<&'a [Expression<'a>]> {
        self.expect(TokenKind::OpenParenToken)?;
        let arguments = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| {
            let mut arguments = Vec::new();
            while p.current_token() != TokenKind::CloseParenToken {
                if p.current_token() == TokenKind::DotDotDotToken {
                    arguments.push(Expression::Spread(p.parse_spread_element(false)?));
                } else {
                    arguments.push(p.parse_assignment_expression()?);
                }
                if !p.eat(TokenKind::CommaToken)? {
                    break;
                }
            }
            Ok(arguments)
        })?;
        self.expect(TokenKind::CloseParenToken)?;
        Ok(self.alloc_slice(arguments))
    }

    /// `...expr`. In a cover position the argument may still become a
    /// rest pattern.
    fn parse_spread_element(&mut self, cover: bool) -> ParseResult<&'a SpreadElement<'a>> {
        let start = self.token_pos();
        self.expect(TokenKind::DotDotDotToken)?;
        let argument = if cover {
            self.parse_assignment_expression_or_cover()?
        } else {
            self.parse_assignment_expression()?
        };
        Ok(self.alloc(SpreadElement { span: self.span(start), argument }))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        match self.current_token() {
            TokenKind::ThisKeyword => {
                self.next_token()?;
                Ok(Expression::This(self.alloc(ThisExpression { span: self.span(start) })))
            }
            TokenKind::Identifier => self.parse_identifier_or_arrow(),
            TokenKind::NullKeyword
            | TokenKind::TrueKeyword
            | TokenKind::FalseKeyword
            | TokenKind::NumericLiteral
            | TokenKind::BigIntLiteral
            | TokenKind::StringLiteral => Ok(Expression::Literal(self.parse_literal()?)),
            TokenKind::SlashToken | TokenKind::SlashEqualsToken => Ok(Expression::Literal(self.parse_regex_literal()?)),
            TokenKind::OpenBracketToken => self.parse_array_literal(),
            TokenKind::OpenBraceToken => self.parse_object_literal(),
            TokenKind::OpenParenToken => self.parse_parenthesized_or_arrow(),
            TokenKind::FunctionKeyword => {
                Ok(Expression::Function(self.parse_function(start, false, FunctionKind::Expression)?))
            }
            TokenKind::ClassKeyword => Ok(Expression::Class(self.parse_class(start, ClassType::ClassExpression)?)),
            TokenKind::NoSubstitutionTemplateLiteral | TokenKind::TemplateHead => {
                Ok(Expression::TemplateLiteral(self.parse_template_literal(false)?))
            }
            TokenKind::PrivateName => {
                Err(self.error(&messages::UNEXPECTED_PRIVATE_NAME, &[self.scanner.token_value()]))
            }
            _ => Err(self.unexpected()),
        }
    }

    /// An identifier reference, or one of the arrow and async forms that
    /// begin with an identifier.
    fn parse_identifier_or_arrow(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let can_arrow = start == self.assign_expr_start;

        if self.is_contextual("async") {
            let (next, same_line) = self.peek_token_on_same_line();
            if same_line {
                match next {
                    TokenKind::FunctionKeyword => {
                        self.next_token()?;
                        let function = self.parse_function(start, true, FunctionKind::Expression)?;
                        return Ok(Expression::Function(function));
                    }
                    TokenKind::Identifier if can_arrow => {
                        self.next_token()?;
                        let param = self.parse_identifier_name()?;
                        if self.current_token() != TokenKind::EqualsGreaterThanToken {
                            return Err(self.unexpected());
                        }
                        return self.parse_arrow_function(start, vec![Pattern::Identifier(param)], true);
                    }
                    TokenKind::OpenParenToken => return self.parse_async_call_or_arrow(start, can_arrow),
                    _ => {}
                }
            }
        }

        let id = self.parse_identifier_reference()?;
        if can_arrow && self.current_token() == TokenKind::EqualsGreaterThanToken {
            return self.parse_arrow_function(start, vec![Pattern::Identifier(id)], false);
        }
        Ok(Expression::Identifier(id))
    }

    /// `async (...)`: a call to a function named `async`, or the
    /// parameters of an async arrow function.
    fn parse_async_call_or_arrow(&mut self, start: u32, can_arrow: bool) -> ParseResult<Expression<'a>> {
        let callee = self.parse_identifier_name()?;
        let outer_cover = self.take_cover_positions();
        let outer_error = self.cover_error.take();
        let (items, trailing_comma) = self.parse_cover_list()?;

        if can_arrow && self.current_token() == TokenKind::EqualsGreaterThanToken {
            let inner = std::mem::replace(&mut self.cover, outer_cover);
            self.cover_error = outer_error;
            return self.parse_arrow_from_cover(start, items, trailing_comma, true, inner);
        }

        self.take_parenthesized_targets(start);
        if self.cover_error.is_some() {
            return Err(self.take_cover_error());
        }
        self.cover_error = outer_error;
        self.merge_cover_positions(outer_cover);
        let arguments = self.alloc_slice(items);
        Ok(self.make_call(start, Expression::Identifier(callee), arguments, None))
    }

    /// `( ... )`: a parenthesized expression or arrow parameters.
    fn parse_parenthesized_or_arrow(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        let can_arrow = start == self.assign_expr_start;
        let outer_cover = self.take_cover_positions();
        let outer_error = self.cover_error.take();
        let (items, trailing_comma) = self.parse_cover_list()?;

        if can_arrow && self.current_token() == TokenKind::EqualsGreaterThanToken {
            let inner = std::mem::replace(&mut self.cover, outer_cover);
            self.cover_error = outer_error;
            return self.parse_arrow_from_cover(start, items, trailing_comma, false, inner);
        }

        self.take_parenthesized_targets(start);
        if self.cover_error.is_some() {
            return Err(self.take_cover_error());
        }
        self.cover_error = outer_error;
        self.merge_cover_positions(outer_cover);

        let span = self.span(start);
        if let Some(pos) = trailing_comma {
            return Err(self.error_at_offset(&messages::UNEXPECTED_TOKEN, pos, 1));
        }
        if let Some(Expression::Spread(spread)) = items.iter().find(|item| matches!(item, Expression::Spread(_))) {
            return Err(self.error_at(&messages::UNEXPECTED_TOKEN, &["..."], spread.span));
        }
        let expression = match items.as_slice() {
            [] => return Err(self.error_at(&messages::UNEXPECTED_TOKEN, &[")"], span)),
            [single] => *single,
            [first, .., last] => Expression::Sequence(self.alloc(SequenceExpression {
                span: self.make_span(first.span().start, last.span().end),
                expressions: self.alloc_slice(items.clone()),
            })),
        };
        Ok(Expression::Parenthesized(self.alloc(ParenthesizedExpression { span, expression })))
    }

    /// A parenthesized, comma separated list of cover items. Returns the
    /// items and the position of a trailing comma, if any.
    fn parse_cover_list(&mut self) -> ParseResult<(Vec<Expression<'a>>, Option<u32>)> {
        self.expect(TokenKind::OpenParenToken)?;
        self.cover_list_depth += 1;
        let list = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| {
            let mut items = Vec::new();
            let mut trailing_comma = None;
            while p.current_token() != TokenKind::CloseParenToken {
                let item = if p.current_token() == TokenKind::DotDotDotToken {
                    Expression::Spread(p.parse_spread_element(true)?)
                } else {
                    p.parse_assignment_expression_or_cover()?
                };
                items.push(item);
                if p.current_token() == TokenKind::CloseParenToken {
                    break;
                }
                let comma = p.token_pos();
                p.expect(TokenKind::CommaToken)?;
                if p.current_token() == TokenKind::CloseParenToken {
                    trailing_comma = Some(comma);
                }
            }
            Ok((items, trailing_comma))
        });
        self.cover_list_depth -= 1;
        let list = list?;
        self.expect(TokenKind::CloseParenToken)?;
        Ok(list)
    }

    // ========================================================================
    // Literals
    // ========================================================================

    pub(crate) fn parse_literal(&mut self) -> ParseResult<&'a Literal<'a>> {
        let start = self.token_pos();
        let end = self.token_end();
        let flags = self.scanner.token_flags();
        let strict = self.context.is_strict();
        let (value, bigint) = match self.current_token() {
            TokenKind::NullKeyword => (LiteralValue::Null, None),
            TokenKind::TrueKeyword => (LiteralValue::Boolean(true), None),
            TokenKind::FalseKeyword => (LiteralValue::Boolean(false), None),
            TokenKind::NumericLiteral => {
                if strict && flags.intersects(TokenFlags::LEGACY_OCTAL_LIKE) {
                    return Err(self.error(&messages::STRICT_OCTAL_LITERAL, &[]));
                }
                (LiteralValue::Number(self.scanner.token_number()), None)
            }
            TokenKind::BigIntLiteral => (LiteralValue::BigInt, Some(self.alloc_str(self.scanner.token_value()))),
            TokenKind::StringLiteral => {
                if strict && flags.contains(TokenFlags::OCTAL_ESCAPE) {
                    return Err(self.error(&messages::STRICT_OCTAL_ESCAPE, &[]));
                }
                (LiteralValue::String(self.alloc_str(self.scanner.token_value())), None)
            }
            _ => return Err(self.unexpected()),
        };
        self.next_token()?;
        Ok(self.alloc(Literal {
            span: self.span(start),
            value,
            raw: self.raw(start, end),
            regex: None,
            bigint,
        }))
    }

    /// The current `/` or `/=` starts a regular expression.
    fn parse_regex_literal(&mut self) -> ParseResult<&'a Literal<'a>> {
        let start = self.token_pos();
        if self.scanner.rescan_slash_token() == TokenKind::Unknown {
            return Err(self.scanner_error());
        }
        let regex = RegExpLiteral {
            pattern: self.scanner.regex_pattern(),
            flags: self.scanner.regex_flags(),
        };
        let end = self.token_end();
        self.next_token()?;
        Ok(self.alloc(Literal {
            span: self.span(start),
            value: LiteralValue::RegExp,
            raw: self.raw(start, end),
            regex: Some(regex),
            bigint: None,
        }))
    }

    /// A template literal. Tagged templates tolerate invalid escapes, whose
    /// chunks get no cooked value.
    pub(crate) fn parse_template_literal(&mut self, tagged: bool) -> ParseResult<&'a TemplateLiteral<'a>> {
        let start = self.token_pos();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let kind = self.current_token();
            let tail = matches!(kind, TokenKind::NoSubstitutionTemplateLiteral | TokenKind::TemplateTail);
            let closing_len = if tail { 1 } else { 2 };
            let cooked = if self.scanner.token_flags().contains(TokenFlags::INVALID_ESCAPE) {
                if !tagged {
                    return Err(match self.scanner.take_escape_error() {
                        Some(error) => error,
                        None => self.error(&messages::INVALID_TEMPLATE_ESCAPE, &[]),
                    });
                }
                None
            } else {
                Some(self.alloc_str(self.scanner.token_value()))
            };
            let raw = match self.scanner.template_raw() {
                Cow::Borrowed(raw) => raw,
                Cow::Owned(raw) => self.alloc_str(&raw),
            };
            quasis.push(TemplateElement {
                span: self.make_span(self.token_pos() + 1, self.token_end() - closing_len),
                value: TemplateValue { raw, cooked },
                tail,
            });
            self.next_token()?;
            if tail {
                break;
            }

            let expr = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_expression())?;
            expressions.push(expr);
            if self.current_token() != TokenKind::CloseBraceToken {
                return Err(self.unexpected());
            }
            if self.scanner.rescan_template_token() == TokenKind::Unknown {
                return Err(self.scanner_error());
            }
        }
        Ok(self.alloc(TemplateLiteral {
            span: self.span(start),
            quasis: self.alloc_slice(quasis),
            expressions: self.alloc_slice(expressions),
        }))
    }

    // ========================================================================
    // Array and object literals
    // ========================================================================

    fn parse_array_literal(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        self.expect(TokenKind::OpenBracketToken)?;
        let (elements, trailing_comma) = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| {
            let mut elements = Vec::new();
            let mut trailing_comma = None;
            loop {
                match p.current_token() {
                    TokenKind::CloseBracketToken => break,
                    TokenKind::CommaToken => {
                        p.next_token()?;
                        elements.push(None);
                        continue;
                    }
                    TokenKind::DotDotDotToken => elements.push(Some(Expression::Spread(p.parse_spread_element(true)?))),
                    _ => elements.push(Some(p.parse_assignment_expression_or_cover()?)),
                }
                if p.current_token() == TokenKind::CloseBracketToken {
                    break;
                }
                let comma = p.token_pos();
                p.expect(TokenKind::CommaToken)?;
                if p.current_token() == TokenKind::CloseBracketToken {
                    trailing_comma = Some(comma);
                }
            }
            Ok((elements, trailing_comma))
        })?;
        self.expect(TokenKind::CloseBracketToken)?;
        Ok(Expression::Array(self.alloc(ArrayExpression {
            span: self.span(start),
            elements: self.alloc_slice(elements),
            trailing_comma,
        })))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.token_pos();
        self.expect(TokenKind::OpenBraceToken)?;
        let (properties, trailing_comma) = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| {
            let mut properties = Vec::new();
            let mut trailing_comma = None;
            let mut has_proto = false;
            while p.current_token() != TokenKind::CloseBraceToken {
                properties.push(p.parse_object_member(&mut has_proto)?);
                if p.current_token() == TokenKind::CloseBraceToken {
                    break;
                }
                let comma = p.token_pos();
                p.expect(TokenKind::CommaToken)?;
                if p.current_token() == TokenKind::CloseBraceToken {
                    trailing_comma = Some(comma);
                }
            }
            Ok((properties, trailing_comma))
        })?;
        self.expect(TokenKind::CloseBraceToken)?;
        Ok(Expression::Object(self.alloc(ObjectExpression {
            span: self.span(start),
            properties: self.alloc_slice(properties),
            trailing_comma,
        })))
    }

    /// Whether the current modifier word (`async`, `get`, `set`, `static`)
    /// is followed by a property name, making it a modifier rather than the
    /// name itself.
    pub(crate) fn modifier_followed_by_name(&mut self, allow_star: bool, same_line: bool) -> bool {
        let (next, on_same_line) = self.peek_token_on_same_line();
        if same_line && !on_same_line {
            return false;
        }
        next.is_identifier_name()
            || matches!(
                next,
                TokenKind::StringLiteral
                    | TokenKind::NumericLiteral
                    | TokenKind::BigIntLiteral
                    | TokenKind::OpenBracketToken
                    | TokenKind::PrivateName
            )
            || (allow_star && next == TokenKind::AsteriskToken)
    }

    /// PropertyName: an identifier name, string, number or `[computed]`.
    /// Returns the key and whether it is computed.
    pub(crate) fn parse_property_key(&mut self) -> ParseResult<(Expression<'a>, bool)> {
        match self.current_token() {
            TokenKind::OpenBracketToken => {
                self.next_token()?;
                let key = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_assignment_expression())?;
                self.expect(TokenKind::CloseBracketToken)?;
                Ok((key, true))
            }
            TokenKind::StringLiteral | TokenKind::NumericLiteral | TokenKind::BigIntLiteral => {
                Ok((Expression::Literal(self.parse_literal()?), false))
            }
            kind if kind.is_identifier_name() => Ok((Expression::Identifier(self.parse_identifier_name()?), false)),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_object_member(&mut self, has_proto: &mut bool) -> ParseResult<ObjectMember<'a>> {
        let start = self.token_pos();
        if self.current_token() == TokenKind::DotDotDotToken {
            return Ok(ObjectMember::Spread(self.parse_spread_element(true)?));
        }

        let mut is_async = false;
        let mut generator = false;
        let mut kind = PropertyKind::Init;
        if self.is_contextual("async") && self.modifier_followed_by_name(true, true) {
            is_async = true;
            self.next_token()?;
        }
        if self.current_token() == TokenKind::AsteriskToken {
            generator = true;
            self.next_token()?;
        }
        if !is_async && !generator && (self.is_contextual("get") || self.is_contextual("set"))
            && self.modifier_followed_by_name(false, false)
        {
            kind = if self.is_contextual("get") { PropertyKind::Get } else { PropertyKind::Set };
            self.next_token()?;
        }

        let key_token = self.current_token();
        let (key, computed) = self.parse_property_key()?;

        if is_async || generator || kind != PropertyKind::Init || self.current_token() == TokenKind::OpenParenToken {
            if self.current_token() != TokenKind::OpenParenToken {
                return Err(self.unexpected());
            }
            let method_kind = match kind {
                PropertyKind::Get => MethodKind::Getter,
                PropertyKind::Set => MethodKind::Setter,
                PropertyKind::Init => MethodKind::Method,
            };
            let value = self.parse_method_function(is_async, generator, method_kind)?;
            return Ok(ObjectMember::Property(self.alloc(Property {
                span: self.span(start),
                key,
                value: Expression::Function(value),
                kind,
                computed,
                method: kind == PropertyKind::Init,
                shorthand: false,
            })));
        }

        if self.eat(TokenKind::ColonToken)? {
            let value = self.parse_assignment_expression_or_cover()?;
            let span = self.span(start);
            if !computed && is_proto_key(key) {
                if *has_proto {
                    let error = self.error_at(&messages::DUPLICATE_PROTO, &[], span);
                    self.cover_error.get_or_insert(error);
                }
                *has_proto = true;
            }
            return Ok(ObjectMember::Property(self.alloc(Property {
                span,
                key,
                value,
                kind,
                computed,
                method: false,
                shorthand: false,
            })));
        }

        // Shorthand `{ a }`, or `{ a = 1 }` which is only valid as a pattern.
        let id = match key {
            Expression::Identifier(id) if key_token == TokenKind::Identifier => id,
            _ => return Err(self.unexpected()),
        };
        self.check_identifier_reference(id)?;
        let value = if self.current_token() == TokenKind::EqualsToken {
            let error = self.error(&messages::INVALID_SHORTHAND_INITIALIZER, &[]);
            self.cover_error.get_or_insert(error);
            self.next_token()?;
            let right = self.parse_assignment_expression()?;
            Expression::Assignment(self.alloc(AssignmentExpression {
                span: self.span(start),
                operator: AssignmentOperator::Assign,
                left: Pattern::Identifier(id),
                right,
            }))
        } else {
            Expression::Identifier(id)
        };
        Ok(ObjectMember::Property(self.alloc(Property {
            span: self.span(start),
            key,
            value,
            kind,
            computed: false,
            method: false,
            shorthand: true,
        })))
    }
}

/// `__proto__` written as an identifier or string key.
fn is_proto_key(key: Expression<'_>) -> bool {
    match key {
        Expression::Identifier(id) => id.name == "__proto__",
        Expression::Literal(lit) => matches!(lit.value, LiteralValue::String("__proto__")),
        _ => false,
    }
}
