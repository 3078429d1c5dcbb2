//! Binding patterns, and reinterpretation of expressions as patterns.
//!
//! Declarations, parameters and catch clauses parse their patterns
//! directly. Assignment targets and arrow parameters are first parsed as
//! expressions (the cover grammar) and converted here once the following
//! `=` or `=>` shows what they were.

use esparse_ast::*;
use esparse_diagnostics::{messages, ParseResult};

use crate::context::Context;
use crate::parser::Parser;
use crate::utilities::{classify_identifier, IdentifierClass};

/// What a converted pattern may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternMode {
    /// Destructuring assignment: member expressions and parenthesized
    /// simple targets are allowed.
    Assignment,
    /// Arrow parameters: identifiers only.
    Binding,
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Binding patterns
    // ========================================================================

    /// BindingIdentifier, ObjectBindingPattern or ArrayBindingPattern.
    pub(crate) fn parse_binding_target(&mut self) -> ParseResult<Pattern<'a>> {
        match self.current_token() {
            TokenKind::OpenBracketToken => self.with_nesting(|p| p.parse_array_binding_pattern()),
            TokenKind::OpenBraceToken => self.with_nesting(|p| p.parse_object_binding_pattern()),
            _ => Ok(Pattern::Identifier(self.parse_binding_identifier()?)),
        }
    }

    /// A binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self) -> ParseResult<Pattern<'a>> {
        let start = self.token_pos();
        let target = self.parse_binding_target()?;
        if self.current_token() != TokenKind::EqualsToken {
            return Ok(target);
        }
        self.next_token()?;
        let right = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_assignment_expression())?;
        Ok(Pattern::Assignment(self.alloc(AssignmentPattern {
            span: self.span(start),
            left: target,
            right,
        })))
    }

    /// `...target` inside a binding pattern or parameter list. The current
    /// token is `...`; `close` is the token that must follow.
    pub(crate) fn parse_binding_rest(&mut self, close: TokenKind) -> ParseResult<&'a RestElement<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        let argument = self.parse_binding_target()?;
        match self.current_token() {
            TokenKind::EqualsToken => return Err(self.error(&messages::REST_INITIALIZER, &[])),
            TokenKind::CommaToken => {
                if self.peek_token() == close {
                    return Err(self.error(&messages::REST_TRAILING_COMMA, &[]));
                }
                return Err(self.error(&messages::REST_NOT_LAST, &[]));
            }
            _ => {}
        }
        Ok(self.alloc(RestElement { span: self.span(start), argument }))
    }

    fn parse_array_binding_pattern(&mut self) -> ParseResult<Pattern<'a>> {
        let start = self.token_pos();
        self.expect(TokenKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        loop {
            match self.current_token() {
                TokenKind::CloseBracketToken => break,
                TokenKind::CommaToken => {
                    self.next_token()?;
                    elements.push(None);
                    continue;
                }
                TokenKind::DotDotDotToken => {
                    let rest = self.parse_binding_rest(TokenKind::CloseBracketToken)?;
                    elements.push(Some(Pattern::Rest(rest)));
                    break;
                }
                _ => elements.push(Some(self.parse_binding_element()?)),
            }
            if self.current_token() == TokenKind::CloseBracketToken {
                break;
            }
            self.expect(TokenKind::CommaToken)?;
        }
        self.expect(TokenKind::CloseBracketToken)?;
        Ok(Pattern::Array(self.alloc(ArrayPattern {
            span: self.span(start),
            elements: self.alloc_slice(elements),
        })))
    }

    fn parse_object_binding_pattern(&mut self) -> ParseResult<Pattern<'a>> {
        let start = self.token_pos();
        self.expect(TokenKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        while self.current_token() != TokenKind::CloseBraceToken {
            if self.current_token() == TokenKind::DotDotDotToken {
                if matches!(self.peek_token(), TokenKind::OpenBraceToken | TokenKind::OpenBracketToken) {
                    self.next_token()?;
                    return Err(self.error(&messages::INVALID_OBJECT_REST_BINDING, &[]));
                }
                let rest = self.parse_binding_rest(TokenKind::CloseBraceToken)?;
                properties.push(ObjectPatternMember::Rest(rest));
                break;
            }
            properties.push(ObjectPatternMember::Property(self.parse_binding_property()?));
            if !self.eat(TokenKind::CommaToken)? {
                break;
            }
        }
        self.expect(TokenKind::CloseBraceToken)?;
        Ok(Pattern::Object(self.alloc(ObjectPattern {
            span: self.span(start),
            properties: self.alloc_slice(properties),
        })))
    }

    fn parse_binding_property(&mut self) -> ParseResult<&'a AssignmentProperty<'a>> {
        let start = self.token_pos();
        let key_token = self.current_token();
        let (key, computed) = self.parse_property_key()?;

        if self.eat(TokenKind::ColonToken)? {
            let value = self.parse_binding_element()?;
            return Ok(self.alloc(AssignmentProperty {
                span: self.span(start),
                key,
                value,
                kind: PropertyKind::Init,
                computed,
                method: false,
                shorthand: false,
            }));
        }

        // Shorthand `{ a }` or `{ a = 1 }`: the key must be a plain identifier.
        let id = match key {
            Expression::Identifier(id) if key_token == TokenKind::Identifier && !computed => id,
            _ => return Err(self.unexpected()),
        };
        self.check_binding_identifier(id)?;
        let mut value = Pattern::Identifier(id);
        if self.eat(TokenKind::EqualsToken)? {
            let right =
                self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_assignment_expression())?;
            value = Pattern::Assignment(self.alloc(AssignmentPattern { span: self.span(start), left: value, right }));
        }
        Ok(self.alloc(AssignmentProperty {
            span: self.span(start),
            key,
            value,
            kind: PropertyKind::Init,
            computed: false,
            method: false,
            shorthand: true,
        }))
    }

    // ========================================================================
    // Expression to pattern conversion
    // ========================================================================

    /// Reinterpret a parsed expression as an assignment target or arrow
    /// parameter.
    pub(crate) fn to_pattern(&mut self, expr: Expression<'a>, mode: PatternMode) -> ParseResult<Pattern<'a>> {
        self.convert_pattern(expr, mode, false)
    }

    fn convert_pattern(&mut self, expr: Expression<'a>, mode: PatternMode, nested: bool) -> ParseResult<Pattern<'a>> {
        match expr {
            Expression::Identifier(id) => {
                self.check_assignment_identifier(id)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(member) if mode == PatternMode::Assignment => {
                if member.is_optional_chain() {
                    return Err(self.error_at(&messages::INVALID_OPTIONAL_CHAIN_TARGET, &[], member.span));
                }
                Ok(Pattern::Member(member))
            }
            Expression::Parenthesized(paren) if mode == PatternMode::Assignment => {
                let inner = expr.without_parens();
                match inner {
                    Expression::Identifier(_) => {}
                    Expression::Member(member) if !member.is_optional_chain() => {}
                    _ => return Err(self.invalid_target(expr, mode, nested)),
                }
                if self.cover_list_depth > 0 {
                    self.parenthesized_targets.push(paren.span.text_span());
                }
                self.convert_pattern(inner, mode, nested)
            }
            Expression::Array(array) => self.with_nesting(|p| p.array_to_pattern(array, mode)),
            Expression::Object(object) => self.with_nesting(|p| p.object_to_pattern(object, mode)),
            _ => Err(self.invalid_target(expr, mode, nested)),
        }
    }

    fn invalid_target(&self, expr: Expression<'a>, mode: PatternMode, nested: bool) -> esparse_diagnostics::ParseError {
        if nested || mode == PatternMode::Binding {
            self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], expr.span())
        } else {
            self.error_at(&messages::INVALID_ASSIGNMENT_TARGET, &[], expr.span())
        }
    }

    /// A pattern element: a target, or `target = default`.
    pub(crate) fn element_to_pattern(&mut self, expr: Expression<'a>, mode: PatternMode) -> ParseResult<Pattern<'a>> {
        if let Expression::Assignment(assign) = expr {
            if assign.operator != AssignmentOperator::Assign {
                return Err(self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], assign.span));
            }
            if mode == PatternMode::Binding {
                self.check_binding_pattern(assign.left)?;
            }
            return Ok(Pattern::Assignment(self.alloc(AssignmentPattern {
                span: assign.span,
                left: assign.left,
                right: assign.right,
            })));
        }
        self.convert_pattern(expr, mode, true)
    }

    fn array_to_pattern(&mut self, array: &'a ArrayExpression<'a>, mode: PatternMode) -> ParseResult<Pattern<'a>> {
        let len = array.elements.len();
        let mut elements = Vec::with_capacity(len);
        for (i, element) in array.elements.iter().enumerate() {
            let pattern = match *element {
                None => None,
                Some(Expression::Spread(spread)) => {
                    if i + 1 != len {
                        return Err(self.error_at(&messages::REST_NOT_LAST, &[], spread.span));
                    }
                    if array.trailing_comma.is_some() {
                        return Err(self.error_at(&messages::REST_TRAILING_COMMA, &[], spread.span));
                    }
                    Some(Pattern::Rest(self.spread_to_rest(spread, mode)?))
                }
                Some(expr) => Some(self.element_to_pattern(expr, mode)?),
            };
            elements.push(pattern);
        }
        Ok(Pattern::Array(self.alloc(ArrayPattern {
            span: array.span,
            elements: self.alloc_slice(elements),
        })))
    }

    fn object_to_pattern(&mut self, object: &'a ObjectExpression<'a>, mode: PatternMode) -> ParseResult<Pattern<'a>> {
        let len = object.properties.len();
        let mut properties = Vec::with_capacity(len);
        for (i, member) in object.properties.iter().enumerate() {
            let converted = match *member {
                ObjectMember::Property(prop) => {
                    if prop.kind != PropertyKind::Init || prop.method {
                        return Err(self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], prop.span));
                    }
                    let value = self.element_to_pattern(prop.value, mode)?;
                    ObjectPatternMember::Property(self.alloc(AssignmentProperty {
                        span: prop.span,
                        key: prop.key,
                        value,
                        kind: PropertyKind::Init,
                        computed: prop.computed,
                        method: false,
                        shorthand: prop.shorthand,
                    }))
                }
                ObjectMember::Spread(spread) => {
                    if i + 1 != len {
                        return Err(self.error_at(&messages::REST_NOT_LAST, &[], spread.span));
                    }
                    if object.trailing_comma.is_some() {
                        return Err(self.error_at(&messages::REST_TRAILING_COMMA, &[], spread.span));
                    }
                    let rest = self.spread_to_rest(spread, mode)?;
                    match (rest.argument, mode) {
                        (Pattern::Identifier(_), _) | (Pattern::Member(_), PatternMode::Assignment) => {}
                        (_, PatternMode::Binding) => {
                            return Err(self.error_at(&messages::INVALID_OBJECT_REST_BINDING, &[], spread.span))
                        }
                        (_, PatternMode::Assignment) => {
                            return Err(self.error_at(&messages::INVALID_REST_TARGET, &[], spread.span))
                        }
                    }
                    ObjectPatternMember::Rest(rest)
                }
            };
            properties.push(converted);
        }
        Ok(Pattern::Object(self.alloc(ObjectPattern {
            span: object.span,
            properties: self.alloc_slice(properties),
        })))
    }

    fn spread_to_rest(&mut self, spread: &'a SpreadElement<'a>, mode: PatternMode) -> ParseResult<&'a RestElement<'a>> {
        if let Expression::Assignment(assign) = spread.argument {
            return Err(self.error_at(&messages::REST_INITIALIZER, &[], assign.span));
        }
        let argument = self.convert_pattern(spread.argument, mode, true)?;
        Ok(self.alloc(RestElement { span: spread.span, argument }))
    }

    /// A pattern built in assignment mode that is now known to be a binding
    /// must not contain member expressions.
    fn check_binding_pattern(&self, pattern: Pattern<'a>) -> ParseResult<()> {
        match pattern {
            Pattern::Identifier(_) => Ok(()),
            Pattern::Member(member) => Err(self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], member.span)),
            Pattern::Rest(rest) => self.check_binding_pattern(rest.argument),
            Pattern::Assignment(assign) => self.check_binding_pattern(assign.left),
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.check_binding_pattern(*element)?;
                }
                Ok(())
            }
            Pattern::Object(object) => {
                for member in object.properties {
                    match member {
                        ObjectPatternMember::Property(prop) => self.check_binding_pattern(prop.value)?,
                        ObjectPatternMember::Rest(rest) => self.check_binding_pattern(rest.argument)?,
                    }
                }
                Ok(())
            }
        }
    }

    /// `eval` and `arguments` cannot be assigned in strict code.
    pub(crate) fn check_assignment_identifier(&self, id: &'a Identifier<'a>) -> ParseResult<()> {
        if self.context.is_strict() && classify_identifier(id.name) == IdentifierClass::EvalOrArguments {
            return Err(self.error_at(&messages::STRICT_EVAL_ARGUMENTS, &[], id.span));
        }
        Ok(())
    }

    /// The target of `++`, `--` or a compound assignment: an identifier or
    /// a member expression, possibly parenthesized.
    pub(crate) fn to_simple_target(&mut self, expr: Expression<'a>, operation: Option<&str>) -> ParseResult<Pattern<'a>> {
        match expr.without_parens() {
            Expression::Identifier(id) => {
                self.check_assignment_identifier(id)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(member) if member.is_optional_chain() => {
                Err(self.error_at(&messages::INVALID_OPTIONAL_CHAIN_TARGET, &[], member.span))
            }
            Expression::Member(member) => Ok(Pattern::Member(member)),
            _ => Err(match operation {
                Some(op) => self.error_at(&messages::INVALID_UPDATE_TARGET, &[op], expr.span()),
                None => self.error_at(&messages::INVALID_ASSIGNMENT_TARGET, &[], expr.span()),
            }),
        }
    }
}
