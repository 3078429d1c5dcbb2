//! Functions, arrow functions and methods.

use esparse_ast::*;
use esparse_binder::{BindingKind, ScopeKind};
use esparse_diagnostics::{messages, ParseResult};
use rustc_hash::FxHashSet;

use crate::context::Context;
use crate::parser::{collect_bound_names, CoverPositions, Parser};
use crate::patterns::PatternMode;

/// Where a function is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FunctionKind {
    Declaration,
    /// `export default function () {}`: a declaration whose name is optional.
    DefaultExport,
    Expression,
}

/// The kind of method a parameter list and body belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodKind {
    Method,
    Getter,
    Setter,
    Constructor { derived: bool },
}

/// Parameter list facts needed to validate it after the body is known.
#[derive(Debug, Clone, Copy)]
struct ParamRules {
    is_arrow: bool,
    is_method: bool,
}

impl<'a> Parser<'a> {
    /// `function`, `async function`, `function*`. The current token is
    /// `function`; `start` is where the construct began (before `async`).
    pub(crate) fn parse_function(
        &mut self,
        start: u32,
        is_async: bool,
        kind: FunctionKind,
    ) -> ParseResult<&'a Function<'a>> {
        self.expect(TokenKind::FunctionKeyword)?;
        let generator = self.eat(TokenKind::AsteriskToken)?;

        let id = if self.current_token() == TokenKind::Identifier {
            let id = match kind {
                // An expression's name is bound inside the function itself.
                FunctionKind::Expression => {
                    let mut add = Context::NONE;
                    add.set(Context::IN_GENERATOR, generator);
                    add.set(Context::IN_ASYNC, is_async);
                    self.with_context(add, Context::IN_GENERATOR | Context::IN_ASYNC, |p| {
                        p.parse_binding_identifier()
                    })?
                }
                _ => self.parse_binding_identifier()?,
            };
            Some(id)
        } else if kind == FunctionKind::Declaration {
            return Err(self.unexpected());
        } else {
            None
        };

        if kind != FunctionKind::Expression {
            if let Some(id) = id {
                let binding = if is_async || generator {
                    BindingKind::AsyncOrGeneratorFunction
                } else {
                    BindingKind::Function
                };
                self.declare_name(id.name, binding, id.span)?;
            }
        }

        let mut context = (self.context & Context::INHERITED)
            | Context::IN_FUNCTION
            | Context::ALLOW_RETURN
            | Context::ALLOW_NEW_TARGET;
        context.set(Context::IN_GENERATOR, generator);
        context.set(Context::IN_ASYNC, is_async);
        let was_strict = self.context.is_strict();
        let (params, body, strict) = self.with_function_boundary(context, |p| {
            p.parse_params_and_body(ParamRules { is_arrow: false, is_method: false }, None)
        })?;
        if strict && !was_strict {
            if let Some(id) = id {
                self.with_context(Context::STRICT, Context::NONE, |p| p.check_binding_identifier(id))?;
            }
        }

        let ty = match kind {
            FunctionKind::Expression => FunctionType::FunctionExpression,
            _ => FunctionType::FunctionDeclaration,
        };
        Ok(self.alloc(Function {
            ty,
            span: self.span(start),
            id,
            params,
            body,
            is_async,
            generator,
        }))
    }

    /// The parameter list and body of a method, getter, setter or class
    /// constructor. The current token is `(`.
    pub(crate) fn parse_method_function(
        &mut self,
        is_async: bool,
        generator: bool,
        kind: MethodKind,
    ) -> ParseResult<&'a Function<'a>> {
        let start = self.token_pos();
        let mut context = (self.context & Context::INHERITED)
            | Context::IN_FUNCTION
            | Context::ALLOW_RETURN
            | Context::ALLOW_NEW_TARGET
            | Context::ALLOW_SUPER_PROPERTY;
        context.set(Context::IN_GENERATOR, generator);
        context.set(Context::IN_ASYNC, is_async);
        context.set(Context::ALLOW_SUPER_CALL, kind == MethodKind::Constructor { derived: true });
        let (params, body, _) = self.with_function_boundary(context, |p| {
            p.parse_params_and_body(ParamRules { is_arrow: false, is_method: true }, Some(kind))
        })?;
        Ok(self.alloc(Function {
            ty: FunctionType::FunctionExpression,
            span: self.span(start),
            id: None,
            params,
            body,
            is_async,
            generator,
        }))
    }

    /// `( params ) { body }` inside an already established function
    /// context. Returns whether the function ended up strict.
    fn parse_params_and_body(
        &mut self,
        rules: ParamRules,
        method: Option<MethodKind>,
    ) -> ParseResult<(&'a [Pattern<'a>], &'a BlockStatement<'a>, bool)> {
        let was_strict = self.context.is_strict();
        self.enter_scope(ScopeKind::Function);

        let params_start = self.token_pos();
        self.expect(TokenKind::OpenParenToken)?;
        let params = self.with_context(Context::IN_PARAMETERS, Context::NONE, |p| p.parse_formal_parameters())?;
        self.expect(TokenKind::CloseParenToken)?;

        match method {
            Some(MethodKind::Getter) if !params.is_empty() => {
                return Err(self.error_at(&messages::GETTER_PARAMETERS, &[], self.span(params_start)));
            }
            Some(MethodKind::Setter) => match params.as_slice() {
                [Pattern::Rest(rest)] => {
                    return Err(self.error_at(&messages::SETTER_REST_PARAMETER, &[], rest.span));
                }
                [_] => {}
                _ => return Err(self.error_at(&messages::SETTER_PARAMETERS, &[], self.span(params_start))),
            },
            _ => {}
        }

        self.declare_parameters(&params)?;
        let (body, use_strict) = self.parse_function_body()?;
        self.validate_parameters(&params, rules, use_strict, was_strict)?;
        let strict = was_strict || use_strict;
        self.exit_scope();
        Ok((self.alloc_slice(params), body, strict))
    }

    /// FormalParameters up to (not including) the closing `)`.
    pub(crate) fn parse_formal_parameters(&mut self) -> ParseResult<Vec<Pattern<'a>>> {
        let mut params = Vec::new();
        while self.current_token() != TokenKind::CloseParenToken {
            if self.current_token() == TokenKind::DotDotDotToken {
                let rest = self.parse_binding_rest(TokenKind::CloseParenToken)?;
                params.push(Pattern::Rest(rest));
                break;
            }
            params.push(self.parse_binding_element()?);
            if !self.eat(TokenKind::CommaToken)? {
                break;
            }
        }
        Ok(params)
    }

    fn declare_parameters(&mut self, params: &[Pattern<'a>]) -> ParseResult<()> {
        for param in params {
            self.declare_pattern(*param, BindingKind::Parameter)?;
        }
        Ok(())
    }

    /// `{ FunctionBody }`. Returns the block and whether its directive
    /// prologue contained `"use strict"`.
    pub(crate) fn parse_function_body(&mut self) -> ParseResult<(&'a BlockStatement<'a>, bool)> {
        let start = self.token_pos();
        self.expect(TokenKind::OpenBraceToken)?;
        let (body, use_strict) = self.with_context(Context::NONE, Context::IN_PARAMETERS | Context::TOP_LEVEL, |p| {
            p.parse_directives_and_statements(TokenKind::CloseBraceToken)
        })?;
        self.expect(TokenKind::CloseBraceToken)?;
        let block = self.alloc(BlockStatement { span: self.span(start), body: self.alloc_slice(body) });
        Ok((block, use_strict))
    }

    /// Checks on a parameter list that depend on the finished body.
    fn validate_parameters(
        &mut self,
        params: &[Pattern<'a>],
        rules: ParamRules,
        use_strict: bool,
        was_strict: bool,
    ) -> ParseResult<()> {
        let simple = params.iter().all(|p| matches!(p, Pattern::Identifier(_)));
        if use_strict && !simple {
            return Err(self.error(&messages::USE_STRICT_NON_SIMPLE_PARAMS, &[]));
        }

        let mut names = Vec::new();
        for param in params {
            collect_bound_names(*param, &mut names);
        }

        // A body directive makes the parameters strict after the fact.
        let strict = was_strict || use_strict;
        if strict && !was_strict {
            self.with_context(Context::STRICT, Context::NONE, |p| {
                names.iter().try_for_each(|id| p.check_binding_identifier(id))
            })?;
        }

        if strict || rules.is_arrow || rules.is_method || !simple {
            let mut seen = FxHashSet::default();
            for id in &names {
                if !seen.insert(id.name) {
                    return Err(self.error_at(&messages::STRICT_DUPLICATE_PARAMETER, &[], id.span));
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Turn the items of a parenthesized cover into arrow parameters and
    /// parse the arrow. The current token is `=>`.
    pub(crate) fn parse_arrow_from_cover(
        &mut self,
        start: u32,
        items: Vec<Expression<'a>>,
        trailing_comma: Option<u32>,
        is_async: bool,
        cover: CoverPositions,
    ) -> ParseResult<Expression<'a>> {
        if let Some(pos) = cover.yield_pos {
            return Err(self.error_at_offset(&messages::YIELD_IN_PARAMETERS, pos, "yield".len() as u32));
        }
        if let Some(pos) = cover.await_pos {
            return Err(self.error_at_offset(&messages::AWAIT_IN_PARAMETERS, pos, "await".len() as u32));
        }
        if let (true, Some(pos)) = (is_async, cover.await_ident_pos) {
            return Err(self.error_at_offset(&messages::AWAIT_AS_IDENTIFIER, pos, "await".len() as u32));
        }

        let len = items.len();
        let mut params = Vec::with_capacity(len);
        for (i, item) in items.into_iter().enumerate() {
            let param = match item {
                Expression::Spread(spread) => {
                    if i + 1 != len {
                        return Err(self.error_at(&messages::REST_NOT_LAST, &[], spread.span));
                    }
                    if trailing_comma.is_some() {
                        return Err(self.error_at(&messages::REST_TRAILING_COMMA, &[], spread.span));
                    }
                    if let Expression::Assignment(assign) = spread.argument {
                        return Err(self.error_at(&messages::REST_INITIALIZER, &[], assign.span));
                    }
                    let argument = self.to_pattern(spread.argument, PatternMode::Binding)?;
                    Pattern::Rest(self.alloc(RestElement { span: spread.span, argument }))
                }
                _ => self.element_to_pattern(item, PatternMode::Binding)?,
            };
            params.push(param);
        }

        // Parenthesized targets are fine in defaults and nested bodies but
        // never around a name the arrow binds.
        let targets = self.take_parenthesized_targets(start);
        if !targets.is_empty() {
            let mut names = Vec::new();
            for param in &params {
                collect_bound_names(*param, &mut names);
            }
            let wrapped = targets
                .iter()
                .find(|target| names.iter().any(|id| target.start <= id.span.start && id.span.end <= target.end));
            if let Some(target) = wrapped {
                return Err(self.error_at_offset(&messages::INVALID_ARROW_PARAMETERS, target.start, 1));
            }
        }
        self.parse_arrow_function(start, params, is_async)
    }

    /// Parse `=> body` for already converted parameters.
    pub(crate) fn parse_arrow_function(
        &mut self,
        start: u32,
        params: Vec<Pattern<'a>>,
        is_async: bool,
    ) -> ParseResult<Expression<'a>> {
        if self.has_preceding_line_break() {
            return Err(self.error(&messages::LINE_TERMINATOR_BEFORE_ARROW, &[]));
        }
        self.expect(TokenKind::EqualsGreaterThanToken)?;

        let mut context = (self.context & Context::ARROW_INHERITED) | Context::IN_FUNCTION | Context::ALLOW_RETURN;
        context.set(Context::IN_ASYNC, is_async);
        let disallow_in = self.context & Context::DISALLOW_IN;
        let was_strict = self.context.is_strict();

        let (body, expression) = self.with_function_boundary(context, |p| {
            p.enter_scope(ScopeKind::Function);
            // Parameters are checked in the arrow's own context, where
            // `await` may now be reserved.
            let mut names = Vec::new();
            for param in &params {
                collect_bound_names(*param, &mut names);
            }
            for id in &names {
                p.check_binding_identifier(id)?;
            }
            p.declare_parameters(&params)?;

            let result = if p.current_token() == TokenKind::OpenBraceToken {
                let (block, use_strict) = p.parse_function_body()?;
                p.validate_parameters(&params, ParamRules { is_arrow: true, is_method: false }, use_strict, was_strict)?;
                (ArrowBody::Block(block), false)
            } else {
                p.validate_parameters(&params, ParamRules { is_arrow: true, is_method: false }, false, was_strict)?;
                let expr = p.with_context(disallow_in, Context::NONE, |p| p.parse_assignment_expression())?;
                (ArrowBody::Expression(expr), true)
            };
            p.exit_scope();
            Ok(result)
        })?;

        Ok(Expression::ArrowFunction(self.alloc(ArrowFunctionExpression {
            span: self.span(start),
            params: self.alloc_slice(params),
            body,
            is_async,
            expression,
        })))
    }
}
