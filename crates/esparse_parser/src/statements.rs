//! Statements and declarations.

use esparse_ast::*;
use esparse_binder::{BindingKind, ScopeKind};
use esparse_diagnostics::{messages, ParseResult};

use crate::context::Context;
use crate::functions::FunctionKind;
use crate::parser::{Label, Parser};
use crate::patterns::PatternMode;

/// Where a statement appears, which decides what declarations it may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementPosition {
    /// A StatementListItem: any declaration is allowed.
    List,
    /// The consequent or alternate of an `if`.
    IfClause,
    /// The body of a labelled statement. `functions` is false once the
    /// label chain sits in a single-statement position.
    Labelled { functions: bool },
    /// Any other single-statement body.
    Body,
}

fn binding_kind_of(kind: VariableKind) -> BindingKind {
    match kind {
        VariableKind::Var => BindingKind::Var,
        VariableKind::Let => BindingKind::Let,
        VariableKind::Const => BindingKind::Const,
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement_list_item(&mut self) -> ParseResult<Statement<'a>> {
        self.parse_statement(StatementPosition::List)
    }

    pub(crate) fn parse_statement(&mut self, position: StatementPosition) -> ParseResult<Statement<'a>> {
        self.with_nesting(|p| p.parse_statement_inner(position))
    }

    fn parse_statement_inner(&mut self, position: StatementPosition) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        tracing::trace!(token = ?self.current_token(), start, "statement");

        match self.current_token() {
            TokenKind::ImportKeyword if !matches!(self.peek_token(), TokenKind::OpenParenToken | TokenKind::DotToken) => {
                self.check_module_item_position(position, "import")?;
                return self.parse_import_declaration();
            }
            TokenKind::ExportKeyword => {
                self.check_module_item_position(position, "export")?;
                return self.parse_export_declaration();
            }
            _ => {}
        }
        self.with_context(Context::NONE, Context::TOP_LEVEL, |p| p.parse_statement_body(start, position))
    }

    fn check_module_item_position(&self, position: StatementPosition, keyword: &str) -> ParseResult<()> {
        let top_level = self.context.contains(Context::TOP_LEVEL | Context::MODULE);
        if top_level && position == StatementPosition::List {
            Ok(())
        } else {
            Err(self.error(&messages::MODULE_ITEM_NOT_TOP_LEVEL, &[keyword]))
        }
    }

    fn parse_statement_body(&mut self, start: u32, position: StatementPosition) -> ParseResult<Statement<'a>> {
        match self.current_token() {
            TokenKind::OpenBraceToken => Ok(Statement::Block(self.parse_block_statement()?)),
            TokenKind::SemicolonToken => {
                self.next_token()?;
                Ok(Statement::Empty(self.alloc(EmptyStatement { span: self.span(start) })))
            }
            TokenKind::VarKeyword => self.parse_variable_statement(VariableKind::Var),
            TokenKind::ConstKeyword => {
                if position != StatementPosition::List {
                    return Err(self.error(&messages::LEXICAL_SINGLE_STATEMENT, &[]));
                }
                self.parse_variable_statement(VariableKind::Const)
            }
            TokenKind::Identifier if self.is_contextual("let") && self.let_starts_declaration(position)? => {
                self.parse_variable_statement(VariableKind::Let)
            }
            TokenKind::FunctionKeyword => self.parse_function_statement(start, false, position),
            TokenKind::Identifier if self.is_contextual("async") && self.async_function_follows() => {
                self.next_token()?;
                self.parse_function_statement(start, true, position)
            }
            TokenKind::ClassKeyword => {
                if position != StatementPosition::List {
                    return Err(self.error(&messages::LEXICAL_SINGLE_STATEMENT, &[]));
                }
                Ok(Statement::ClassDeclaration(self.parse_class(start, ClassType::ClassDeclaration)?))
            }
            TokenKind::IfKeyword => self.parse_if_statement(),
            TokenKind::ForKeyword => self.parse_for_statement(),
            TokenKind::WhileKeyword => self.parse_while_statement(),
            TokenKind::DoKeyword => self.parse_do_while_statement(),
            TokenKind::BreakKeyword => self.parse_break_or_continue(true),
            TokenKind::ContinueKeyword => self.parse_break_or_continue(false),
            TokenKind::ReturnKeyword => self.parse_return_statement(),
            TokenKind::WithKeyword => self.parse_with_statement(),
            TokenKind::SwitchKeyword => self.parse_switch_statement(),
            TokenKind::ThrowKeyword => self.parse_throw_statement(),
            TokenKind::TryKeyword => self.parse_try_statement(),
            TokenKind::DebuggerKeyword => {
                self.next_token()?;
                self.consume_semicolon()?;
                Ok(Statement::Debugger(self.alloc(DebuggerStatement { span: self.span(start) })))
            }
            _ => self.parse_expression_or_labelled_statement(start, position),
        }
    }

    /// `let` at the start of a statement: a declaration, or an identifier.
    fn let_starts_declaration(&mut self, position: StatementPosition) -> ParseResult<bool> {
        let (next, same_line) = self.peek_token_on_same_line();
        let declaration_like = matches!(
            next,
            TokenKind::Identifier | TokenKind::OpenBracketToken | TokenKind::OpenBraceToken
        );
        if position == StatementPosition::List {
            return Ok(declaration_like);
        }
        // `let [` can never start an expression statement.
        if next == TokenKind::OpenBracketToken || (declaration_like && same_line) {
            return Err(self.error(&messages::LEXICAL_SINGLE_STATEMENT, &[]));
        }
        Ok(false)
    }

    pub(crate) fn async_function_follows(&mut self) -> bool {
        let (next, same_line) = self.peek_token_on_same_line();
        next == TokenKind::FunctionKeyword && same_line
    }

    // ========================================================================
    // Blocks and declarations
    // ========================================================================

    /// `{ StatementList }` in a new block scope.
    pub(crate) fn parse_block_statement(&mut self) -> ParseResult<&'a BlockStatement<'a>> {
        self.enter_scope(ScopeKind::Block);
        let block = self.parse_block_in_current_scope();
        self.exit_scope();
        block
    }

    fn parse_block_in_current_scope(&mut self) -> ParseResult<&'a BlockStatement<'a>> {
        let start = self.token_pos();
        self.expect(TokenKind::OpenBraceToken)?;
        let mut body = Vec::new();
        while self.current_token() != TokenKind::CloseBraceToken {
            body.push(self.parse_statement_list_item()?);
        }
        self.next_token()?;
        Ok(self.alloc(BlockStatement {
            span: self.span(start),
            body: self.alloc_slice(body),
        }))
    }

    /// A `function` declaration in statement position. `start` includes a
    /// leading `async`, already consumed.
    fn parse_function_statement(
        &mut self,
        start: u32,
        is_async: bool,
        position: StatementPosition,
    ) -> ParseResult<Statement<'a>> {
        if position == StatementPosition::List {
            let function = self.parse_function(start, is_async, FunctionKind::Declaration)?;
            return Ok(Statement::FunctionDeclaration(function));
        }

        let generator = self.peek_token() == TokenKind::AsteriskToken;
        let message = if is_async {
            &messages::ASYNC_FUNCTION_SINGLE_STATEMENT
        } else if generator {
            &messages::GENERATOR_SINGLE_STATEMENT
        } else if self.context.is_strict() {
            &messages::STRICT_FUNCTION
        } else {
            let annex_b = self.context.is_annex_b();
            match position {
                StatementPosition::IfClause if annex_b => {
                    // Behaves as if wrapped in its own block.
                    self.enter_scope(ScopeKind::Block);
                    let function = self.parse_function(start, false, FunctionKind::Declaration);
                    self.exit_scope();
                    return Ok(Statement::FunctionDeclaration(function?));
                }
                StatementPosition::Labelled { functions: true } if annex_b => {
                    let function = self.parse_function(start, false, FunctionKind::Declaration)?;
                    return Ok(Statement::FunctionDeclaration(function));
                }
                StatementPosition::Labelled { .. } => &messages::LABELLED_FUNCTION,
                _ => &messages::FUNCTION_SINGLE_STATEMENT,
            }
        };
        Err(self.error(message, &[]))
    }

    /// `var`, `let` or `const` statement. The current token is the keyword.
    pub(crate) fn parse_variable_statement(&mut self, kind: VariableKind) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        let declarations = self.parse_variable_declarators(kind)?;
        self.check_declarator_initializers(&declarations, kind)?;
        for declarator in &declarations {
            self.declare_pattern(declarator.id, binding_kind_of(kind))?;
        }
        self.consume_semicolon()?;
        Ok(Statement::VariableDeclaration(self.alloc(VariableDeclaration {
            span: self.span(start),
            declarations: self.alloc_slice(declarations),
            kind,
        })))
    }

    pub(crate) fn parse_variable_declarators(&mut self, kind: VariableKind) -> ParseResult<Vec<VariableDeclarator<'a>>> {
        let mut declarations = Vec::new();
        loop {
            let start = self.token_pos();
            let id = self.parse_binding_target()?;
            let init = if self.eat(TokenKind::EqualsToken)? {
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            declarations.push(VariableDeclarator { span: self.span(start), id, init });
            if !self.eat(TokenKind::CommaToken)? {
                break;
            }
        }
        tracing::trace!(kind = kind.as_str(), count = declarations.len(), "declarators");
        Ok(declarations)
    }

    pub(crate) fn check_declarator_initializers(
        &self,
        declarations: &[VariableDeclarator<'a>],
        kind: VariableKind,
    ) -> ParseResult<()> {
        for declarator in declarations.iter().filter(|d| d.init.is_none()) {
            if kind == VariableKind::Const {
                return Err(self.error_at(&messages::MISSING_INITIALIZER, &["const declaration"], declarator.span));
            }
            if !matches!(declarator.id, Pattern::Identifier(_)) {
                return Err(self.error_at(
                    &messages::MISSING_INITIALIZER,
                    &["destructuring declaration"],
                    declarator.span,
                ));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Expression and labelled statements
    // ========================================================================

    fn parse_expression_or_labelled_statement(
        &mut self,
        start: u32,
        position: StatementPosition,
    ) -> ParseResult<Statement<'a>> {
        let expression = self.parse_expression()?;
        if let (Expression::Identifier(label), TokenKind::ColonToken) = (expression, self.current_token()) {
            return self.parse_labelled_statement(start, label, position);
        }
        self.consume_semicolon()?;
        Ok(Statement::Expression(self.alloc(ExpressionStatement {
            span: self.span(start),
            expression,
            directive: None,
        })))
    }

    fn parse_labelled_statement(
        &mut self,
        start: u32,
        label: &'a Identifier<'a>,
        position: StatementPosition,
    ) -> ParseResult<Statement<'a>> {
        self.check_label_identifier(label)?;
        self.next_token()?;
        if self.labels.iter().any(|l| l.name == label.name) {
            return Err(self.error_at(&messages::DUPLICATE_LABEL, &[label.name], label.span));
        }

        let body_start = self.token_pos();
        for outer in self.labels.iter_mut().rev() {
            if outer.statement_start != start {
                break;
            }
            outer.statement_start = body_start;
        }
        self.labels.push(Label {
            name: label.name,
            is_loop: false,
            statement_start: body_start,
        });

        let functions = matches!(
            position,
            StatementPosition::List | StatementPosition::Labelled { functions: true }
        );
        let body = self.parse_statement(StatementPosition::Labelled { functions });
        self.labels.pop();
        Ok(Statement::Labeled(self.alloc(LabeledStatement {
            span: self.span(start),
            label,
            body: body?,
        })))
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `( Expression )`, as in the head of `if`, `while`, `with` and `switch`.
    fn parse_parenthesized_head(&mut self) -> ParseResult<Expression<'a>> {
        self.expect(TokenKind::OpenParenToken)?;
        let expression = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_expression())?;
        self.expect(TokenKind::CloseParenToken)?;
        Ok(expression)
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        let test = self.parse_parenthesized_head()?;
        let consequent = self.parse_statement(StatementPosition::IfClause)?;
        let alternate = if self.eat(TokenKind::ElseKeyword)? {
            Some(self.parse_statement(StatementPosition::IfClause)?)
        } else {
            None
        };
        Ok(Statement::If(self.alloc(IfStatement {
            span: self.span(start),
            test,
            consequent,
            alternate,
        })))
    }

    fn parse_loop_body(&mut self) -> ParseResult<Statement<'a>> {
        self.with_context(Context::IN_ITERATION, Context::NONE, |p| p.parse_statement(StatementPosition::Body))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.mark_loop_labels(start);
        self.next_token()?;
        let test = self.parse_parenthesized_head()?;
        let body = self.parse_loop_body()?;
        Ok(Statement::While(self.alloc(WhileStatement { span: self.span(start), test, body })))
    }

    fn parse_do_while_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.mark_loop_labels(start);
        self.next_token()?;
        let body = self.parse_loop_body()?;
        self.expect(TokenKind::WhileKeyword)?;
        let test = self.parse_parenthesized_head()?;
        // A semicolon is always inserted after `do ... while (x)`.
        self.eat(TokenKind::SemicolonToken)?;
        Ok(Statement::DoWhile(self.alloc(DoWhileStatement { span: self.span(start), body, test })))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.mark_loop_labels(start);
        self.next_token()?;
        let is_await = if self.is_contextual("await") {
            if !self.context.contains(Context::IN_ASYNC) {
                return Err(self.error(&messages::AWAIT_OUTSIDE_ASYNC, &[]));
            }
            self.next_token()?;
            true
        } else {
            false
        };
        self.expect(TokenKind::OpenParenToken)?;

        self.enter_scope(ScopeKind::Block);
        let result = self.parse_for_head_and_body(start, is_await);
        self.exit_scope();
        result
    }

    fn parse_for_head_and_body(&mut self, start: u32, is_await: bool) -> ParseResult<Statement<'a>> {
        let init_start = self.token_pos();
        let declaration_kind = match self.current_token() {
            TokenKind::VarKeyword => Some(VariableKind::Var),
            TokenKind::ConstKeyword => Some(VariableKind::Const),
            TokenKind::Identifier if self.is_contextual("let") => matches!(
                self.peek_token(),
                TokenKind::Identifier | TokenKind::OpenBracketToken | TokenKind::OpenBraceToken
            )
            .then_some(VariableKind::Let),
            _ => None,
        };

        if let Some(kind) = declaration_kind {
            self.next_token()?;
            let declarations =
                self.with_context(Context::DISALLOW_IN, Context::NONE, |p| p.parse_variable_declarators(kind))?;
            let span = self.span(init_start);
            let is_of = self.is_contextual("of");
            if is_of || self.current_token() == TokenKind::InKeyword {
                self.check_for_in_of_declaration(&declarations, kind, is_of, span)?;
                let binding = if is_of && kind == VariableKind::Var {
                    BindingKind::ForOfVar
                } else {
                    binding_kind_of(kind)
                };
                for declarator in &declarations {
                    self.declare_pattern(declarator.id, binding)?;
                }
                let declaration = self.alloc(VariableDeclaration {
                    span,
                    declarations: self.alloc_slice(declarations),
                    kind,
                });
                return self.parse_for_in_of_rest(start, ForLeft::VariableDeclaration(declaration), is_of, is_await);
            }
            if is_await {
                return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
            }
            self.check_declarator_initializers(&declarations, kind)?;
            for declarator in &declarations {
                self.declare_pattern(declarator.id, binding_kind_of(kind))?;
            }
            let declaration = self.alloc(VariableDeclaration {
                span,
                declarations: self.alloc_slice(declarations),
                kind,
            });
            return self.parse_for_loop_rest(start, Some(ForInit::VariableDeclaration(declaration)));
        }

        if self.current_token() == TokenKind::SemicolonToken {
            if is_await {
                return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
            }
            return self.parse_for_loop_rest(start, None);
        }

        let starts_with_let = self.is_contextual("let");
        let starts_with_async = self.is_contextual("async");
        let outer = self.cover_error.take();
        let expr = if starts_with_async && self.async_of_follows() {
            // `for (async of x)` names a variable; it is not an async arrow.
            Expression::Identifier(self.parse_identifier_reference()?)
        } else {
            self.with_context(Context::DISALLOW_IN, Context::NONE, |p| p.parse_assignment_expression_or_cover())?
        };
        let is_of = self.is_contextual("of");

        if is_of || self.current_token() == TokenKind::InKeyword {
            let loop_kind = if is_of { "for-of" } else { "for-in" };
            if is_of && starts_with_let {
                return Err(self.error_at_offset(&messages::FOR_OF_LET, init_start, 3));
            }
            if is_of && starts_with_async && !is_await && matches!(expr, Expression::Identifier(_)) {
                return Err(self.error_at(&messages::FOR_OF_ASYNC, &[], expr.span()));
            }
            if is_await && !is_of {
                return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
            }
            if !matches!(
                expr.without_parens(),
                Expression::Identifier(_) | Expression::Member(_) | Expression::Array(_) | Expression::Object(_)
            ) {
                return Err(self.error_at(&messages::INVALID_FOR_TARGET, &[loop_kind], expr.span()));
            }
            self.cover_error = None;
            let target = self.to_pattern(expr, PatternMode::Assignment)?;
            self.cover_error = outer;
            return self.parse_for_in_of_rest(start, ForLeft::Pattern(target), is_of, is_await);
        }

        if let Some(error) = self.cover_error.take() {
            return Err(error);
        }
        self.cover_error = outer;
        if is_await {
            return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
        }

        let init = if self.current_token() == TokenKind::CommaToken {
            let mut expressions = vec![expr];
            self.with_context(Context::DISALLOW_IN, Context::NONE, |p| {
                while p.eat(TokenKind::CommaToken)? {
                    expressions.push(p.parse_assignment_expression()?);
                }
                Ok(())
            })?;
            Expression::Sequence(self.alloc(SequenceExpression {
                span: self.span(init_start),
                expressions: self.alloc_slice(expressions),
            }))
        } else {
            expr
        };
        self.parse_for_loop_rest(start, Some(ForInit::Expression(init)))
    }

    /// `async of` not followed by `=>`.
    fn async_of_follows(&mut self) -> bool {
        self.peek(|scanner| {
            scanner.scan();
            let is_of = scanner.token() == TokenKind::Identifier
                && scanner.token_text() == "of";
            scanner.scan();
            is_of && scanner.token() != TokenKind::EqualsGreaterThanToken
        })
    }

    fn check_for_in_of_declaration(
        &self,
        declarations: &[VariableDeclarator<'a>],
        kind: VariableKind,
        is_of: bool,
        span: Span,
    ) -> ParseResult<()> {
        let loop_kind = if is_of { "for-of" } else { "for-in" };
        let [declarator] = declarations else {
            return Err(self.error_at(&messages::FOR_IN_OF_SINGLE_BINDING, &[loop_kind], span));
        };
        if declarator.init.is_some() {
            // Web-compatible sloppy code keeps `for (var x = 1 in o)`.
            let legacy = !is_of
                && kind == VariableKind::Var
                && self.context.is_annex_b()
                && matches!(declarator.id, Pattern::Identifier(_));
            if !legacy {
                return Err(self.error_at(&messages::FOR_IN_OF_INITIALIZER, &[loop_kind], declarator.span));
            }
        }
        Ok(())
    }

    /// After the left side of a for-in/of head. The current token is `in`
    /// or `of`.
    fn parse_for_in_of_rest(
        &mut self,
        start: u32,
        left: ForLeft<'a>,
        is_of: bool,
        is_await: bool,
    ) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let right = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| {
            if is_of {
                p.parse_assignment_expression()
            } else {
                p.parse_expression()
            }
        })?;
        self.expect(TokenKind::CloseParenToken)?;
        let body = self.parse_loop_body()?;
        let span = self.span(start);
        if is_of {
            Ok(Statement::ForOf(self.alloc(ForOfStatement { span, left, right, body, is_await })))
        } else {
            Ok(Statement::ForIn(self.alloc(ForInStatement { span, left, right, body })))
        }
    }

    /// After the init of a `for (;;)` head. The current token is `;`.
    fn parse_for_loop_rest(&mut self, start: u32, init: Option<ForInit<'a>>) -> ParseResult<Statement<'a>> {
        self.expect(TokenKind::SemicolonToken)?;
        let (test, update) = self.with_context(Context::NONE, Context::DISALLOW_IN, |p| {
            let test = if p.current_token() == TokenKind::SemicolonToken {
                None
            } else {
                Some(p.parse_expression()?)
            };
            p.expect(TokenKind::SemicolonToken)?;
            let update = if p.current_token() == TokenKind::CloseParenToken {
                None
            } else {
                Some(p.parse_expression()?)
            };
            Ok((test, update))
        })?;
        self.expect(TokenKind::CloseParenToken)?;
        let body = self.parse_loop_body()?;
        Ok(Statement::For(self.alloc(ForStatement {
            span: self.span(start),
            init,
            test,
            update,
            body,
        })))
    }

    fn parse_break_or_continue(&mut self, is_break: bool) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        let label = if self.current_token() == TokenKind::Identifier && !self.has_preceding_line_break() {
            let label = self.parse_identifier_name()?;
            self.check_label_identifier(label)?;
            Some(label)
        } else {
            None
        };

        match label {
            Some(label) => match self.labels.iter().find(|l| l.name == label.name) {
                None => return Err(self.error_at(&messages::UNDEFINED_LABEL, &[label.name], label.span)),
                Some(target) if !is_break && !target.is_loop => {
                    return Err(self.error_at(&messages::ILLEGAL_CONTINUE_LABEL, &[label.name], label.span));
                }
                Some(_) => {}
            },
            None if is_break => {
                if !self.context.intersects(Context::IN_ITERATION | Context::IN_SWITCH) {
                    return Err(self.error_at(&messages::ILLEGAL_BREAK, &[], self.span(start)));
                }
            }
            None => {
                if !self.context.contains(Context::IN_ITERATION) {
                    return Err(self.error_at(&messages::ILLEGAL_CONTINUE, &[], self.span(start)));
                }
            }
        }
        self.consume_semicolon()?;

        let span = self.span(start);
        if is_break {
            Ok(Statement::Break(self.alloc(BreakStatement { span, label })))
        } else {
            Ok(Statement::Continue(self.alloc(ContinueStatement { span, label })))
        }
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        if !self.context.contains(Context::ALLOW_RETURN) {
            return Err(self.error(&messages::ILLEGAL_RETURN, &[]));
        }
        self.next_token()?;
        let argument = if self.can_insert_semicolon() || self.current_token() == TokenKind::SemicolonToken {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;
        Ok(Statement::Return(self.alloc(ReturnStatement { span: self.span(start), argument })))
    }

    fn parse_with_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        if self.context.is_strict() {
            return Err(self.error(&messages::STRICT_WITH, &[]));
        }
        self.next_token()?;
        let object = self.parse_parenthesized_head()?;
        let body = self.parse_statement(StatementPosition::Body)?;
        Ok(Statement::With(self.alloc(WithStatement { span: self.span(start), object, body })))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        let discriminant = self.parse_parenthesized_head()?;
        self.expect(TokenKind::OpenBraceToken)?;

        self.enter_scope(ScopeKind::Block);
        let cases = self.with_context(Context::IN_SWITCH, Context::NONE, |p| p.parse_switch_cases());
        self.exit_scope();
        let cases = cases?;

        self.expect(TokenKind::CloseBraceToken)?;
        Ok(Statement::Switch(self.alloc(SwitchStatement {
            span: self.span(start),
            discriminant,
            cases: self.alloc_slice(cases),
        })))
    }

    fn parse_switch_cases(&mut self) -> ParseResult<Vec<SwitchCase<'a>>> {
        let mut cases = Vec::new();
        let mut has_default = false;
        while self.current_token() != TokenKind::CloseBraceToken {
            let start = self.token_pos();
            let test = if self.eat(TokenKind::CaseKeyword)? {
                Some(self.with_context(Context::NONE, Context::DISALLOW_IN, |p| p.parse_expression())?)
            } else {
                if self.current_token() != TokenKind::DefaultKeyword {
                    return Err(self.unexpected());
                }
                if has_default {
                    return Err(self.error(&messages::DUPLICATE_DEFAULT_CLAUSE, &[]));
                }
                has_default = true;
                self.next_token()?;
                None
            };
            self.expect(TokenKind::ColonToken)?;

            let mut consequent = Vec::new();
            while !matches!(
                self.current_token(),
                TokenKind::CaseKeyword | TokenKind::DefaultKeyword | TokenKind::CloseBraceToken
            ) {
                consequent.push(self.parse_statement_list_item()?);
            }
            cases.push(SwitchCase {
                span: self.span(start),
                test,
                consequent: self.alloc_slice(consequent),
            });
        }
        Ok(cases)
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        if self.has_preceding_line_break() {
            return Err(self.error_at(&messages::NEWLINE_AFTER_THROW, &[], self.span(start)));
        }
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::Throw(self.alloc(ThrowStatement { span: self.span(start), argument })))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        let block = self.parse_block_statement()?;

        let handler = if self.current_token() == TokenKind::CatchKeyword {
            Some(self.parse_catch_clause()?)
        } else {
            None
        };
        let finalizer = if self.eat(TokenKind::FinallyKeyword)? {
            Some(self.parse_block_statement()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error(&messages::MISSING_CATCH_OR_FINALLY, &[]));
        }
        Ok(Statement::Try(self.alloc(TryStatement {
            span: self.span(start),
            block,
            handler,
            finalizer,
        })))
    }

    fn parse_catch_clause(&mut self) -> ParseResult<&'a CatchClause<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        if self.current_token() != TokenKind::OpenParenToken {
            let body = self.parse_block_statement()?;
            return Ok(self.alloc(CatchClause { span: self.span(start), param: None, body }));
        }

        self.next_token()?;
        // The parameter and the body's declarations share one scope.
        self.enter_scope(ScopeKind::Catch);
        let parts = self.parse_catch_parameter_and_body();
        self.exit_scope();
        let (param, body) = parts?;
        Ok(self.alloc(CatchClause { span: self.span(start), param: Some(param), body }))
    }

    fn parse_catch_parameter_and_body(&mut self) -> ParseResult<(Pattern<'a>, &'a BlockStatement<'a>)> {
        let param = self.parse_binding_target()?;
        let kind = if matches!(param, Pattern::Identifier(_)) {
            BindingKind::CatchParameter
        } else {
            BindingKind::CatchPattern
        };
        self.declare_pattern(param, kind)?;
        self.expect(TokenKind::CloseParenToken)?;
        let body = self.parse_block_in_current_scope()?;
        Ok((param, body))
    }
}
