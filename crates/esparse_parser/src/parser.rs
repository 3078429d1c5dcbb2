//! The ECMAScript parser core.
//!
//! A recursive descent parser over the on-demand [`Scanner`]. This module
//! holds the parser state and the token, span and context plumbing; the
//! grammar itself lives in the sibling modules (`statements`, `expressions`,
//! `patterns`, `functions`, `classes`, `modules`), each adding an
//! `impl Parser` block.
//!
//! Parsing is fail-fast: every production returns [`ParseResult`] and the
//! first error unwinds the whole parse through `?`.

use bumpalo::Bump;
use esparse_ast::*;
use esparse_binder::{Binder, BindingKind, ScopeKind};
use esparse_core::{LineMap, TextSpan};
use esparse_diagnostics::{messages, DiagnosticMessage, ParseError, ParseResult};
use esparse_scanner::Scanner;
use rustc_hash::FxHashSet;

use crate::classes::PrivateScope;
use crate::context::Context;
use crate::options::ParseOptions;
use crate::utilities::{classify_identifier, IdentifierClass};

/// Deepest nesting of statements and expressions accepted.
const MAX_RECURSION_DEPTH: u32 = 1000;

/// Remaining stack below which a nested parse moves to a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated for nested parses.
const STACK_SEGMENT_SIZE: usize = 1024 * 1024;

/// Move a Vec into the arena as a slice.
pub(crate) fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// A label in scope for `break` and `continue`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Label<'a> {
    pub name: &'a str,
    pub is_loop: bool,
    /// Start of the statement the label applies to. Chained labels
    /// (`a: b: while (x) ...`) all end up pointing at the loop.
    pub statement_start: u32,
}

/// Positions of `yield`/`await` seen while parsing something that may
/// turn out to be arrow function parameters.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CoverPositions {
    pub yield_pos: Option<u32>,
    pub await_pos: Option<u32>,
    pub await_ident_pos: Option<u32>,
}

/// The parser produces an ESTree [`Program`] from ECMAScript source text.
pub struct Parser<'a> {
    pub(crate) arena: &'a Bump,
    pub(crate) source: &'a str,
    pub(crate) scanner: Scanner<'a>,
    pub(crate) options: ParseOptions,
    pub(crate) context: Context,
    line_map: LineMap,
    pub(crate) binder: Binder,
    pub(crate) labels: Vec<Label<'a>>,
    /// End of the last consumed token; node spans end here.
    pub(crate) prev_token_end: u32,
    /// Current nesting of `with_nesting` calls.
    recursion_depth: u32,
    /// Start of the innermost AssignmentExpression being parsed. Only an
    /// expression starting exactly here may become an arrow function.
    pub(crate) assign_expr_start: u32,
    /// An error that applies only if the enclosing object or array literal
    /// stays an expression, such as `{ a = 1 }`.
    pub(crate) cover_error: Option<ParseError>,
    pub(crate) cover: CoverPositions,
    /// Parenthesized assignment targets, as in `[(a)] = b`, converted inside
    /// the open parenthesized cover lists. Truncated when a list closes.
    pub(crate) parenthesized_targets: Vec<TextSpan>,
    /// Open parenthesized cover lists in the current function.
    pub(crate) cover_list_depth: u32,
    pub(crate) private_scopes: Vec<PrivateScope<'a>>,
    pub(crate) exported_names: FxHashSet<&'a str>,
    /// Local names of `export { a }` clauses, checked once the module is complete.
    pub(crate) export_references: Vec<(&'a str, TextSpan)>,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, source: &'a str, options: &ParseOptions) -> Self {
        let options = options.normalized();
        let mut scanner = Scanner::new(source);
        scanner.set_module_goal(options.is_module());
        scanner.set_web_compat(options.webcompat);
        scanner.set_numeric_separators(options.next);
        let top_level = if options.is_module() { ScopeKind::Module } else { ScopeKind::Script };
        Self {
            arena,
            source,
            scanner,
            options,
            context: Context::from_options(&options),
            line_map: LineMap::new(source),
            binder: Binder::new(top_level),
            labels: Vec::new(),
            prev_token_end: 0,
            recursion_depth: 0,
            assign_expr_start: 0,
            cover_error: None,
            cover: CoverPositions::default(),
            parenthesized_targets: Vec::new(),
            cover_list_depth: 0,
            private_scopes: Vec::new(),
            exported_names: FxHashSet::default(),
            export_references: Vec::new(),
        }
    }

    /// Parse the whole source. Errors come back with their line and column
    /// filled in.
    pub fn parse_program(mut self) -> ParseResult<Program<'a>> {
        match self.parse_program_body() {
            Ok(program) => Ok(program),
            Err(error) => Err(error.located(&self.line_map)),
        }
    }

    fn parse_program_body(&mut self) -> ParseResult<Program<'a>> {
        self.scanner.skip_shebang();
        self.next_token()?;
        let (body, _) = self.parse_directives_and_statements(TokenKind::EndOfFileToken)?;
        if self.context.contains(Context::MODULE) {
            self.check_export_references()?;
        }
        Ok(Program {
            span: self.make_span(0, self.source.len() as u32),
            source_type: self.options.source_type,
            body: self.alloc_slice(body),
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn current_token(&self) -> TokenKind { self.scanner.token() }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 { self.scanner.token_start() as u32 }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 { self.scanner.token_end() as u32 }

    #[inline]
    pub(crate) fn token_span(&self) -> TextSpan { TextSpan::new(self.token_pos(), self.token_end()) }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool { self.scanner.has_preceding_line_break() }

    /// Advance to the next token. A lexical error surfaces here.
    pub(crate) fn next_token(&mut self) -> ParseResult<TokenKind> {
        self.prev_token_end = self.token_end();
        let kind = self.scanner.scan();
        if kind == TokenKind::Unknown {
            return Err(self.scanner_error());
        }
        Ok(kind)
    }

    pub(crate) fn scanner_error(&mut self) -> ParseError {
        match self.scanner.take_error() {
            Some(error) => error,
            None => ParseError::new(&messages::INVALID_CHARACTER, &[self.scanner.token_text()], self.token_span()),
        }
    }

    /// Consume `kind` or fail.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.current_token() == kind {
            self.next_token()?;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consume `kind` if it is the current token.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.current_token() == kind {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Whether the current token is the unescaped contextual keyword `word`.
    pub(crate) fn is_contextual(&self, word: &str) -> bool {
        self.current_token() == TokenKind::Identifier
            && !self.scanner.token_flags().contains(TokenFlags::UNICODE_ESCAPE)
            && self.scanner.token_value() == word
    }

    pub(crate) fn expect_contextual(&mut self, word: &str) -> ParseResult<()> {
        if self.is_contextual(word) {
            self.next_token()?;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Scan ahead without consuming anything.
    pub(crate) fn peek<T>(&mut self, f: impl FnOnce(&mut Scanner<'a>) -> T) -> T {
        tracing::trace!(pos = self.token_pos(), "lookahead");
        self.scanner.look_ahead(f)
    }

    /// The kind of the next token.
    pub(crate) fn peek_token(&mut self) -> TokenKind {
        self.peek(|scanner| scanner.scan())
    }

    /// The kind of the next token and whether a line break precedes it.
    pub(crate) fn peek_token_on_same_line(&mut self) -> (TokenKind, bool) {
        self.peek(|scanner| {
            let kind = scanner.scan();
            (kind, !scanner.has_preceding_line_break())
        })
    }

    pub(crate) fn can_insert_semicolon(&self) -> bool {
        matches!(self.current_token(), TokenKind::EndOfFileToken | TokenKind::CloseBraceToken)
            || self.has_preceding_line_break()
    }

    /// Consume a statement-terminating `;`, or accept an inserted one.
    pub(crate) fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(TokenKind::SemicolonToken)? || self.can_insert_semicolon() {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    pub(crate) fn error(&self, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        ParseError::new(message, args, self.token_span())
    }

    pub(crate) fn error_at(&self, message: &DiagnosticMessage, args: &[&str], span: Span) -> ParseError {
        ParseError::new(message, args, span.text_span())
    }

    pub(crate) fn error_at_offset(&self, message: &DiagnosticMessage, start: u32, len: u32) -> ParseError {
        ParseError::new(message, &[], TextSpan::new(start, start + len))
    }

    /// An error for the current token, which the grammar does not allow here.
    pub(crate) fn unexpected(&self) -> ParseError {
        match self.current_token() {
            TokenKind::EndOfFileToken => self.error(&messages::UNEXPECTED_EOF, &[]),
            kind if kind.is_keyword() => {
                self.error(&messages::UNEXPECTED_RESERVED_WORD, &[self.scanner.token_text()])
            }
            _ => self.error(&messages::UNEXPECTED_TOKEN, &[self.scanner.token_text()]),
        }
    }

    /// Fail unless the `next` option is on.
    pub(crate) fn require_next(&self, feature: &str) -> ParseResult<()> {
        if self.context.contains(Context::NEXT) {
            Ok(())
        } else {
            Err(self.error(&messages::NEXT_REQUIRED, &[feature]))
        }
    }

    /// Run `f` one nesting level deeper. Past `MAX_RECURSION_DEPTH` the
    /// input is rejected; before that the stack is grown on demand, so the
    /// thread's own stack size does not bound the nesting.
    pub(crate) fn with_nesting<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return Err(self.error(&messages::NESTING_TOO_DEEP, &[]));
        }
        self.recursion_depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || f(self));
        self.recursion_depth -= 1;
        result
    }

    // ========================================================================
    // Spans and allocation
    // ========================================================================

    /// A span from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn span(&self, start: u32) -> Span {
        self.make_span(start, self.prev_token_end)
    }

    pub(crate) fn make_span(&self, start: u32, end: u32) -> Span {
        let loc = self.options.loc.then(|| SourceLocation {
            start: self.position(start),
            end: self.position(end),
        });
        Span { start, end, loc, ranges: self.options.ranges }
    }

    fn position(&self, offset: u32) -> Position {
        let lc = self.line_map.line_and_column_of(offset);
        Position { line: lc.line + 1, column: lc.character }
    }

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T { self.arena.alloc(value) }

    #[inline]
    pub(crate) fn alloc_str(&self, text: &str) -> &'a str { self.arena.alloc_str(text) }

    #[inline]
    pub(crate) fn alloc_slice<T>(&self, vec: Vec<T>) -> &'a [T] { alloc_vec_in(self.arena, vec) }

    /// Verbatim source text for the `raw` field, when requested.
    pub(crate) fn raw(&self, start: u32, end: u32) -> Option<&'a str> {
        let source: &'a str = self.source;
        self.options.raw.then(|| TextSpan::new(start, end).slice(source))
    }

    // ========================================================================
    // Context
    // ========================================================================

    /// Run `f` with `add` flags set and `remove` flags cleared; the previous
    /// flags are restored whatever `f` returns.
    pub(crate) fn with_context<T>(
        &mut self,
        add: Context,
        remove: Context,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = self.context;
        self.context = (saved - remove) | add;
        let result = f(self);
        self.context = saved;
        result
    }

    /// Run `f` as the body of a new function-like boundary: a fresh context,
    /// no labels, and no pending `yield`/`await` positions.
    pub(crate) fn with_function_boundary<T>(
        &mut self,
        context: Context,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved_context = std::mem::replace(&mut self.context, context);
        let saved_labels = std::mem::take(&mut self.labels);
        let saved_cover = std::mem::take(&mut self.cover);
        let saved_depth = std::mem::take(&mut self.cover_list_depth);
        let result = f(self);
        self.context = saved_context;
        self.labels = saved_labels;
        self.cover = saved_cover;
        self.cover_list_depth = saved_depth;
        result
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Record a declaration for redeclaration checking, when enabled.
    pub(crate) fn declare_name(&mut self, name: &str, kind: BindingKind, span: Span) -> ParseResult<()> {
        if self.context.contains(Context::LEXICAL) {
            self.binder.declare(name, kind, span.text_span())
        } else {
            Ok(())
        }
    }

    /// Declare every name a binding pattern introduces.
    pub(crate) fn declare_pattern(&mut self, pattern: Pattern<'a>, kind: BindingKind) -> ParseResult<()> {
        let mut names = Vec::new();
        collect_bound_names(pattern, &mut names);
        for id in names {
            if matches!(kind, BindingKind::Let | BindingKind::Const) && id.name == "let" {
                return Err(self.error_at(&messages::LET_IN_LEXICAL_BINDING, &[], id.span));
            }
            self.declare_name(id.name, kind, id.span)?;
        }
        Ok(())
    }

    pub(crate) fn enter_scope(&mut self, kind: ScopeKind) {
        self.binder.enter_scope(kind, self.context.is_annex_b());
    }

    pub(crate) fn exit_scope(&mut self) {
        self.binder.exit_scope();
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Consume any IdentifierName (reserved words included) without validation.
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<&'a Identifier<'a>> {
        if !self.current_token().is_identifier_name() {
            return Err(self.unexpected());
        }
        let start = self.token_pos();
        let name = self.alloc_str(self.scanner.token_value());
        self.next_token()?;
        Ok(self.alloc(Identifier { span: self.span(start), name }))
    }

    /// Parse an identifier that introduces a binding.
    pub(crate) fn parse_binding_identifier(&mut self) -> ParseResult<&'a Identifier<'a>> {
        if self.current_token() != TokenKind::Identifier {
            return Err(self.unexpected());
        }
        let id = self.parse_identifier_name()?;
        self.check_binding_identifier(id)?;
        Ok(id)
    }

    /// Parse an identifier in expression position.
    pub(crate) fn parse_identifier_reference(&mut self) -> ParseResult<&'a Identifier<'a>> {
        if self.current_token() != TokenKind::Identifier {
            return Err(self.unexpected());
        }
        let id = self.parse_identifier_name()?;
        self.check_identifier_reference(id)?;
        Ok(id)
    }

    /// Reserved word rules shared by references, labels and bindings.
    fn check_reserved(&mut self, id: &Identifier<'a>) -> ParseResult<()> {
        let strict = self.context.is_strict();
        match classify_identifier(id.name) {
            IdentifierClass::Reserved => Err(self.error_at(&messages::ESCAPED_KEYWORD, &[], id.span)),
            IdentifierClass::StrictReserved | IdentifierClass::Let if strict => {
                Err(self.error_at(&messages::STRICT_RESERVED_WORD, &[id.name], id.span))
            }
            IdentifierClass::Yield if self.context.yield_is_reserved() => {
                if self.context.contains(Context::IN_GENERATOR) {
                    Err(self.error_at(&messages::YIELD_AS_IDENTIFIER, &[], id.span))
                } else {
                    Err(self.error_at(&messages::STRICT_RESERVED_WORD, &[id.name], id.span))
                }
            }
            IdentifierClass::Await if self.context.await_is_reserved() => {
                Err(self.error_at(&messages::AWAIT_AS_IDENTIFIER, &[], id.span))
            }
            IdentifierClass::Await => {
                self.cover.await_ident_pos.get_or_insert(id.span.start);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn check_identifier_reference(&mut self, id: &Identifier<'a>) -> ParseResult<()> {
        self.check_reserved(id)?;
        if id.name == "arguments" && self.context.contains(Context::DISALLOW_ARGUMENTS) {
            return Err(self.error_at(&messages::ARGUMENTS_IN_CLASS_BODY, &[], id.span));
        }
        Ok(())
    }

    pub(crate) fn check_binding_identifier(&mut self, id: &Identifier<'a>) -> ParseResult<()> {
        self.check_reserved(id)?;
        if self.context.is_strict() && classify_identifier(id.name) == IdentifierClass::EvalOrArguments {
            return Err(self.error_at(&messages::STRICT_EVAL_ARGUMENTS, &[], id.span));
        }
        Ok(())
    }

    /// Label names follow the reference rules for `yield` and `await`.
    pub(crate) fn check_label_identifier(&mut self, id: &Identifier<'a>) -> ParseResult<()> {
        self.check_reserved(id)
    }

    pub(crate) fn take_cover_positions(&mut self) -> CoverPositions {
        std::mem::take(&mut self.cover)
    }

    /// Fold positions recorded inside a cover back into the outer ones.
    pub(crate) fn merge_cover_positions(&mut self, outer: CoverPositions) {
        self.cover = CoverPositions {
            yield_pos: outer.yield_pos.or(self.cover.yield_pos),
            await_pos: outer.await_pos.or(self.cover.await_pos),
            await_ident_pos: outer.await_ident_pos.or(self.cover.await_ident_pos),
        };
    }

    /// Remove and return the parenthesized targets recorded at or after `start`.
    pub(crate) fn take_parenthesized_targets(&mut self, start: u32) -> Vec<TextSpan> {
        let first = self
            .parenthesized_targets
            .iter()
            .position(|target| target.start >= start)
            .unwrap_or(self.parenthesized_targets.len());
        self.parenthesized_targets.split_off(first)
    }

    // ========================================================================
    // Directive prologues
    // ========================================================================

    /// Parse a statement list that may open with a directive prologue, up to
    /// (not including) `end`. Returns the statements and whether the
    /// prologue contained `"use strict"`, in which case the rest of the list
    /// was parsed as strict code.
    pub(crate) fn parse_directives_and_statements(
        &mut self,
        end: TokenKind,
    ) -> ParseResult<(Vec<Statement<'a>>, bool)> {
        let mut body = Vec::new();
        let mut use_strict = false;
        let mut octal_escape: Option<TextSpan> = None;

        while self.current_token() == TokenKind::StringLiteral {
            let token_span = self.token_span();
            let has_octal_escape = self.scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE);
            let start = self.token_pos();
            let expression = self.parse_expression()?;
            let is_directive = matches!(expression, Expression::Literal(lit)
                if lit.is_string() && lit.span.text_span() == token_span);
            if !is_directive {
                self.consume_semicolon()?;
                body.push(Statement::Expression(self.alloc(ExpressionStatement {
                    span: self.span(start),
                    expression,
                    directive: None,
                })));
                break;
            }

            let source: &'a str = self.source;
            let text = &source[(token_span.start + 1) as usize..(token_span.end - 1) as usize];
            if text == "use strict" {
                if let Some(span) = octal_escape {
                    return Err(ParseError::new(&messages::STRICT_OCTAL_ESCAPE, &[], span));
                }
                use_strict = true;
                self.context |= Context::STRICT;
            }
            if has_octal_escape && octal_escape.is_none() {
                octal_escape = Some(token_span);
            }
            self.consume_semicolon()?;
            body.push(Statement::Expression(self.alloc(ExpressionStatement {
                span: self.span(start),
                expression,
                directive: self.options.directives.then_some(text),
            })));
        }

        while self.current_token() != end {
            body.push(self.parse_statement_list_item()?);
        }
        Ok((body, use_strict))
    }

    // ========================================================================
    // Labels
    // ========================================================================

    /// Mark every label attached to the loop starting at `start`.
    pub(crate) fn mark_loop_labels(&mut self, start: u32) {
        for label in self.labels.iter_mut().rev() {
            if label.statement_start != start {
                break;
            }
            label.is_loop = true;
        }
    }
}

/// Collect the identifiers a binding pattern binds, in source order.
pub(crate) fn collect_bound_names<'a>(pattern: Pattern<'a>, names: &mut Vec<&'a Identifier<'a>>) {
    match pattern {
        Pattern::Identifier(id) => names.push(id),
        Pattern::Object(object) => {
            for member in object.properties {
                match member {
                    ObjectPatternMember::Property(prop) => collect_bound_names(prop.value, names),
                    ObjectPatternMember::Rest(rest) => collect_bound_names(rest.argument, names),
                }
            }
        }
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                collect_bound_names(*element, names);
            }
        }
        Pattern::Rest(rest) => collect_bound_names(rest.argument, names),
        Pattern::Assignment(assign) => collect_bound_names(assign.left, names),
        Pattern::Member(_) => {}
    }
}
