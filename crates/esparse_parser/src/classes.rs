//! Classes and private names.
//!
//! Each class body opens a private name scope. References to `#x` that the
//! class does not declare move to the enclosing class when the body closes,
//! and are errors once no class is left to declare them.

use esparse_ast::*;
use esparse_binder::{BindingKind, ScopeKind};
use esparse_diagnostics::{messages, ParseResult};
use rustc_hash::FxHashMap;

use crate::context::Context;
use crate::functions::MethodKind as FunctionMethodKind;
use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrivateKind {
    Field,
    Method,
    Getter,
    Setter,
    /// A getter and setter pair.
    Accessor,
}

/// Private names declared and referenced inside one class body.
#[derive(Debug, Default)]
pub(crate) struct PrivateScope<'a> {
    declared: FxHashMap<&'a str, (PrivateKind, bool)>,
    unresolved: Vec<(&'a str, Span)>,
}

/// A non-computed key spelled `name`, as an identifier or a string.
fn is_key_named(key: Expression<'_>, computed: bool, name: &str) -> bool {
    if computed {
        return false;
    }
    match key {
        Expression::Identifier(id) => id.name == name,
        Expression::Literal(lit) => matches!(lit.value, LiteralValue::String(value) if value == name),
        _ => false,
    }
}

impl<'a> Parser<'a> {
    /// `class` declaration or expression. The current token is `class`.
    pub(crate) fn parse_class(&mut self, start: u32, ty: ClassType) -> ParseResult<&'a Class<'a>> {
        let name_required = ty == ClassType::ClassDeclaration;
        self.with_context(Context::STRICT, Context::DISALLOW_IN, |p| p.parse_class_inner(start, ty, name_required))
    }

    /// `export default class [name] { }`.
    pub(crate) fn parse_default_export_class(&mut self, start: u32) -> ParseResult<&'a Class<'a>> {
        self.with_context(Context::STRICT, Context::DISALLOW_IN, |p| {
            p.parse_class_inner(start, ClassType::ClassDeclaration, false)
        })
    }

    fn parse_class_inner(&mut self, start: u32, ty: ClassType, name_required: bool) -> ParseResult<&'a Class<'a>> {
        self.expect(TokenKind::ClassKeyword)?;
        let id = if self.current_token() == TokenKind::Identifier {
            let id = self.parse_binding_identifier()?;
            if ty == ClassType::ClassDeclaration {
                self.declare_name(id.name, BindingKind::Class, id.span)?;
            }
            Some(id)
        } else if name_required {
            return Err(self.unexpected());
        } else {
            None
        };

        let super_class = if self.eat(TokenKind::ExtendsKeyword)? {
            let outer = self.cover_error.take();
            let heritage = self.parse_left_hand_side_expression()?;
            if let Some(error) = self.cover_error.take() {
                return Err(error);
            }
            self.cover_error = outer;
            Some(heritage)
        } else {
            None
        };

        let body_start = self.token_pos();
        self.expect(TokenKind::OpenBraceToken)?;
        self.private_scopes.push(PrivateScope::default());
        let elements = self.parse_class_elements(super_class.is_some());
        let scope = self.private_scopes.pop().unwrap_or_default();
        let elements = elements?;
        self.resolve_private_scope(scope)?;
        self.expect(TokenKind::CloseBraceToken)?;

        let body = self.alloc(ClassBody {
            span: self.span(body_start),
            body: self.alloc_slice(elements),
        });
        Ok(self.alloc(Class {
            ty,
            span: self.span(start),
            id,
            super_class,
            body,
        }))
    }

    fn parse_class_elements(&mut self, derived: bool) -> ParseResult<Vec<ClassElement<'a>>> {
        let mut elements = Vec::new();
        let mut has_constructor = false;
        loop {
            match self.current_token() {
                TokenKind::SemicolonToken => {
                    self.next_token()?;
                }
                TokenKind::CloseBraceToken => break,
                _ => elements.push(self.parse_class_element(derived, &mut has_constructor)?),
            }
        }
        Ok(elements)
    }

    fn parse_class_element(&mut self, derived: bool, has_constructor: &mut bool) -> ParseResult<ClassElement<'a>> {
        let start = self.token_pos();
        let is_static = self.is_contextual("static")
            && !matches!(
                self.peek_token(),
                TokenKind::OpenParenToken | TokenKind::EqualsToken | TokenKind::SemicolonToken | TokenKind::CloseBraceToken
            );
        if is_static {
            self.next_token()?;
            if self.current_token() == TokenKind::OpenBraceToken {
                return self.parse_static_block(start);
            }
        }

        let mut is_async = false;
        let mut generator = false;
        let mut kind = MethodKind::Method;
        if self.is_contextual("async") && self.modifier_followed_by_name(true, true) {
            is_async = true;
            self.next_token()?;
        }
        if self.eat(TokenKind::AsteriskToken)? {
            generator = true;
        }
        if !is_async && !generator && (self.is_contextual("get") || self.is_contextual("set"))
            && self.modifier_followed_by_name(false, false)
        {
            kind = if self.is_contextual("get") { MethodKind::Get } else { MethodKind::Set };
            self.next_token()?;
        }

        let (key, computed, private_name) = if self.current_token() == TokenKind::PrivateName {
            let key_start = self.token_pos();
            let name = self.alloc_str(self.scanner.token_value());
            self.next_token()?;
            let span = self.span(key_start);
            if name == "constructor" {
                return Err(self.error_at(&messages::PRIVATE_CONSTRUCTOR, &[], span));
            }
            let key = Expression::PrivateIdentifier(self.alloc(PrivateIdentifier { span, name }));
            (key, false, Some((name, span)))
        } else {
            let (key, computed) = self.parse_property_key()?;
            (key, computed, None)
        };

        if is_static && is_key_named(key, computed, "prototype") {
            return Err(self.error_at(&messages::STATIC_PROTOTYPE, &[], key.span()));
        }

        let is_method = is_async || generator || kind != MethodKind::Method || self.current_token() == TokenKind::OpenParenToken;
        if !is_method {
            return self.parse_class_field(start, key, computed, is_static, private_name);
        }
        if self.current_token() != TokenKind::OpenParenToken {
            return Err(self.unexpected());
        }

        if !is_static && is_key_named(key, computed, "constructor") {
            let invalid = match kind {
                MethodKind::Get => Some("a getter"),
                MethodKind::Set => Some("a setter"),
                _ if generator => Some("a generator"),
                _ if is_async => Some("an async method"),
                _ => None,
            };
            if let Some(what) = invalid {
                return Err(self.error_at(&messages::INVALID_CONSTRUCTOR, &[what], key.span()));
            }
            if *has_constructor {
                return Err(self.error_at(&messages::DUPLICATE_CONSTRUCTOR, &[], key.span()));
            }
            *has_constructor = true;
            kind = MethodKind::Constructor;
        }

        if let Some((name, span)) = private_name {
            self.require_next("Private methods")?;
            let private_kind = match kind {
                MethodKind::Get => PrivateKind::Getter,
                MethodKind::Set => PrivateKind::Setter,
                _ => PrivateKind::Method,
            };
            self.declare_private_name(name, private_kind, is_static, span)?;
        }

        let method_kind = match kind {
            MethodKind::Constructor => FunctionMethodKind::Constructor { derived },
            MethodKind::Get => FunctionMethodKind::Getter,
            MethodKind::Set => FunctionMethodKind::Setter,
            MethodKind::Method => FunctionMethodKind::Method,
        };
        let value = self.parse_method_function(is_async, generator, method_kind)?;
        Ok(ClassElement::Method(self.alloc(MethodDefinition {
            span: self.span(start),
            key,
            value,
            kind,
            computed,
            is_static,
        })))
    }

    fn parse_class_field(
        &mut self,
        start: u32,
        key: Expression<'a>,
        computed: bool,
        is_static: bool,
        private_name: Option<(&'a str, Span)>,
    ) -> ParseResult<ClassElement<'a>> {
        if is_key_named(key, computed, "constructor") {
            return Err(self.error_at(&messages::FIELD_NAMED_CONSTRUCTOR, &[], key.span()));
        }
        if let Some((name, span)) = private_name {
            self.declare_private_name(name, PrivateKind::Field, is_static, span)?;
        }

        let value = if self.eat(TokenKind::EqualsToken)? {
            let context = (self.context & Context::INHERITED)
                | Context::IN_FUNCTION
                | Context::ALLOW_NEW_TARGET
                | Context::ALLOW_SUPER_PROPERTY
                | Context::DISALLOW_ARGUMENTS;
            Some(self.with_function_boundary(context, |p| p.parse_assignment_expression())?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(ClassElement::Property(self.alloc(PropertyDefinition {
            span: self.span(start),
            key,
            value,
            computed,
            is_static,
        })))
    }

    /// `static { ... }`. The current token is `{`.
    fn parse_static_block(&mut self, start: u32) -> ParseResult<ClassElement<'a>> {
        self.require_next("Class static blocks")?;
        let context = (self.context & Context::INHERITED)
            | Context::IN_CLASS_STATIC_BLOCK
            | Context::ALLOW_NEW_TARGET
            | Context::ALLOW_SUPER_PROPERTY
            | Context::DISALLOW_ARGUMENTS;
        let body = self.with_function_boundary(context, |p| {
            p.enter_scope(ScopeKind::ClassStaticBlock);
            let body = p.parse_static_block_body();
            p.exit_scope();
            body
        })?;
        Ok(ClassElement::StaticBlock(self.alloc(StaticBlock {
            span: self.span(start),
            body: self.alloc_slice(body),
        })))
    }

    fn parse_static_block_body(&mut self) -> ParseResult<Vec<Statement<'a>>> {
        self.expect(TokenKind::OpenBraceToken)?;
        let mut body = Vec::new();
        while self.current_token() != TokenKind::CloseBraceToken {
            body.push(self.parse_statement_list_item()?);
        }
        self.next_token()?;
        Ok(body)
    }

    // ========================================================================
    // Private names
    // ========================================================================

    fn declare_private_name(&mut self, name: &'a str, kind: PrivateKind, is_static: bool, span: Span) -> ParseResult<()> {
        let Some(scope) = self.private_scopes.last() else {
            return Err(self.error_at(&messages::UNEXPECTED_PRIVATE_NAME, &[name], span));
        };
        // A getter and a setter with the same staticness may share a name.
        let merged = match scope.declared.get(name).copied() {
            None => kind,
            Some((PrivateKind::Getter, existing_static)) if kind == PrivateKind::Setter && existing_static == is_static => {
                PrivateKind::Accessor
            }
            Some((PrivateKind::Setter, existing_static)) if kind == PrivateKind::Getter && existing_static == is_static => {
                PrivateKind::Accessor
            }
            Some(_) => return Err(self.error_at(&messages::DUPLICATE_PRIVATE_NAME, &[name], span)),
        };
        if let Some(scope) = self.private_scopes.last_mut() {
            scope.declared.insert(name, (merged, is_static));
        }
        Ok(())
    }

    /// Record a reference to `#name`. It must be declared by some enclosing
    /// class by the time the outermost class body closes.
    pub(crate) fn use_private_name(&mut self, name: &'a str, span: Span) -> ParseResult<()> {
        match self.private_scopes.last_mut() {
            Some(scope) => {
                if !scope.declared.contains_key(name) {
                    scope.unresolved.push((name, span));
                }
                Ok(())
            }
            None => Err(self.error_at(&messages::UNEXPECTED_PRIVATE_NAME, &[name], span)),
        }
    }

    fn resolve_private_scope(&mut self, scope: PrivateScope<'a>) -> ParseResult<()> {
        for (name, span) in scope.unresolved {
            if scope.declared.contains_key(name) {
                continue;
            }
            match self.private_scopes.last_mut() {
                Some(parent) => parent.unresolved.push((name, span)),
                None => return Err(self.error_at(&messages::UNDECLARED_PRIVATE_NAME, &[name], span)),
            }
        }
        Ok(())
    }
}
