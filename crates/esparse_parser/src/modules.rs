//! Import and export declarations.

use esparse_ast::*;
use esparse_binder::BindingKind;
use esparse_diagnostics::{messages, ParseError, ParseResult};

use crate::context::Context;
use crate::functions::FunctionKind;
use crate::parser::{collect_bound_names, Parser};

impl<'a> Parser<'a> {
    // ========================================================================
    // Imports
    // ========================================================================

    /// The current token is `import`.
    pub(crate) fn parse_import_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.next_token()?;

        let mut specifiers = Vec::new();
        if self.current_token() != TokenKind::StringLiteral {
            let mut needs_clause = true;
            if self.current_token() == TokenKind::Identifier {
                let local = self.parse_binding_identifier()?;
                self.declare_name(local.name, BindingKind::Import, local.span)?;
                specifiers.push(ImportDeclarationSpecifier::Default(self.alloc(ImportDefaultSpecifier {
                    span: local.span,
                    local,
                })));
                needs_clause = self.eat(TokenKind::CommaToken)?;
            }
            if needs_clause {
                match self.current_token() {
                    TokenKind::AsteriskToken => specifiers.push(self.parse_import_namespace()?),
                    TokenKind::OpenBraceToken => self.parse_named_imports(&mut specifiers)?,
                    _ => return Err(self.unexpected()),
                }
            }
            self.expect_contextual("from")?;
        }
        let source = self.parse_module_source()?;
        self.consume_semicolon()?;
        tracing::trace!(specifiers = specifiers.len(), source = ?source.value, "import");

        Ok(Statement::Import(self.alloc(ImportDeclaration {
            span: self.span(start),
            specifiers: self.alloc_slice(specifiers),
            source,
        })))
    }

    /// `* as name`.
    fn parse_import_namespace(&mut self) -> ParseResult<ImportDeclarationSpecifier<'a>> {
        let start = self.token_pos();
        self.next_token()?;
        self.expect_contextual("as")?;
        let local = self.parse_binding_identifier()?;
        self.declare_name(local.name, BindingKind::Import, local.span)?;
        Ok(ImportDeclarationSpecifier::Namespace(self.alloc(ImportNamespaceSpecifier {
            span: self.span(start),
            local,
        })))
    }

    /// `{ a, b as c, "d" as e }`.
    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportDeclarationSpecifier<'a>>) -> ParseResult<()> {
        self.expect(TokenKind::OpenBraceToken)?;
        while self.current_token() != TokenKind::CloseBraceToken {
            let start = self.token_pos();
            let imported_token = self.current_token();
            let imported = self.parse_module_export_name()?;
            let local = if self.is_contextual("as") {
                self.next_token()?;
                self.parse_binding_identifier()?
            } else {
                // Without `as`, the imported name is also the local binding.
                match imported {
                    ModuleExportName::Identifier(id) if imported_token == TokenKind::Identifier => {
                        self.check_binding_identifier(id)?;
                        id
                    }
                    ModuleExportName::Identifier(id) => {
                        return Err(self.error_at(&messages::UNEXPECTED_RESERVED_WORD, &[id.name], id.span));
                    }
                    ModuleExportName::Literal(_) => return Err(self.unexpected()),
                }
            };
            self.declare_name(local.name, BindingKind::Import, local.span)?;
            specifiers.push(ImportDeclarationSpecifier::Named(self.alloc(ImportSpecifier {
                span: self.span(start),
                local,
                imported,
            })));
            if !self.eat(TokenKind::CommaToken)? {
                break;
            }
        }
        self.expect(TokenKind::CloseBraceToken)
    }

    fn parse_module_source(&mut self) -> ParseResult<&'a Literal<'a>> {
        if self.current_token() != TokenKind::StringLiteral {
            return Err(self.unexpected());
        }
        self.parse_literal()
    }

    /// An IdentifierName or a string literal naming an import or export.
    fn parse_module_export_name(&mut self) -> ParseResult<ModuleExportName<'a>> {
        if self.current_token() == TokenKind::StringLiteral {
            Ok(ModuleExportName::Literal(self.parse_literal()?))
        } else {
            Ok(ModuleExportName::Identifier(self.parse_identifier_name()?))
        }
    }

    // ========================================================================
    // Exports
    // ========================================================================

    /// The current token is `export`.
    pub(crate) fn parse_export_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        self.next_token()?;

        match self.current_token() {
            TokenKind::AsteriskToken => self.parse_export_all(start),
            TokenKind::DefaultKeyword => self.parse_export_default(start),
            TokenKind::OpenBraceToken => self.parse_export_named_list(start),
            _ => {
                let declaration = self.parse_exported_declaration()?;
                Ok(Statement::ExportNamed(self.alloc(ExportNamedDeclaration {
                    span: self.span(start),
                    declaration: Some(declaration),
                    specifiers: &[],
                    source: None,
                })))
            }
        }
    }

    /// `export * from "m"` or `export * as name from "m"`.
    fn parse_export_all(&mut self, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let exported = if self.is_contextual("as") {
            self.next_token()?;
            let name = self.parse_module_export_name()?;
            self.add_export(name.name(), name.span())?;
            Some(name)
        } else {
            None
        };
        self.expect_contextual("from")?;
        let source = self.parse_module_source()?;
        self.consume_semicolon()?;
        Ok(Statement::ExportAll(self.alloc(ExportAllDeclaration {
            span: self.span(start),
            exported,
            source,
        })))
    }

    fn parse_export_default(&mut self, start: u32) -> ParseResult<Statement<'a>> {
        self.add_export("default", self.make_span(self.token_pos(), self.token_end()))?;
        self.next_token()?;

        let decl_start = self.token_pos();
        let async_function = self.is_contextual("async") && self.async_function_follows();
        let declaration = match self.current_token() {
            TokenKind::FunctionKeyword => {
                ExportDefaultKind::Function(self.parse_function(decl_start, false, FunctionKind::DefaultExport)?)
            }
            TokenKind::Identifier if async_function => {
                self.next_token()?;
                ExportDefaultKind::Function(self.parse_function(decl_start, true, FunctionKind::DefaultExport)?)
            }
            TokenKind::ClassKeyword => ExportDefaultKind::Class(self.parse_default_export_class(decl_start)?),
            _ => {
                let expression = self.parse_assignment_expression()?;
                self.consume_semicolon()?;
                ExportDefaultKind::Expression(expression)
            }
        };
        Ok(Statement::ExportDefault(self.alloc(ExportDefaultDeclaration {
            span: self.span(start),
            declaration,
        })))
    }

    /// `export { a, b as c } [from "m"]`.
    fn parse_export_named_list(&mut self, start: u32) -> ParseResult<Statement<'a>> {
        self.expect(TokenKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        let mut local_tokens = Vec::new();
        while self.current_token() != TokenKind::CloseBraceToken {
            let spec_start = self.token_pos();
            local_tokens.push(self.current_token());
            let local = self.parse_module_export_name()?;
            let exported = if self.is_contextual("as") {
                self.next_token()?;
                self.parse_module_export_name()?
            } else {
                local
            };
            specifiers.push(ExportSpecifier {
                span: self.span(spec_start),
                local,
                exported,
            });
            if !self.eat(TokenKind::CommaToken)? {
                break;
            }
        }
        self.expect(TokenKind::CloseBraceToken)?;

        let source = if self.is_contextual("from") {
            self.next_token()?;
            Some(self.parse_module_source()?)
        } else {
            None
        };

        // Local names only refer to bindings when not re-exporting.
        if source.is_none() {
            for (spec, token) in specifiers.iter().zip(local_tokens) {
                match spec.local {
                    ModuleExportName::Literal(lit) => {
                        return Err(self.error_at(&messages::MODULE_EXPORT_NAME_STRING, &[], lit.span));
                    }
                    ModuleExportName::Identifier(id) if token != TokenKind::Identifier => {
                        return Err(self.error_at(&messages::UNEXPECTED_RESERVED_WORD, &[id.name], id.span));
                    }
                    ModuleExportName::Identifier(id) => {
                        self.check_identifier_reference(id)?;
                        self.export_references.push((id.name, id.span.text_span()));
                    }
                }
            }
        }
        for spec in &specifiers {
            self.add_export(spec.exported.name(), spec.exported.span())?;
        }
        self.consume_semicolon()?;

        Ok(Statement::ExportNamed(self.alloc(ExportNamedDeclaration {
            span: self.span(start),
            declaration: None,
            specifiers: self.alloc_slice(specifiers),
            source,
        })))
    }

    /// `export var|let|const|function|class ...`.
    fn parse_exported_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.token_pos();
        let declaration = match self.current_token() {
            TokenKind::VarKeyword => self.parse_variable_statement(VariableKind::Var)?,
            TokenKind::ConstKeyword => self.parse_variable_statement(VariableKind::Const)?,
            TokenKind::Identifier if self.is_contextual("let") => self.parse_variable_statement(VariableKind::Let)?,
            TokenKind::FunctionKeyword => {
                Statement::FunctionDeclaration(self.parse_function(start, false, FunctionKind::Declaration)?)
            }
            TokenKind::Identifier if self.is_contextual("async") && self.async_function_follows() => {
                self.next_token()?;
                Statement::FunctionDeclaration(self.parse_function(start, true, FunctionKind::Declaration)?)
            }
            TokenKind::ClassKeyword => Statement::ClassDeclaration(self.parse_class(start, ClassType::ClassDeclaration)?),
            _ => return Err(self.unexpected()),
        };

        let mut names = Vec::new();
        match declaration {
            Statement::VariableDeclaration(decl) => {
                for declarator in decl.declarations {
                    collect_bound_names(declarator.id, &mut names);
                }
            }
            Statement::FunctionDeclaration(function) => names.extend(function.id),
            Statement::ClassDeclaration(class) => names.extend(class.id),
            _ => {}
        }
        for id in names {
            self.add_export(id.name, id.span)?;
        }
        Ok(declaration)
    }

    fn add_export(&mut self, name: &'a str, span: Span) -> ParseResult<()> {
        if self.exported_names.insert(name) {
            Ok(())
        } else {
            Err(self.error_at(&messages::DUPLICATE_EXPORT, &[name], span))
        }
    }

    /// Every `export { name }` must name a top-level declaration. Only
    /// checked when redeclaration tracking is on, since it relies on the
    /// binder's scopes.
    pub(crate) fn check_export_references(&self) -> ParseResult<()> {
        if !self.context.contains(Context::LEXICAL) {
            return Ok(());
        }
        for &(name, span) in &self.export_references {
            if !self.binder.is_declared_at_top_level(name) {
                return Err(ParseError::new(&messages::UNDECLARED_EXPORT, &[name], span));
            }
        }
        Ok(())
    }
}
