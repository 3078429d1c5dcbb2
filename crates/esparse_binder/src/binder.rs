//! The binder implementation.
//!
//! Keeps a stack of scopes mirroring the parser's position and applies the
//! redeclaration rules:
//! - `var` hoists to the nearest function, static block, script or module
//!   scope and conflicts with any lexical binding it passes on the way
//! - `let`, `const`, `class` and block-level functions conflict with every
//!   other binding of the same name in their scope, including hoisted vars
//! - functions directly in a script or function body behave like `var`
//! - a simple catch parameter may be redeclared by `var`, except in a
//!   `for ... of` head

use crate::scope::{Scope, ScopeKind};
use crate::symbol::BindingKind;
use esparse_core::intern::{Name, NameInterner};
use esparse_core::TextSpan;
use esparse_diagnostics::{messages, ParseError, ParseResult};

/// Tracks declarations per scope while the parser walks the program.
pub struct Binder {
    scopes: Vec<Scope>,
    interner: NameInterner,
}

impl Binder {
    /// Create a binder whose outermost scope has the given kind.
    pub fn new(top_level: ScopeKind) -> Self {
        Self {
            scopes: vec![Scope::new(top_level, false)],
            interner: NameInterner::new(),
        }
    }

    pub fn enter_scope(&mut self, kind: ScopeKind, annex_b: bool) {
        self.scopes.push(Scope::new(kind, annex_b));
    }

    pub fn exit_scope(&mut self) {
        // The outermost scope lives as long as the binder.
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn current_kind(&self) -> Option<ScopeKind> {
        self.scopes.last().map(|s| s.kind)
    }

    /// Declare `name` in the current scope.
    pub fn declare(&mut self, name: &str, kind: BindingKind, span: TextSpan) -> ParseResult<()> {
        let key = self.interner.intern(name);
        let ok = match kind {
            BindingKind::Var | BindingKind::ForOfVar => self.declare_var(key, kind),
            BindingKind::Parameter => self.declare_parameter(key),
            BindingKind::Function | BindingKind::AsyncOrGeneratorFunction if self.function_is_var_like() => {
                self.declare_var_like_function(key, kind)
            }
            _ => self.declare_lexical(key, kind),
        };
        if ok {
            Ok(())
        } else {
            tracing::debug!(name, ?kind, "redeclaration");
            Err(ParseError::new(&messages::DUPLICATE_BINDING, &[name], span))
        }
    }

    /// Whether `name` is bound in the outermost scope.
    pub fn is_declared_at_top_level(&self, name: &str) -> bool {
        let Some(key) = self.interner.lookup(name) else {
            return false;
        };
        self.scopes
            .first()
            .map_or(false, |top| top.lexical.has(&key) || top.vars.has(&key))
    }

    fn function_is_var_like(&self) -> bool {
        matches!(
            self.current_kind(),
            Some(ScopeKind::Script | ScopeKind::Function | ScopeKind::ClassStaticBlock)
        )
    }

    fn declare_var(&mut self, key: Name, kind: BindingKind) -> bool {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(existing) = scope.lexical.get(&key) {
                let allowed = match existing {
                    BindingKind::Parameter => true,
                    BindingKind::CatchParameter => kind != BindingKind::ForOfVar,
                    _ => false,
                };
                if !allowed {
                    return false;
                }
            }
            scope.vars.set(key, kind);
            if scope.kind.is_var_scope() {
                break;
            }
        }
        true
    }

    fn declare_parameter(&mut self, key: Name) -> bool {
        let Some(scope) = self.scopes.last_mut() else {
            return true;
        };
        // Repeated parameter names are checked by the parser.
        if !scope.lexical.has(&key) {
            scope.lexical.set(key, BindingKind::Parameter);
        }
        true
    }

    fn declare_var_like_function(&mut self, key: Name, kind: BindingKind) -> bool {
        let Some(scope) = self.scopes.last_mut() else {
            return true;
        };
        match scope.lexical.get(&key) {
            None | Some(BindingKind::Parameter) => {
                scope.vars.set(key, kind);
                true
            }
            Some(_) => false,
        }
    }

    fn declare_lexical(&mut self, key: Name, kind: BindingKind) -> bool {
        let Some(scope) = self.scopes.last_mut() else {
            return true;
        };
        if let Some(existing) = scope.lexical.get(&key) {
            let repeated_block_function =
                scope.annex_b && kind == BindingKind::Function && existing == BindingKind::Function;
            if !repeated_block_function {
                return false;
            }
        }
        if scope.vars.has(&key) {
            return false;
        }
        scope.lexical.set(key, kind);
        true
    }
}
