//! Scope records for the binder.

use crate::symbol::SymbolTable;

/// The kind of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Top level of a script.
    Script,
    /// Top level of a module.
    Module,
    /// Parameters and top-level body of a function.
    Function,
    /// A class `static { }` block.
    ClassStaticBlock,
    /// A block, `switch` body or loop head.
    Block,
    /// A catch clause: its parameter and its body.
    Catch,
}

impl ScopeKind {
    /// Whether `var` declarations stop at this scope.
    pub fn is_var_scope(self) -> bool {
        matches!(
            self,
            ScopeKind::Script | ScopeKind::Module | ScopeKind::Function | ScopeKind::ClassStaticBlock
        )
    }
}

/// A scope in the binding phase.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Lexically scoped names, parameters and catch parameters.
    pub lexical: SymbolTable,
    /// `var` names declared here or hoisted through this scope, plus
    /// functions declared directly in a script or function body.
    pub vars: SymbolTable,
    /// Sloppy web-compatible code, where a block may repeat a plain
    /// function declaration.
    pub annex_b: bool,
}

impl Scope {
    pub fn new(kind: ScopeKind, annex_b: bool) -> Self {
        Self {
            kind,
            lexical: SymbolTable::new(),
            vars: SymbolTable::new(),
            annex_b,
        }
    }
}
