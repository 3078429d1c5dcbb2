//! Binding kinds and the per-scope name table.

use esparse_core::intern::Name;
use rustc_hash::FxHashMap;

/// How a name was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Var,
    /// A `var` declared in the head of a `for ... of` loop.
    ForOfVar,
    Let,
    Const,
    Class,
    /// A plain `function` declaration.
    Function,
    /// An `async` or generator function declaration.
    AsyncOrGeneratorFunction,
    Parameter,
    /// A catch parameter written as a single identifier.
    CatchParameter,
    /// A catch parameter written as a destructuring pattern.
    CatchPattern,
    Import,
}

impl BindingKind {
    pub fn is_var(self) -> bool {
        matches!(self, BindingKind::Var | BindingKind::ForOfVar)
    }

    pub fn is_function(self) -> bool {
        matches!(self, BindingKind::Function | BindingKind::AsyncOrGeneratorFunction)
    }
}

/// A symbol table maps names to how they were declared.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    table: FxHashMap<Name, BindingKind>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &Name) -> Option<BindingKind> {
        self.table.get(name).copied()
    }

    pub fn set(&mut self, name: Name, kind: BindingKind) {
        self.table.insert(name, kind);
    }

    pub fn has(&self, name: &Name) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
