//! Interned binding names.
//!
//! Scope lookups compare names on every declaration; interning reduces those
//! comparisons to `u32` equality. Each parse owns its own interner.

use lasso::{Rodeo, Spur};
use std::fmt;

/// Handle to a name stored in a [`NameInterner`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Name(Spur);

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Name").field(&self.0).finish()
    }
}

/// Single-threaded interner backed by `lasso::Rodeo`.
#[derive(Default)]
pub struct NameInterner {
    names: Rodeo,
}

impl NameInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, reusing the existing handle if it was seen before.
    #[inline]
    pub fn intern(&mut self, name: &str) -> Name {
        Name(self.names.get_or_intern(name))
    }

    /// The handle for `name` if it has been interned; never allocates.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Name> {
        self.names.get(name).map(Name)
    }

    #[inline]
    pub fn resolve(&self, name: Name) -> &str {
        self.names.resolve(&name.0)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Debug for NameInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameInterner({} names)", self.len())
    }
}
