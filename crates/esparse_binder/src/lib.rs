//! esparse_binder: Declaration conflict detection.
//!
//! The binder tracks which names each scope declares, and how, while the
//! parser walks the program. It answers a single question per declaration:
//! may this name be declared here with this kind? Redeclarations that the
//! early-error rules forbid come back as a `DuplicateBinding` parse error.
//! Nothing is kept for later name resolution.

mod binder;
mod scope;
mod symbol;

pub use binder::Binder;
pub use scope::{Scope, ScopeKind};
pub use symbol::{BindingKind, SymbolTable};
