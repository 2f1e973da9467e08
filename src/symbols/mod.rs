//! Symbol tables built while recognizing a program.
//!
//! Every program and procedure gets its own [`Scope`]; all of them end up in one
//! [`ScopeCollection`] keyed by name. While recognizing, the [`ScopeStack`] tracks which scopes
//! are open and where the next declaration goes in the innermost one.

pub mod collection;
pub mod scope;
pub mod stack;
pub mod symbol;

pub use collection::{ScopeCollection, ScopeId};
pub use scope::{Scope, SymbolId};
pub use stack::ScopeStack;
pub use symbol::{ScalarType, Symbol, SymbolKind, WORD_SIZE};
