//! Semantic layer of the FIR analysis core.
//!
//! This crate is organized into several submodules:
//! - `symbol` - `Symbol`, `Resolution` and declaration identities
//! - `locality` - local vs. non-local declaration classification
//! - `scope` - persistent scope chains shared between states
//! - `element` - the resolved semantic tree (`FirElement`)
//! - `record` - per-declaration and per-file semantic records
//! - `builder` - resolution of one declaration subtree into elements
//! - `state` - `ResolutionState`, the immutable snapshot of one tree
//! - `session` - the lookup interface shared by original and dependent states

pub mod builder;
pub mod element;
pub mod locality;
pub mod record;
pub mod scope;
pub mod session;
pub mod state;
pub mod symbol;

pub use builder::{NestedRecords, build_declaration_record, build_file_element};
pub use element::{ElementCategory, FirElement, FirNode};
pub use locality::{is_local_class_like, is_non_local_declaration, nearest_declaration_ancestor};
pub use record::{DeclarationRecord, FileRecord, ImportDirective};
pub use scope::{ScopeChain, ScopeKind, ScopeLevel, declaration_level, file_scope};
pub use session::ResolutionSession;
pub use state::ResolutionState;
pub use symbol::{DeclRef, Resolution, Symbol, SymbolKind, SymbolOrigin};

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod scope_tests;
#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;
