//! Low-level resolution of speculative copies.
//!
//! IDE features such as completion analyse a copy of a file with an edit
//! applied. Re-resolving the whole copy is wasteful: everything outside the
//! edited declaration is unchanged. This crate
//!
//! - finds the innermost non-local declaration around a position in the copy
//!   and the chain of original declarations it corresponds to
//!   ([`correspondence`]),
//! - builds a [`DependentResolutionState`] that re-resolves only that
//!   declaration against the copy and answers everything else from the
//!   original [`fir_semantic::ResolutionState`] ([`dependent`]),
//! - wraps both steps behind [`LowLevelFacade`] with cancellation and tracing.

pub mod correspondence;
pub mod dependent;
pub mod error;
pub mod facade;

pub use correspondence::{
    CorrespondenceLink, CorrespondenceMap, find_enclosing_non_local_declaration,
    resolve_correspondence, resolve_correspondence_at_offset,
};
pub use dependent::{DependentResolutionState, EditShift};
pub use error::{ResolveError, Result};
pub use facade::{LowLevelFacade, ResolveOptions};

#[cfg(test)]
#[path = "../tests/correspondence_tests.rs"]
mod correspondence_tests;
