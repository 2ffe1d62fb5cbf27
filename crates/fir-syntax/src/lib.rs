//! Syntax trees for the FIR analysis core.
//!
//! Trees are immutable arenas of [`Node`]s addressed by [`NodeIndex`]. Each tree
//! instance carries a process-unique [`TreeId`], so a copy of a file made for
//! speculative analysis is always distinguishable from its original even when
//! the content is identical.
//!
//! Trees are produced through [`TreeBuilder`], which a parser drives with
//! start/finish calls while appending source text.

pub mod base;
pub use base::{NodeIndex, TreeId};

pub mod kind;
pub use kind::SyntaxKind;

pub mod node;
pub use node::{ModifierFlags, Node};

pub mod tree;
pub use tree::{Ancestors, Preorder, SyntaxTree};

pub mod builder;
pub use builder::TreeBuilder;

#[cfg(test)]
#[path = "../tests/tree_tests.rs"]
mod tree_tests;
#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;
