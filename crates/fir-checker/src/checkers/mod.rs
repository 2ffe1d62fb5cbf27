//! Concrete checkers.
//!
//! Each checker is a unit struct exposed as a `&'static dyn` constant for
//! registration in [`crate::registry`].

pub mod control_flow;
pub mod declaration;
pub mod error_nodes;
pub mod expression;

use fir_semantic::{ElementCategory, FirElement};
use fir_syntax::SyntaxKind;

/// Block body of a function, if any.
pub(crate) fn block_body(function: &FirElement) -> Option<&FirElement> {
    function.child_of_kind(SyntaxKind::Block)
}

/// Body of a function or initializer of a property: the first expression child.
pub(crate) fn body_expression(declaration: &FirElement) -> Option<&FirElement> {
    declaration
        .children()
        .find(|child| child.category() == ElementCategory::Expression)
}

/// Declared return type: a type reference that is a direct child of the function.
pub(crate) fn return_type(function: &FirElement) -> Option<&FirElement> {
    function.child_of_kind(SyntaxKind::TypeReference)
}

pub(crate) fn name_of(element: &FirElement) -> &str {
    element.name().unwrap_or("<anonymous>")
}
