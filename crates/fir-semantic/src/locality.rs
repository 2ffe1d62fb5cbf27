//! Local vs. non-local declarations.
//!
//! Semantic records are indexed by non-local declaration identity, so only
//! non-local declarations can anchor a record or a cross-tree correspondence.

use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree};

/// Whether a class or object is declared below executable code
/// (a function, property initializer, lambda or block).
pub fn is_local_class_like(tree: &SyntaxTree, node: NodeIndex) -> bool {
    tree.ancestors(node)
        .any(|ancestor| tree.kind(ancestor).is_some_and(SyntaxKind::is_code_container))
}

/// Whether `node` is a declaration visible outside its enclosing block:
///
/// - functions, properties and type aliases: top-level, or a direct member of
///   a non-local class or object;
/// - classes and objects: anything not declared below executable code.
pub fn is_non_local_declaration(tree: &SyntaxTree, node: NodeIndex) -> bool {
    let Some(kind) = tree.kind(node) else {
        return false;
    };
    match kind {
        SyntaxKind::Function | SyntaxKind::Property | SyntaxKind::TypeAlias => {
            let parent = tree.parent(node);
            match tree.kind(parent) {
                Some(SyntaxKind::File) => true,
                Some(parent_kind) if parent_kind.is_class_like() => {
                    !is_local_class_like(tree, parent)
                }
                _ => false,
            }
        }
        SyntaxKind::Class | SyntaxKind::Object => !is_local_class_like(tree, node),
        _ => false,
    }
}

/// Nearest strict ancestor that is a declaration of any kind.
pub fn nearest_declaration_ancestor(tree: &SyntaxTree, node: NodeIndex) -> Option<NodeIndex> {
    tree.ancestors(node)
        .find(|&ancestor| tree.is_declaration(ancestor))
}
