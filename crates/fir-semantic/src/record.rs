//! Semantic records for declarations and files.

use std::sync::Arc;

use fir_common::TextRange;
use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree, TreeId};

use crate::element::{FirElement, FirNode};
use crate::scope::{ScopeChain, file_scope};
use crate::symbol::DeclRef;

/// Resolved analysis of one non-local declaration.
#[derive(Debug)]
pub struct DeclarationRecord {
    pub declaration: DeclRef,
    pub name: String,
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// Scope chain visible inside the declaration: its own level on top of
    /// the scopes of its enclosing declarations.
    pub scope: Arc<ScopeChain>,
    pub element: FirElement,
}

impl DeclarationRecord {
    /// Scopes of the enclosing declarations, shared with their records.
    pub fn outer_scope(&self) -> Option<&Arc<ScopeChain>> {
        self.scope.parent()
    }

    /// Records of non-local declarations nested anywhere inside this one.
    pub fn nested_records(&self) -> Vec<Arc<DeclarationRecord>> {
        let mut nested = Vec::new();
        collect_nested(&self.element, &mut nested);
        nested
    }
}

fn collect_nested(element: &FirElement, out: &mut Vec<Arc<DeclarationRecord>>) {
    for child in &element.children {
        if let FirNode::Declaration(record) = child {
            out.push(Arc::clone(record));
        }
        collect_nested(child.element(), out);
    }
}

/// An import directive of a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDirective {
    pub node: NodeIndex,
    pub path: String,
    pub range: TextRange,
}

/// File-level semantic record: imports, top-level declarations and the file scope.
#[derive(Debug)]
pub struct FileRecord {
    pub tree: TreeId,
    pub file_name: String,
    pub imports: Vec<ImportDirective>,
    pub top_level: Vec<NodeIndex>,
    pub scope: Arc<ScopeChain>,
}

impl FileRecord {
    pub fn new(tree: &SyntaxTree) -> FileRecord {
        let root = tree.root();
        let imports = tree
            .children_of_kind(root, SyntaxKind::Import)
            .filter_map(|node| {
                Some(ImportDirective {
                    node,
                    path: tree.name(node)?.to_string(),
                    range: tree.range(node)?,
                })
            })
            .collect();
        let top_level = tree
            .children(root)
            .iter()
            .copied()
            .filter(|&child| tree.is_declaration(child))
            .collect();
        FileRecord {
            tree: tree.id(),
            file_name: tree.file_name().to_string(),
            imports,
            top_level,
            scope: file_scope(tree),
        }
    }
}
