//! Resolution state of one syntax tree.

use std::sync::Arc;

use dashmap::DashMap;
use fir_common::TextRange;
use fir_syntax::{ModifierFlags, NodeIndex, SyntaxKind, SyntaxTree};
use once_cell::sync::OnceCell;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use tracing::debug;

use crate::builder::{NestedRecords, build_declaration_record, build_file_element};
use crate::element::FirElement;
use crate::locality::{is_non_local_declaration, nearest_declaration_ancestor};
use crate::record::{DeclarationRecord, FileRecord};
use crate::scope::{ScopeChain, declaration_level};
use crate::session::ResolutionSession;
use crate::symbol::DeclRef;

type OnceMap<V> = DashMap<NodeIndex, Arc<OnceCell<V>>, FxBuildHasher>;

/// Immutable snapshot of the analysis of one tree.
///
/// Records and scopes are built on first request. Each key has its own
/// `OnceCell`: concurrent requests for the same key wait for one builder, and
/// the map guard is released before building so that a record may request
/// the records of its members.
pub struct ResolutionState {
    tree: Arc<SyntaxTree>,
    file: Arc<FileRecord>,
    scopes: OnceMap<Arc<ScopeChain>>,
    records: OnceMap<Option<Arc<DeclarationRecord>>>,
    file_element: OnceCell<Arc<FirElement>>,
}

impl ResolutionState {
    pub fn new(tree: Arc<SyntaxTree>) -> Self {
        let file = Arc::new(FileRecord::new(&tree));
        debug!(
            tree = %tree.id(),
            file = %tree.file_name(),
            imports = file.imports.len(),
            top_level = file.top_level.len(),
            "created resolution state"
        );
        ResolutionState {
            tree,
            file,
            scopes: DashMap::with_hasher(FxBuildHasher),
            records: DashMap::with_hasher(FxBuildHasher),
            file_element: OnceCell::new(),
        }
    }

    #[inline]
    pub fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }

    #[inline]
    pub fn file_record(&self) -> &Arc<FileRecord> {
        &self.file
    }

    fn cell<V>(map: &OnceMap<V>, node: NodeIndex) -> Arc<OnceCell<V>> {
        Arc::clone(map.entry(node).or_default().value())
    }

    /// Scope chain seen from inside the non-local declaration `node`.
    ///
    /// The file node, and anything that is not a declaration, maps to the
    /// file scope.
    pub fn inner_scope(&self, node: NodeIndex) -> Arc<ScopeChain> {
        if !self.tree.is_declaration(node) {
            return Arc::clone(&self.file.scope);
        }
        let cell = Self::cell(&self.scopes, node);
        Arc::clone(cell.get_or_init(|| {
            self.outer_scope(node)
                .push(declaration_level(&self.tree, node))
        }))
    }

    /// Scope chain around the declaration `node`: the inner scope of its
    /// enclosing declaration, or the file scope.
    pub fn outer_scope(&self, node: NodeIndex) -> Arc<ScopeChain> {
        match nearest_declaration_ancestor(&self.tree, node) {
            Some(parent) => self.inner_scope(parent),
            None => Arc::clone(&self.file.scope),
        }
    }

    pub fn record_for_node(&self, node: NodeIndex) -> Option<Arc<DeclarationRecord>> {
        if !is_non_local_declaration(&self.tree, node) {
            return None;
        }
        let cell = Self::cell(&self.records, node);
        cell.get_or_init(|| {
            build_declaration_record(&self.tree, node, self.inner_scope(node), self).map(Arc::new)
        })
        .clone()
    }

    /// Number of records built so far.
    pub fn cached_record_count(&self) -> usize {
        self.records
            .iter()
            .filter(|entry| entry.value().get().is_some_and(Option::is_some))
            .count()
    }
}

impl NestedRecords for ResolutionState {
    fn nested_record(
        &self,
        node: NodeIndex,
        _outer: &Arc<ScopeChain>,
    ) -> Option<Arc<DeclarationRecord>> {
        self.record_for_node(node)
    }
}

impl ResolutionSession for ResolutionState {
    fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }

    fn file_record(&self) -> &Arc<FileRecord> {
        &self.file
    }

    fn record_for(&self, declaration: DeclRef) -> Option<Arc<DeclarationRecord>> {
        if declaration.tree != self.tree.id() {
            return None;
        }
        self.record_for_node(declaration.node)
    }

    fn file_element(&self) -> Arc<FirElement> {
        Arc::clone(self.file_element.get_or_init(|| {
            let element = build_file_element(&self.tree, &self.file.scope, self);
            Arc::new(element.unwrap_or_else(|| empty_file_element(&self.tree)))
        }))
    }
}

fn empty_file_element(tree: &SyntaxTree) -> FirElement {
    FirElement {
        tree: tree.id(),
        source: tree.root(),
        kind: SyntaxKind::File,
        range: TextRange::empty(0),
        name: None,
        modifiers: ModifierFlags::empty(),
        suppressions: SmallVec::new(),
        resolution: None,
        is_local: false,
        children: Vec::new(),
    }
}
