//! Resolution state for a speculative copy of one declaration.

use std::cell::RefCell;
use std::sync::Arc;

use fir_common::TextRange;
use fir_semantic::{
    DeclRef, DeclarationRecord, FileRecord, FirElement, FirNode, NestedRecords,
    ResolutionSession, ResolutionState, ScopeChain, build_declaration_record, declaration_level,
};
use fir_syntax::{NodeIndex, SyntaxTree};
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::correspondence::CorrespondenceMap;
use crate::error::{ResolveError, Result};
use crate::facade::ResolveOptions;

/// Builds records for non-local declarations nested in the replaced one.
struct CopyRecords<'a> {
    tree: &'a SyntaxTree,
    built: RefCell<FxHashMap<NodeIndex, Arc<DeclarationRecord>>>,
}

impl NestedRecords for CopyRecords<'_> {
    fn nested_record(
        &self,
        node: NodeIndex,
        outer: &Arc<ScopeChain>,
    ) -> Option<Arc<DeclarationRecord>> {
        let scope = outer.push(declaration_level(self.tree, node));
        let record = Arc::new(build_declaration_record(self.tree, node, scope, self)?);
        self.built.borrow_mut().insert(node, Arc::clone(&record));
        Some(record)
    }
}

/// Offset translation between the original and the copy around the replaced
/// declaration. Offsets before its end are identical in both trees; offsets
/// at or after it move by the length change of the declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditShift {
    pub original_end: u32,
    pub copy_end: u32,
}

impl EditShift {
    pub fn new(original: TextRange, copy: TextRange) -> Self {
        EditShift {
            original_end: original.end,
            copy_end: copy.end,
        }
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self.original_end == self.copy_end
    }

    pub fn to_copy(self, offset: u32) -> u32 {
        if offset >= self.original_end {
            offset - self.original_end + self.copy_end
        } else {
            offset
        }
    }

    pub fn to_original(self, offset: u32) -> u32 {
        if offset >= self.copy_end {
            offset - self.copy_end + self.original_end
        } else {
            offset
        }
    }

    pub fn range_to_copy(self, range: TextRange) -> TextRange {
        TextRange::new(self.to_copy(range.start), self.to_copy(range.end))
    }
}

/// A [`ResolutionState`] overlay for a copied tree.
///
/// The deepest corresponding declaration is re-resolved against the copy; its
/// outer scope chain is taken from the parent state, so imports, enclosing
/// type parameters and outer receivers are shared rather than rebuilt. Every
/// other lookup is answered by the parent.
pub struct DependentResolutionState {
    parent: Arc<ResolutionState>,
    copy: Arc<SyntaxTree>,
    correspondence: CorrespondenceMap,
    replaced: Arc<DeclarationRecord>,
    nested: FxHashMap<NodeIndex, Arc<DeclarationRecord>>,
    shift: EditShift,
    file_element: OnceCell<Arc<FirElement>>,
}

impl DependentResolutionState {
    pub fn build(
        parent: Arc<ResolutionState>,
        copy: Arc<SyntaxTree>,
        correspondence: CorrespondenceMap,
        options: &ResolveOptions,
    ) -> Result<Self> {
        let link = correspondence.deepest();
        let original = parent.tree();
        if copy.id() == original.id() {
            return Err(ResolveError::contract(
                format!(
                    "replaced declaration belongs to the parent tree {}",
                    original.id()
                ),
                copy.excerpt(link.copy, options.excerpt_length),
            ));
        }
        if correspondence.copy_tree() != copy.id()
            || correspondence.original_tree() != original.id()
        {
            return Err(ResolveError::contract(
                format!(
                    "correspondence links {} to {}, expected {} to {}",
                    correspondence.copy_tree(),
                    correspondence.original_tree(),
                    copy.id(),
                    original.id()
                ),
                copy.excerpt(link.copy, options.excerpt_length),
            ));
        }

        let (Some(original_range), Some(copy_range)) =
            (original.range(link.original), copy.range(link.copy))
        else {
            return Err(ResolveError::contract(
                format!("{} node {} has no source range", link.kind, link.copy),
                copy.excerpt(link.copy, options.excerpt_length),
            ));
        };
        let shift = EditShift::new(original_range, copy_range);

        let outer = parent.outer_scope(link.original);
        let scope = outer.push(declaration_level(&copy, link.copy));
        let records = CopyRecords {
            tree: &copy,
            built: RefCell::new(FxHashMap::default()),
        };
        let replaced = build_declaration_record(&copy, link.copy, scope, &records)
            .map(Arc::new)
            .ok_or_else(|| {
                ResolveError::contract(
                    format!("{} node {} is not a named declaration", link.kind, link.copy),
                    copy.excerpt(link.copy, options.excerpt_length),
                )
            })?;
        let nested = records.built.into_inner();

        debug!(
            copy = %copy.id(),
            original = %original.id(),
            declaration = %replaced.name,
            kind = %link.kind,
            nested = nested.len(),
            reused_scope_depth = outer.depth(),
            shift = i64::from(shift.copy_end) - i64::from(shift.original_end),
            "built dependent resolution state"
        );

        Ok(DependentResolutionState {
            parent,
            copy,
            correspondence,
            replaced,
            nested,
            shift,
            file_element: OnceCell::new(),
        })
    }

    #[inline]
    pub fn parent(&self) -> &Arc<ResolutionState> {
        &self.parent
    }

    #[inline]
    pub fn copy_tree(&self) -> &Arc<SyntaxTree> {
        &self.copy
    }

    #[inline]
    pub fn replaced_record(&self) -> &Arc<DeclarationRecord> {
        &self.replaced
    }

    #[inline]
    pub fn correspondence(&self) -> &CorrespondenceMap {
        &self.correspondence
    }

    #[inline]
    pub fn shift(&self) -> EditShift {
        self.shift
    }

    /// Records rebuilt for non-local declarations inside the replaced one.
    pub fn nested_record_count(&self) -> usize {
        self.nested.len()
    }

    /// Original declaration standing for a copy-side declaration outside the
    /// replaced subtree.
    fn original_for(&self, node: NodeIndex) -> Option<NodeIndex> {
        if let Some(original) = self.correspondence.original_of(node) {
            return Some(original);
        }
        let syntax = self.copy.get(node)?;
        let original = self.parent.tree();
        let candidate = original.declaration_at(self.shift.to_original(syntax.pos), syntax.kind)?;
        (original.name(candidate) == self.copy.name(node)).then_some(candidate)
    }

    /// The parent's file element in copy coordinates with the replaced record
    /// spliced in. Declarations outside the edit keep their original identity.
    fn merged_file_element(&self) -> FirElement {
        let mut parent_file = FirElement::clone(&*self.parent.file_element());
        if !self.shift.is_identity() {
            shift_element(&mut parent_file, self.shift);
        }
        // Original declarations from the top-level one down to the replaced one.
        let path: Vec<NodeIndex> = self
            .correspondence
            .links()
            .iter()
            .rev()
            .map(|link| link.original)
            .collect();
        replace_along(&parent_file, &path, &self.replaced)
    }
}

/// Move every range at or after the edit into copy coordinates. Subtrees that
/// end before the edit are left alone, declaration records among them stay
/// shared with the parent.
fn shift_element(element: &mut FirElement, shift: EditShift) {
    if element.range.end < shift.original_end {
        return;
    }
    element.range = shift.range_to_copy(element.range);
    for child in &mut element.children {
        match child {
            FirNode::Element(inline) => shift_element(inline, shift),
            FirNode::Declaration(record) => {
                if record.range.end < shift.original_end {
                    continue;
                }
                let mut moved = record.element.clone();
                shift_element(&mut moved, shift);
                *record = Arc::new(DeclarationRecord {
                    declaration: record.declaration,
                    name: record.name.clone(),
                    kind: record.kind,
                    range: shift.range_to_copy(record.range),
                    scope: Arc::clone(&record.scope),
                    element: moved,
                });
            }
        }
    }
}

/// Copy `element`, swapping the record at the end of `path` for `replacement`.
/// Only records on the path are copied; siblings stay shared.
fn replace_along(
    element: &FirElement,
    path: &[NodeIndex],
    replacement: &Arc<DeclarationRecord>,
) -> FirElement {
    let mut copied = element.clone();
    let Some((&next, rest)) = path.split_first() else {
        return copied;
    };
    for child in &mut copied.children {
        let FirNode::Declaration(record) = child else {
            continue;
        };
        if record.declaration.node != next {
            continue;
        }
        *child = if rest.is_empty() {
            FirNode::Declaration(Arc::clone(replacement))
        } else {
            FirNode::Declaration(Arc::new(DeclarationRecord {
                declaration: record.declaration,
                name: record.name.clone(),
                kind: record.kind,
                range: record.range,
                scope: Arc::clone(&record.scope),
                element: replace_along(&record.element, rest, replacement),
            }))
        };
        break;
    }
    copied
}

impl ResolutionSession for DependentResolutionState {
    fn tree(&self) -> &Arc<SyntaxTree> {
        &self.copy
    }

    fn file_record(&self) -> &Arc<FileRecord> {
        self.parent.file_record()
    }

    fn record_for(&self, declaration: DeclRef) -> Option<Arc<DeclarationRecord>> {
        if declaration.tree != self.copy.id() {
            return self.parent.record_for(declaration);
        }
        let node = declaration.node;
        let replaced_root = self.replaced.declaration.node;
        if node == replaced_root {
            return Some(Arc::clone(&self.replaced));
        }
        if let Some(record) = self.nested.get(&node) {
            return Some(Arc::clone(record));
        }
        if self.copy.is_ancestor_or_self(replaced_root, node) {
            // Local to the replaced declaration.
            return None;
        }
        let original = self.original_for(node)?;
        self.parent.record_for_node(original)
    }

    fn file_element(&self) -> Arc<FirElement> {
        Arc::clone(
            self.file_element
                .get_or_init(|| Arc::new(self.merged_file_element())),
        )
    }
}
