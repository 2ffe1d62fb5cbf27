//! Matching declarations of a copied tree against the original tree.
//!
//! The copy is an edited clone of the original file. Declarations outside the
//! edit keep their offsets, so a copied non-local declaration and each of its
//! non-local ancestors can be paired with the original declaration of the
//! same kind at the same start offset. Links are kept in a side map keyed by
//! copy-side arena index; tree nodes are never annotated.

use fir_common::limits::MAX_DECLARATION_NESTING;
use fir_semantic::is_non_local_declaration;
use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree, TreeId};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{ResolveError, Result};
use crate::facade::ResolveOptions;

/// One matched declaration pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorrespondenceLink {
    pub kind: SyntaxKind,
    pub offset: u32,
    pub copy: NodeIndex,
    pub original: NodeIndex,
}

/// Chain of links from the deepest enclosing non-local declaration of the
/// copy up to its top-level ancestor. Never empty.
#[derive(Clone, Debug)]
pub struct CorrespondenceMap {
    copy_tree: TreeId,
    original_tree: TreeId,
    deepest: CorrespondenceLink,
    links: Vec<CorrespondenceLink>,
    by_copy: FxHashMap<NodeIndex, NodeIndex>,
}

impl CorrespondenceMap {
    fn new(
        copy_tree: TreeId,
        original_tree: TreeId,
        deepest: CorrespondenceLink,
        links: Vec<CorrespondenceLink>,
    ) -> Self {
        let by_copy = links.iter().map(|link| (link.copy, link.original)).collect();
        CorrespondenceMap {
            copy_tree,
            original_tree,
            deepest,
            links,
            by_copy,
        }
    }

    #[inline]
    pub fn copy_tree(&self) -> TreeId {
        self.copy_tree
    }

    #[inline]
    pub fn original_tree(&self) -> TreeId {
        self.original_tree
    }

    /// The innermost pair: the declaration that will be re-resolved.
    #[inline]
    pub fn deepest(&self) -> CorrespondenceLink {
        self.deepest
    }

    /// Links from deepest to outermost.
    pub fn links(&self) -> &[CorrespondenceLink] {
        &self.links
    }

    pub fn outermost(&self) -> CorrespondenceLink {
        self.links.last().copied().unwrap_or(self.deepest)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Original counterpart of a linked copy-side declaration.
    pub fn original_of(&self, copy: NodeIndex) -> Option<NodeIndex> {
        self.by_copy.get(&copy).copied()
    }
}

/// Innermost declaration at or above `node` that is visible outside its
/// enclosing body.
pub fn find_enclosing_non_local_declaration(
    tree: &SyntaxTree,
    node: NodeIndex,
    options: &ResolveOptions,
) -> Result<NodeIndex> {
    tree.ancestors_with_self(node)
        .find(|&ancestor| is_non_local_declaration(tree, ancestor))
        .ok_or_else(|| {
            ResolveError::contract(
                format!(
                    "no enclosing non-local declaration for {} node {node}",
                    tree.kind(node).map_or("missing", SyntaxKind::as_str)
                ),
                tree.excerpt(node, options.excerpt_length),
            )
        })
}

/// Pair the non-local declaration chain around `node` in `copy` with `original`.
pub fn resolve_correspondence(
    copy: &SyntaxTree,
    original: &SyntaxTree,
    node: NodeIndex,
    options: &ResolveOptions,
) -> Result<CorrespondenceMap> {
    if copy.id() == original.id() {
        return Err(ResolveError::contract(
            format!("copy and original are the same tree instance ({})", copy.id()),
            copy.excerpt(node, options.excerpt_length),
        ));
    }

    let deepest = find_enclosing_non_local_declaration(copy, node, options)?;

    // Every declaration above a non-local declaration is itself non-local.
    let mut links = Vec::new();
    for level in copy
        .ancestors_with_self(deepest)
        .filter(|&ancestor| copy.is_declaration(ancestor))
    {
        if links.len() >= MAX_DECLARATION_NESTING as usize {
            return Err(ResolveError::contract(
                format!("declaration nesting exceeds {MAX_DECLARATION_NESTING}"),
                copy.excerpt(deepest, options.excerpt_length),
            ));
        }
        let Some(syntax) = copy.get(level) else {
            continue;
        };
        let (kind, offset) = (syntax.kind, syntax.pos);
        let matched = original.declaration_at(offset, kind).ok_or_else(|| {
            ResolveError::CorrespondenceNotFound {
                kind,
                offset,
                context: copy.excerpt(level, options.excerpt_length),
            }
        })?;
        trace!(%kind, offset, copy = %level, original = %matched, "linked declaration");
        links.push(CorrespondenceLink {
            kind,
            offset,
            copy: level,
            original: matched,
        });
    }

    let first = links.first().copied().ok_or_else(|| {
        ResolveError::contract(
            "enclosing declaration has no kind",
            copy.excerpt(deepest, options.excerpt_length),
        )
    })?;
    debug!(
        copy = %copy.id(),
        original = %original.id(),
        depth = links.len(),
        "resolved correspondence"
    );
    Ok(CorrespondenceMap::new(copy.id(), original.id(), first, links))
}

/// [`resolve_correspondence`] for the deepest copy node covering `offset`.
pub fn resolve_correspondence_at_offset(
    copy: &SyntaxTree,
    original: &SyntaxTree,
    offset: u32,
    options: &ResolveOptions,
) -> Result<CorrespondenceMap> {
    let node = copy.node_at_offset(offset).ok_or_else(|| {
        ResolveError::contract(
            format!("offset {offset} is outside {}", copy.file_name()),
            String::new(),
        )
    })?;
    resolve_correspondence(copy, original, node, options)
}
