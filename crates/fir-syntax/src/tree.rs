//! SyntaxTree access methods, ancestor/pre-order iterators and the declaration index.

use crate::base::{NodeIndex, TreeId};
use crate::kind::SyntaxKind;
use crate::node::{ModifierFlags, Node};
use fir_common::TextRange;
use fir_common::limits::MAX_ANCESTOR_WALK;
use rustc_hash::FxHashMap;

/// An immutable, position-addressable tree of one source file.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    pub(crate) id: TreeId,
    pub(crate) file_name: String,
    pub(crate) text: String,
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeIndex,
    /// Declarations keyed by start offset and exact kind.
    pub(crate) declarations: FxHashMap<(u32, SyntaxKind), NodeIndex>,
}

impl SyntaxTree {
    #[inline]
    pub fn id(&self) -> TreeId {
        self.id
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.as_usize())
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|n| n.kind)
    }

    #[inline]
    pub fn range(&self, index: NodeIndex) -> Option<TextRange> {
        self.get(index).map(Node::range)
    }

    #[inline]
    pub fn name(&self, index: NodeIndex) -> Option<&str> {
        self.get(index).and_then(Node::name)
    }

    #[inline]
    pub fn modifiers(&self, index: NodeIndex) -> ModifierFlags {
        self.get(index).map_or(ModifierFlags::empty(), |n| n.modifiers)
    }

    /// Parent of a node, `NodeIndex::NONE` for the root or a missing node.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    #[inline]
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get(index).map_or(&[], |n| n.children.as_slice())
    }

    /// Children of a given kind, in source order.
    pub fn children_of_kind(
        &self,
        index: NodeIndex,
        kind: SyntaxKind,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.children(index)
            .iter()
            .copied()
            .filter(move |&child| self.kind(child) == Some(kind))
    }

    /// First child of a given kind.
    pub fn child_of_kind(&self, index: NodeIndex, kind: SyntaxKind) -> Option<NodeIndex> {
        self.children_of_kind(index, kind).next()
    }

    #[inline]
    pub fn is_declaration(&self, index: NodeIndex) -> bool {
        self.kind(index).is_some_and(SyntaxKind::is_declaration)
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(index),
            remaining: MAX_ANCESTOR_WALK,
        }
    }

    /// The node itself followed by its ancestors.
    pub fn ancestors_with_self(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: if self.get(index).is_some() {
                index
            } else {
                NodeIndex::NONE
            },
            remaining: MAX_ANCESTOR_WALK,
        }
    }

    /// Pre-order walk of the subtree rooted at `index` (parent before children).
    pub fn preorder(&self, index: NodeIndex) -> Preorder<'_> {
        let stack = if self.get(index).is_some() {
            vec![index]
        } else {
            Vec::new()
        };
        Preorder { tree: self, stack }
    }

    /// Whether `descendant` lies in the subtree rooted at `ancestor` (inclusive).
    pub fn is_ancestor_or_self(&self, ancestor: NodeIndex, descendant: NodeIndex) -> bool {
        self.ancestors_with_self(descendant)
            .any(|node| node == ancestor)
    }

    /// Deepest node whose range covers `offset`.
    ///
    /// The end of the file is attributed to the deepest node ending there so a
    /// caret after the last character still lands inside the last declaration.
    pub fn node_at_offset(&self, offset: u32) -> Option<NodeIndex> {
        let root = self.get(self.root)?;
        if !root.range().contains_inclusive(offset) {
            return None;
        }
        let at_eof = offset == root.end;
        let mut current = self.root;
        loop {
            let next = self.children(current).iter().copied().find(|&child| {
                self.get(child).is_some_and(|node| {
                    let range = node.range();
                    range.contains(offset) || (at_eof && range.end == offset && !range.is_empty())
                })
            });
            match next {
                Some(child) => current = child,
                None => return Some(current),
            }
        }
    }

    /// Declaration of exactly `kind` starting at `offset`.
    #[inline]
    pub fn declaration_at(&self, offset: u32, kind: SyntaxKind) -> Option<NodeIndex> {
        self.declarations.get(&(offset, kind)).copied()
    }

    #[inline]
    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    /// Source text covered by a node.
    pub fn text_of(&self, index: NodeIndex) -> &str {
        self.get(index)
            .and_then(|node| self.text.get(node.pos as usize..node.end as usize))
            .unwrap_or("")
    }

    /// Single-line, length-limited excerpt of a node's text for error messages.
    pub fn excerpt(&self, index: NodeIndex, max_chars: usize) -> String {
        let collapsed = self
            .text_of(index)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if collapsed.chars().count() <= max_chars {
            return collapsed;
        }
        let mut shortened: String = collapsed.chars().take(max_chars).collect();
        shortened.push_str("...");
        shortened
    }

    /// A structurally identical tree with a fresh identity, as created by the
    /// IDE before applying a speculative edit.
    pub fn copy(&self) -> SyntaxTree {
        SyntaxTree {
            id: TreeId::fresh(),
            ..self.clone()
        }
    }
}

/// Iterator over a node's ancestors, see [`SyntaxTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    current: NodeIndex,
    remaining: u32,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if self.current.is_none() || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.current;
        self.current = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator, see [`SyntaxTree::preorder`].
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeIndex>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}
