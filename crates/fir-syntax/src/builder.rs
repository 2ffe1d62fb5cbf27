//! Incremental construction of syntax trees.
//!
//! The builder keeps a stack of open nodes. Source text is appended as the
//! caller walks its input, and node offsets are taken from the current text
//! length, so start/finish calls only need to be balanced.

use crate::base::{NodeIndex, TreeId};
use crate::kind::SyntaxKind;
use crate::node::{ModifierFlags, Node};
use crate::tree::SyntaxTree;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Builds a [`SyntaxTree`]. The `File` root node is opened on creation and
/// every still-open node is closed by [`TreeBuilder::finish`].
pub struct TreeBuilder {
    file_name: String,
    text: String,
    nodes: Vec<Node>,
    stack: Vec<NodeIndex>,
}

impl TreeBuilder {
    pub fn new(file_name: impl Into<String>) -> Self {
        let mut builder = TreeBuilder {
            file_name: file_name.into(),
            text: String::new(),
            nodes: Vec::new(),
            stack: Vec::new(),
        };
        builder.start_node(SyntaxKind::File);
        builder
    }

    /// Append source text at the current position.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.text.len() as u32
    }

    /// Open a node at the current offset as the last child of the innermost open node.
    pub fn start_node(&mut self, kind: SyntaxKind) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        let parent = self.stack.last().copied().unwrap_or(NodeIndex::NONE);
        self.nodes.push(Node::new(kind, self.offset(), parent));
        if let Some(parent_node) = self.nodes.get_mut(parent.as_usize()) {
            parent_node.children.push(index);
        }
        self.stack.push(index);
        index
    }

    /// Close the innermost open node at the current offset. The root stays open.
    pub fn finish_node(&mut self) -> NodeIndex {
        debug_assert!(self.stack.len() > 1, "finish_node called on the file root");
        if self.stack.len() <= 1 {
            return self.stack.first().copied().unwrap_or(NodeIndex::NONE);
        }
        let index = self.stack.pop().unwrap_or(NodeIndex::NONE);
        let end = self.offset();
        if let Some(node) = self.nodes.get_mut(index.as_usize()) {
            node.end = end;
        }
        index
    }

    fn current_mut(&mut self) -> Option<&mut Node> {
        let current = *self.stack.last()?;
        self.nodes.get_mut(current.as_usize())
    }

    /// Set the name of the innermost open node.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        if let Some(node) = self.current_mut() {
            node.name = Some(name.into());
        }
        self
    }

    /// Add modifiers to the innermost open node.
    pub fn set_modifiers(&mut self, modifiers: ModifierFlags) -> &mut Self {
        if let Some(node) = self.current_mut() {
            node.modifiers |= modifiers;
        }
        self
    }

    /// Record a `@Suppress` key on the innermost open node.
    pub fn suppress(&mut self, key: impl Into<String>) -> &mut Self {
        if let Some(node) = self.current_mut() {
            node.suppressions.push(key.into());
        }
        self
    }

    /// Open a node, run `body` to fill it, then close it.
    pub fn node(&mut self, kind: SyntaxKind, body: impl FnOnce(&mut Self)) -> NodeIndex {
        let index = self.start_node(kind);
        body(self);
        self.finish_node();
        index
    }

    /// Like [`TreeBuilder::node`] with a name set before `body` runs.
    pub fn named(
        &mut self,
        kind: SyntaxKind,
        name: &str,
        body: impl FnOnce(&mut Self),
    ) -> NodeIndex {
        let index = self.start_node(kind);
        self.set_name(name);
        body(self);
        self.finish_node();
        index
    }

    /// A leaf whose text is its name, e.g. a name reference or a literal.
    pub fn leaf(&mut self, kind: SyntaxKind, name: &str) -> NodeIndex {
        let index = self.start_node(kind);
        self.set_name(name);
        self.text(name);
        self.finish_node();
        index
    }

    /// Close all open nodes and produce the tree.
    pub fn finish(mut self) -> SyntaxTree {
        let end = self.offset();
        while let Some(open) = self.stack.pop() {
            if let Some(node) = self.nodes.get_mut(open.as_usize()) {
                node.end = end;
            }
        }

        let mut declarations = FxHashMap::default();
        for (i, node) in self.nodes.iter().enumerate() {
            if node.kind.is_declaration() {
                declarations
                    .entry((node.pos, node.kind))
                    .or_insert(NodeIndex(i as u32));
            }
        }

        let id = TreeId::fresh();
        trace!(
            tree = %id,
            file = %self.file_name,
            nodes = self.nodes.len(),
            declarations = declarations.len(),
            "built syntax tree"
        );

        SyntaxTree {
            id,
            file_name: self.file_name,
            text: self.text,
            nodes: self.nodes,
            root: NodeIndex(0),
            declarations,
        }
    }
}
