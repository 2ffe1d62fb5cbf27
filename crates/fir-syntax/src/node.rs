//! Syntax node storage.

use crate::base::NodeIndex;
use crate::kind::SyntaxKind;
use bitflags::bitflags;
use fir_common::TextRange;
use smallvec::SmallVec;

bitflags! {
    /// Declaration modifiers written in source.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u16 {
        const ABSTRACT = 1 << 0;
        const OPEN = 1 << 1;
        const OVERRIDE = 1 << 2;
        const PUBLIC = 1 << 3;
        const PRIVATE = 1 << 4;
        const PROTECTED = 1 << 5;
        const INTERNAL = 1 << 6;

        const VISIBILITY = Self::PUBLIC.bits()
            | Self::PRIVATE.bits()
            | Self::PROTECTED.bits()
            | Self::INTERNAL.bits();
    }
}

/// A node in a [`SyntaxTree`](crate::SyntaxTree) arena.
///
/// `name` holds the identifier for declarations, references, calls and type
/// references, the literal text for literals, the imported path for imports
/// and the parser message for error elements.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    pub parent: NodeIndex,
    pub children: SmallVec<[NodeIndex; 4]>,
    pub name: Option<String>,
    pub modifiers: ModifierFlags,
    /// Keys from a `@Suppress(...)` annotation on this node.
    pub suppressions: SmallVec<[String; 1]>,
}

impl Node {
    pub(crate) fn new(kind: SyntaxKind, pos: u32, parent: NodeIndex) -> Self {
        Node {
            kind,
            pos,
            end: pos,
            parent,
            children: SmallVec::new(),
            name: None,
            modifiers: ModifierFlags::empty(),
            suppressions: SmallVec::new(),
        }
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn has_modifier(&self, flag: ModifierFlags) -> bool {
        self.modifiers.contains(flag)
    }
}
