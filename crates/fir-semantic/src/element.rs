//! The resolved semantic tree.
//!
//! Elements are self-contained: ranges, names, modifiers and suppressions are
//! copied from syntax so that checkers never need the tree that produced them.
//! Non-local declarations nested in an element are shared records rather than
//! inline children, which lets a dependent state swap one of them out without
//! copying its siblings.

use std::sync::Arc;

use fir_common::TextRange;
use fir_syntax::{ModifierFlags, NodeIndex, SyntaxKind, TreeId};
use smallvec::SmallVec;

use crate::record::DeclarationRecord;
use crate::symbol::Resolution;

/// Coarse category used to route elements to checker components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    File,
    Declaration,
    Expression,
    /// Imports, parameters, type parameters and type references.
    Other,
}

#[derive(Clone, Debug)]
pub struct FirElement {
    pub tree: TreeId,
    pub source: NodeIndex,
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub name: Option<String>,
    pub modifiers: ModifierFlags,
    pub suppressions: SmallVec<[String; 1]>,
    /// Set for references, calls, type references and `this`.
    pub resolution: Option<Resolution>,
    /// Declarations only: declared inside a body rather than at top level or as a member.
    pub is_local: bool,
    pub children: Vec<FirNode>,
}

impl FirElement {
    pub fn category(&self) -> ElementCategory {
        match self.kind {
            SyntaxKind::File => ElementCategory::File,
            k if k.is_declaration() => ElementCategory::Declaration,
            k if k.is_expression() || k == SyntaxKind::ErrorElement => ElementCategory::Expression,
            _ => ElementCategory::Other,
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn has_modifier(&self, flag: ModifierFlags) -> bool {
        self.modifiers.contains(flag)
    }

    pub fn children(&self) -> impl Iterator<Item = &FirElement> {
        self.children.iter().map(FirNode::element)
    }

    pub fn children_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = &FirElement> {
        self.children().filter(move |child| child.kind == kind)
    }

    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<&FirElement> {
        self.children_of_kind(kind).next()
    }

    /// Pre-order walk of this element and everything below it, crossing into
    /// nested declaration records.
    pub fn walk<'e>(&'e self, visit: &mut impl FnMut(&'e FirElement)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Number of elements in this subtree, including nested records.
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    /// Find the element built from `source` in tree `tree`.
    pub fn find(&self, tree: TreeId, source: NodeIndex) -> Option<&FirElement> {
        if self.tree == tree && self.source == source {
            return Some(self);
        }
        self.children().find_map(|child| child.find(tree, source))
    }
}

/// A child of an element: an inline element or a nested non-local declaration.
#[derive(Clone, Debug)]
pub enum FirNode {
    Element(FirElement),
    Declaration(Arc<DeclarationRecord>),
}

impl FirNode {
    #[inline]
    pub fn element(&self) -> &FirElement {
        match self {
            FirNode::Element(element) => element,
            FirNode::Declaration(record) => &record.element,
        }
    }

    pub fn record(&self) -> Option<&Arc<DeclarationRecord>> {
        match self {
            FirNode::Declaration(record) => Some(record),
            FirNode::Element(_) => None,
        }
    }
}
