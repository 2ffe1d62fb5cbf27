//! Resolution of syntax subtrees into [`FirElement`]s.
//!
//! A declaration body is resolved against the scope chain of the declaration
//! plus a stack of local levels that grows and shrinks while the walk enters
//! blocks, lambdas and local declarations. Locals are never shared, so they
//! live in a plain `Vec` instead of the persistent chain.

use std::sync::Arc;

use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree};
use tracing::trace;

use crate::element::{FirElement, FirNode};
use crate::locality::is_non_local_declaration;
use crate::record::DeclarationRecord;
use crate::scope::{ScopeChain, ScopeKind, ScopeLevel, declaration_level, import_symbol};
use crate::symbol::{DeclRef, Resolution, Symbol};

/// Source of records for non-local declarations met while building an element.
///
/// `outer` is the inner scope chain of the declaration being built, which is
/// the outer chain of the nested one.
pub trait NestedRecords {
    fn nested_record(
        &self,
        node: NodeIndex,
        outer: &Arc<ScopeChain>,
    ) -> Option<Arc<DeclarationRecord>>;
}

struct ElementBuilder<'a> {
    tree: &'a SyntaxTree,
    chain: &'a Arc<ScopeChain>,
    locals: Vec<ScopeLevel>,
    nested: &'a dyn NestedRecords,
}

impl<'a> ElementBuilder<'a> {
    fn new(
        tree: &'a SyntaxTree,
        chain: &'a Arc<ScopeChain>,
        nested: &'a dyn NestedRecords,
    ) -> Self {
        ElementBuilder {
            tree,
            chain,
            locals: Vec::new(),
            nested,
        }
    }

    fn lookup_where(&self, name: &str, pred: impl Fn(&Symbol) -> bool) -> Option<Symbol> {
        self.locals
            .iter()
            .rev()
            .find_map(|level| level.find(name, &pred))
            .or_else(|| self.chain.lookup_where(name, &pred))
            .cloned()
    }

    fn lookup_callable(&self, name: &str, argument_count: u32) -> Option<Symbol> {
        self.locals
            .iter()
            .rev()
            .find_map(|level| level.find_callable(name, argument_count))
            .or_else(|| self.chain.lookup_callable(name, argument_count))
            .cloned()
    }

    fn receiver(&self) -> Option<Symbol> {
        self.locals
            .iter()
            .rev()
            .find_map(ScopeLevel::receiver)
            .or_else(|| self.chain.receiver())
            .cloned()
    }

    fn declare_local(&mut self, node: NodeIndex) {
        let Some(symbol) = Symbol::from_node(self.tree, node) else {
            return;
        };
        if let Some(level) = self.locals.last_mut() {
            level.declare(symbol);
        }
    }

    fn shell(&self, node: NodeIndex) -> Option<FirElement> {
        let syntax = self.tree.get(node)?;
        Some(FirElement {
            tree: self.tree.id(),
            source: node,
            kind: syntax.kind,
            range: syntax.range(),
            name: syntax.name.clone(),
            modifiers: syntax.modifiers,
            suppressions: syntax.suppressions.clone(),
            resolution: None,
            is_local: false,
            children: Vec::new(),
        })
    }

    fn resolve(&self, node: NodeIndex, kind: SyntaxKind) -> Option<Resolution> {
        let name = self.tree.name(node);
        let resolution = match kind {
            SyntaxKind::NameReference => {
                name.and_then(|name| self.lookup_where(name, |s| s.kind.is_value()))
            }
            SyntaxKind::TypeReference => {
                name.and_then(|name| self.lookup_where(name, |s| s.kind.is_type()))
            }
            SyntaxKind::Call => {
                let argument_count = self.tree.children(node).len() as u32;
                name.and_then(|name| self.lookup_callable(name, argument_count))
            }
            SyntaxKind::ThisReference => self.receiver(),
            SyntaxKind::Import => import_symbol(self.tree, node),
            _ => return None,
        };
        Some(Resolution::from(resolution))
    }

    /// Build the root of a record or file: its own level is already on the chain.
    fn build_root(&mut self, node: NodeIndex) -> Option<FirElement> {
        let mut element = self.shell(node)?;
        let hoists_members = element.kind.is_class_like() || element.kind == SyntaxKind::File;
        for &child in self.tree.children(node) {
            if hoists_members
                && is_non_local_declaration(self.tree, child)
                && let Some(record) = self.nested.nested_record(child, self.chain)
            {
                element.children.push(FirNode::Declaration(record));
                continue;
            }
            if let Some(built) = self.build(child) {
                element.children.push(FirNode::Element(built));
            }
        }
        Some(element)
    }

    fn build_children(&mut self, node: NodeIndex, element: &mut FirElement) {
        for &child in self.tree.children(node) {
            if let Some(built) = self.build(child) {
                element.children.push(FirNode::Element(built));
            }
        }
    }

    fn build(&mut self, node: NodeIndex) -> Option<FirElement> {
        let mut element = self.shell(node)?;
        element.resolution = self.resolve(node, element.kind);

        match element.kind {
            SyntaxKind::Block => {
                self.locals.push(ScopeLevel::new(ScopeKind::Local, None));
                for &child in self.tree.children(node) {
                    let child_kind = self.tree.kind(child);
                    // Functions and classes are visible in their own bodies;
                    // a property only after its initializer.
                    let hoisted = child_kind.is_some_and(|k| k.is_declaration())
                        && child_kind != Some(SyntaxKind::Property);
                    if hoisted {
                        self.declare_local(child);
                    }
                    if let Some(built) = self.build(child) {
                        element.children.push(FirNode::Element(built));
                    }
                    if child_kind == Some(SyntaxKind::Property) {
                        self.declare_local(child);
                    }
                }
                self.locals.pop();
            }
            SyntaxKind::Lambda => {
                let mut level = ScopeLevel::new(ScopeKind::Local, None);
                for parameter in self.tree.children_of_kind(node, SyntaxKind::Parameter) {
                    if let Some(symbol) = Symbol::from_node(self.tree, parameter) {
                        level.declare(symbol);
                    }
                }
                self.locals.push(level);
                self.build_children(node, &mut element);
                self.locals.pop();
            }
            kind if kind.is_declaration() => {
                element.is_local = !is_non_local_declaration(self.tree, node);
                let mut level = declaration_level(self.tree, node);
                // A function sees itself even when no block declared it.
                if kind == SyntaxKind::Function
                    && let Some(symbol) = Symbol::from_node(self.tree, node)
                {
                    level.declare(symbol);
                }
                self.locals.push(level);
                self.build_children(node, &mut element);
                self.locals.pop();
            }
            _ => self.build_children(node, &mut element),
        }
        Some(element)
    }
}

/// Resolve the non-local declaration `node` of `tree` into a record.
///
/// `scope` is the inner chain of the declaration (its own level included).
/// Returns `None` when `node` is not a named declaration.
pub fn build_declaration_record(
    tree: &SyntaxTree,
    node: NodeIndex,
    scope: Arc<ScopeChain>,
    nested: &dyn NestedRecords,
) -> Option<DeclarationRecord> {
    let kind = tree.kind(node).filter(|kind| kind.is_declaration())?;
    let name = tree.name(node)?.to_string();
    let range = tree.range(node)?;
    let element = ElementBuilder::new(tree, &scope, nested).build_root(node)?;
    trace!(
        tree = %tree.id(),
        node = %node,
        %kind,
        name = %name,
        elements = element.count(),
        "built declaration record"
    );
    Some(DeclarationRecord {
        declaration: DeclRef::new(tree.id(), node),
        name,
        kind,
        range,
        scope,
        element,
    })
}

/// Resolve the file node of `tree`; top-level non-local declarations become
/// shared records obtained from `nested`.
pub fn build_file_element(
    tree: &SyntaxTree,
    file_scope: &Arc<ScopeChain>,
    nested: &dyn NestedRecords,
) -> Option<FirElement> {
    ElementBuilder::new(tree, file_scope, nested).build_root(tree.root())
}
