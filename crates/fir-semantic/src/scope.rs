//! Persistent scope chains.
//!
//! A [`ScopeChain`] is an immutable linked list of [`ScopeLevel`]s, innermost
//! first. Pushing a level allocates one node and shares the rest of the chain,
//! so a dependent state can hang the scopes of a copied declaration below the
//! already-resolved scopes of the original's ancestors without rebuilding them.

use std::sync::Arc;

use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::symbol::{DeclRef, Symbol, SymbolKind, SymbolOrigin};

/// Names every file sees without an import directive.
pub const DEFAULT_IMPORTS: &[(&str, SymbolKind, Option<u32>)] = &[
    ("Any", SymbolKind::Class, Some(0)),
    ("Boolean", SymbolKind::Class, None),
    ("Double", SymbolKind::Class, None),
    ("Int", SymbolKind::Class, None),
    ("Long", SymbolKind::Class, None),
    ("Nothing", SymbolKind::Class, None),
    ("String", SymbolKind::Class, None),
    ("Unit", SymbolKind::Object, None),
    ("error", SymbolKind::Function, Some(1)),
    ("listOf", SymbolKind::Function, None),
    ("print", SymbolKind::Function, Some(1)),
    ("println", SymbolKind::Function, None),
    ("require", SymbolKind::Function, None),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    DefaultImports,
    ExplicitImports,
    File,
    /// Type parameters, parameters, members and receiver of one declaration.
    Declaration,
    /// Block, lambda or local-declaration scope inside a body.
    Local,
}

/// One level of names. Names keep declaration order; a name may map to
/// several symbols (overloads).
#[derive(Clone, Debug)]
pub struct ScopeLevel {
    kind: ScopeKind,
    owner: Option<DeclRef>,
    names: IndexMap<String, SmallVec<[Symbol; 1]>>,
    receiver: Option<Symbol>,
}

impl ScopeLevel {
    pub fn new(kind: ScopeKind, owner: Option<DeclRef>) -> Self {
        ScopeLevel {
            kind,
            owner,
            names: IndexMap::new(),
            receiver: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    #[inline]
    pub fn owner(&self) -> Option<DeclRef> {
        self.owner
    }

    #[inline]
    pub fn receiver(&self) -> Option<&Symbol> {
        self.receiver.as_ref()
    }

    pub fn set_receiver(&mut self, receiver: Symbol) {
        self.receiver = Some(receiver);
    }

    pub fn declare(&mut self, symbol: Symbol) {
        self.names
            .entry(symbol.name.clone())
            .or_default()
            .push(symbol);
    }

    pub fn get(&self, name: &str) -> &[Symbol] {
        self.names.get(name).map_or(&[], |symbols| symbols.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn find(&self, name: &str, pred: impl Fn(&Symbol) -> bool) -> Option<&Symbol> {
        self.get(name).iter().find(|symbol| pred(symbol))
    }

    /// Best call target for `name` with `argument_count` arguments.
    ///
    /// Preference: a signature whose arity matches, any signature or import,
    /// then any other value (a property holding a lambda).
    pub fn find_callable(&self, name: &str, argument_count: u32) -> Option<&Symbol> {
        let candidates = self.get(name);
        candidates
            .iter()
            .find(|s| s.kind.has_signature() && s.accepts_arity(argument_count))
            .or_else(|| {
                candidates
                    .iter()
                    .find(|s| s.kind.has_signature() || s.kind == SymbolKind::Imported)
            })
            .or_else(|| candidates.iter().find(|s| s.kind.is_value()))
    }
}

/// Immutable chain of scope levels, innermost first.
#[derive(Debug)]
pub struct ScopeChain {
    level: ScopeLevel,
    parent: Option<Arc<ScopeChain>>,
    depth: usize,
}

impl ScopeChain {
    pub fn root(level: ScopeLevel) -> Arc<ScopeChain> {
        Arc::new(ScopeChain {
            level,
            parent: None,
            depth: 1,
        })
    }

    /// A new chain with `level` as the innermost level.
    pub fn push(self: &Arc<Self>, level: ScopeLevel) -> Arc<ScopeChain> {
        Arc::new(ScopeChain {
            level,
            parent: Some(Arc::clone(self)),
            depth: self.depth + 1,
        })
    }

    #[inline]
    pub fn level(&self) -> &ScopeLevel {
        &self.level
    }

    #[inline]
    pub fn parent(&self) -> Option<&Arc<ScopeChain>> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Levels from innermost to outermost.
    pub fn levels(&self) -> impl Iterator<Item = &ScopeLevel> {
        let mut next = Some(self);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent.as_deref();
            Some(&current.level)
        })
    }

    pub fn lookup_where(&self, name: &str, pred: impl Fn(&Symbol) -> bool) -> Option<&Symbol> {
        self.levels().find_map(|level| level.find(name, &pred))
    }

    pub fn lookup_value(&self, name: &str) -> Option<&Symbol> {
        self.lookup_where(name, |s| s.kind.is_value())
    }

    pub fn lookup_type(&self, name: &str) -> Option<&Symbol> {
        self.lookup_where(name, |s| s.kind.is_type())
    }

    pub fn lookup_callable(&self, name: &str, argument_count: u32) -> Option<&Symbol> {
        self.levels()
            .find_map(|level| level.find_callable(name, argument_count))
    }

    /// Innermost implicit `this` receiver.
    pub fn receiver(&self) -> Option<&Symbol> {
        self.levels().find_map(ScopeLevel::receiver)
    }

    /// Whether `other` is this chain or one of its tails.
    pub fn shares_tail_with(&self, other: &Arc<ScopeChain>) -> bool {
        let mut current = Some(self);
        while let Some(chain) = current {
            if std::ptr::eq(chain, Arc::as_ptr(other)) {
                return true;
            }
            current = chain.parent.as_deref();
        }
        false
    }
}

/// Symbol introduced by an import directive: `import a.b.C` binds `C`.
pub fn import_symbol(tree: &SyntaxTree, import: NodeIndex) -> Option<Symbol> {
    let path = tree.name(import)?;
    let alias = path.rsplit('.').next().unwrap_or(path);
    if alias.is_empty() || alias == "*" {
        return None;
    }
    Some(Symbol {
        name: alias.to_string(),
        kind: SymbolKind::Imported,
        origin: SymbolOrigin::Import(path.to_string()),
        arity: None,
    })
}

/// Scope chain visible at the top level of a file: default imports, explicit
/// imports, then the file's own top-level declarations.
pub fn file_scope(tree: &SyntaxTree) -> Arc<ScopeChain> {
    let mut defaults = ScopeLevel::new(ScopeKind::DefaultImports, None);
    for &(name, kind, arity) in DEFAULT_IMPORTS {
        defaults.declare(Symbol::builtin(name, kind, arity));
    }

    let root = tree.root();
    let mut imports = ScopeLevel::new(ScopeKind::ExplicitImports, None);
    for import in tree.children_of_kind(root, SyntaxKind::Import) {
        if let Some(symbol) = import_symbol(tree, import) {
            imports.declare(symbol);
        }
    }

    let mut file = ScopeLevel::new(ScopeKind::File, Some(DeclRef::new(tree.id(), root)));
    for &child in tree.children(root) {
        if tree.is_declaration(child)
            && let Some(symbol) = Symbol::from_node(tree, child)
        {
            file.declare(symbol);
        }
    }

    ScopeChain::root(defaults).push(imports).push(file)
}

/// The level a declaration contributes to the scopes of its own body:
/// type parameters, parameters and, for classes and objects, members and the
/// `this` receiver.
pub fn declaration_level(tree: &SyntaxTree, node: NodeIndex) -> ScopeLevel {
    let mut level = ScopeLevel::new(ScopeKind::Declaration, Some(DeclRef::new(tree.id(), node)));
    let is_class_like = tree.kind(node).is_some_and(SyntaxKind::is_class_like);

    for &child in tree.children(node) {
        let Some(kind) = tree.kind(child) else {
            continue;
        };
        let declares = match kind {
            SyntaxKind::TypeParameter | SyntaxKind::Parameter => true,
            k if k.is_declaration() => is_class_like,
            _ => false,
        };
        if declares && let Some(symbol) = Symbol::from_node(tree, child) {
            level.declare(symbol);
        }
    }

    if is_class_like && let Some(receiver) = Symbol::from_node(tree, node) {
        level.set_receiver(receiver);
    }
    level
}
