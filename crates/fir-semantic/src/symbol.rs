//! Symbols and name resolution results.

use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree, TreeId};

/// Identity of a declaration: the tree instance plus its arena index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclRef {
    pub tree: TreeId,
    pub node: NodeIndex,
}

impl DeclRef {
    pub const fn new(tree: TreeId, node: NodeIndex) -> Self {
        Self { tree, node }
    }
}

impl std::fmt::Display for DeclRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.tree, self.node)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    Object,
    Function,
    Property,
    TypeAlias,
    Parameter,
    TypeParameter,
    /// Brought in by an import directive; the target is not analysed here.
    Imported,
}

impl SymbolKind {
    pub fn from_syntax(kind: SyntaxKind) -> Option<SymbolKind> {
        Some(match kind {
            SyntaxKind::Class => SymbolKind::Class,
            SyntaxKind::Object => SymbolKind::Object,
            SyntaxKind::Function => SymbolKind::Function,
            SyntaxKind::Property => SymbolKind::Property,
            SyntaxKind::TypeAlias => SymbolKind::TypeAlias,
            SyntaxKind::Parameter => SymbolKind::Parameter,
            SyntaxKind::TypeParameter => SymbolKind::TypeParameter,
            _ => return None,
        })
    }

    pub const fn is_type(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Object
                | SymbolKind::TypeAlias
                | SymbolKind::TypeParameter
                | SymbolKind::Imported
        )
    }

    /// Kinds that may appear as a plain value reference.
    pub const fn is_value(self) -> bool {
        !matches!(self, SymbolKind::TypeAlias | SymbolKind::TypeParameter)
    }

    /// Kinds with a parameter list (functions and class constructors).
    pub const fn has_signature(self) -> bool {
        matches!(self, SymbolKind::Function | SymbolKind::Class)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolOrigin {
    Source(DeclRef),
    Import(String),
    Builtin,
}

/// A resolvable name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub origin: SymbolOrigin,
    /// Parameter count for functions and class constructors; `None` when unknown.
    pub arity: Option<u32>,
}

impl Symbol {
    /// Symbol for a declaration-like node (declarations, parameters, type parameters).
    pub fn from_node(tree: &SyntaxTree, node: NodeIndex) -> Option<Symbol> {
        let syntax = tree.get(node)?;
        let kind = SymbolKind::from_syntax(syntax.kind)?;
        let name = syntax.name.clone()?;
        let arity = kind
            .has_signature()
            .then(|| tree.children_of_kind(node, SyntaxKind::Parameter).count() as u32);
        Some(Symbol {
            name,
            kind,
            origin: SymbolOrigin::Source(DeclRef::new(tree.id(), node)),
            arity,
        })
    }

    pub fn builtin(name: &str, kind: SymbolKind, arity: Option<u32>) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind,
            origin: SymbolOrigin::Builtin,
            arity,
        }
    }

    /// Declaration this symbol points at, if it comes from source.
    pub fn declaration(&self) -> Option<DeclRef> {
        match self.origin {
            SymbolOrigin::Source(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn accepts_arity(&self, argument_count: u32) -> bool {
        self.arity.is_none_or(|arity| arity == argument_count)
    }
}

/// Outcome of resolving a reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    Resolved(Symbol),
    Unresolved,
}

impl Resolution {
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Resolution::Resolved(symbol) => Some(symbol),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Resolution::Unresolved)
    }
}

impl From<Option<Symbol>> for Resolution {
    fn from(symbol: Option<Symbol>) -> Self {
        symbol.map_or(Resolution::Unresolved, Resolution::Resolved)
    }
}
