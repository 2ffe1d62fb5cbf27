use crate::scope::{DEFAULT_IMPORTS, ScopeChain, ScopeKind, ScopeLevel, declaration_level, file_scope};
use crate::symbol::{Symbol, SymbolKind, SymbolOrigin};
use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree, TreeBuilder};
use std::sync::Arc;

/// import lib.Helper
/// fun top(a: Int, b: Int) {}
/// class Box<T> { val item = 1 }
fn sample() -> (SyntaxTree, NodeIndex, NodeIndex) {
    let mut b = TreeBuilder::new("scopes.kt");
    b.node(SyntaxKind::Import, |b| {
        b.set_name("lib.Helper");
        b.text("import lib.Helper");
    });
    b.text("\n");
    let top = b.named(SyntaxKind::Function, "top", |b| {
        b.text("fun top(");
        b.named(SyntaxKind::Parameter, "a", |b| {
            b.text("a: ");
            b.leaf(SyntaxKind::TypeReference, "Int");
        });
        b.text(", ");
        b.named(SyntaxKind::Parameter, "b", |b| {
            b.text("b: ");
            b.leaf(SyntaxKind::TypeReference, "Int");
        });
        b.text(") ");
        b.node(SyntaxKind::Block, |b| {
            b.text("{}");
        });
    });
    b.text("\n");
    let class = b.named(SyntaxKind::Class, "Box", |b| {
        b.text("class Box<");
        b.leaf(SyntaxKind::TypeParameter, "T");
        b.text("> { ");
        b.named(SyntaxKind::Property, "item", |b| {
            b.text("val item = ");
            b.leaf(SyntaxKind::Literal, "1");
        });
        b.text(" }");
    });
    (b.finish(), top, class)
}

#[test]
fn file_scope_layers_defaults_imports_and_top_level_names() {
    let (tree, top, class) = sample();
    let chain = file_scope(&tree);

    let kinds: Vec<_> = chain.levels().map(ScopeLevel::kind).collect();
    assert_eq!(
        kinds,
        vec![ScopeKind::File, ScopeKind::ExplicitImports, ScopeKind::DefaultImports]
    );
    assert_eq!(chain.depth(), 3);
    assert_eq!(chain.parent().map(|p| p.level().len()), Some(1));

    let top_symbol = chain.lookup_value("top").expect("top-level function");
    assert_eq!(top_symbol.kind, SymbolKind::Function);
    assert_eq!(top_symbol.arity, Some(2));
    assert_eq!(top_symbol.declaration().map(|d| d.node), Some(top));

    let class_symbol = chain.lookup_type("Box").expect("top-level class");
    assert_eq!(class_symbol.declaration().map(|d| d.node), Some(class));

    let helper = chain.lookup_type("Helper").expect("imported name");
    assert_eq!(helper.origin, SymbolOrigin::Import("lib.Helper".to_string()));

    for &(name, _, _) in DEFAULT_IMPORTS {
        assert!(chain.lookup_where(name, |_| true).is_some(), "{name}");
    }
}

#[test]
fn declaration_level_of_class_declares_members_and_receiver() {
    let (tree, _, class) = sample();
    let level = declaration_level(&tree, class);
    assert_eq!(level.kind(), ScopeKind::Declaration);
    assert_eq!(level.names().collect::<Vec<_>>(), vec!["T", "item"]);
    assert_eq!(level.receiver().map(|r| r.name.as_str()), Some("Box"));
}

#[test]
fn declaration_level_of_function_declares_parameters_only() {
    let (tree, top, _) = sample();
    let level = declaration_level(&tree, top);
    assert_eq!(level.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(level.receiver().is_none());
}

#[test]
fn type_parameters_are_not_values() {
    let (tree, _, class) = sample();
    let chain = file_scope(&tree).push(declaration_level(&tree, class));
    assert!(chain.lookup_type("T").is_some());
    assert!(chain.lookup_value("T").is_none());
}

#[test]
fn find_callable_prefers_matching_arity() {
    let mut level = ScopeLevel::new(ScopeKind::Local, None);
    level.declare(Symbol::builtin("call", SymbolKind::Function, Some(0)));
    level.declare(Symbol::builtin("call", SymbolKind::Function, Some(2)));
    level.declare(Symbol::builtin("handler", SymbolKind::Property, None));

    assert_eq!(level.find_callable("call", 2).and_then(|s| s.arity), Some(2));
    assert_eq!(level.find_callable("call", 0).and_then(|s| s.arity), Some(0));
    // No overload fits: still bind to a signature so the argument count can be reported.
    assert_eq!(level.find_callable("call", 5).and_then(|s| s.arity), Some(0));
    assert_eq!(
        level.find_callable("handler", 1).map(|s| s.kind),
        Some(SymbolKind::Property)
    );
    assert!(level.find_callable("missing", 0).is_none());
}

#[test]
fn inner_levels_shadow_outer_levels() {
    let mut outer = ScopeLevel::new(ScopeKind::File, None);
    outer.declare(Symbol::builtin("x", SymbolKind::Property, None));
    let mut inner = ScopeLevel::new(ScopeKind::Local, None);
    inner.declare(Symbol::builtin("x", SymbolKind::Parameter, None));

    let chain = ScopeChain::root(outer).push(inner);
    assert_eq!(chain.lookup_value("x").map(|s| s.kind), Some(SymbolKind::Parameter));
    assert_eq!(
        chain.parent().and_then(|p| p.lookup_value("x")).map(|s| s.kind),
        Some(SymbolKind::Property)
    );
}

#[test]
fn pushed_chains_share_their_tail() {
    let root = ScopeChain::root(ScopeLevel::new(ScopeKind::File, None));
    let left = root.push(ScopeLevel::new(ScopeKind::Declaration, None));
    let right = root.push(ScopeLevel::new(ScopeKind::Declaration, None));

    assert!(left.shares_tail_with(&root));
    assert!(right.shares_tail_with(&root));
    assert!(!left.shares_tail_with(&right));
    assert!(Arc::ptr_eq(left.parent().expect("parent"), &root));
    assert_eq!(left.depth(), 2);
}
