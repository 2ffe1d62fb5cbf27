use crate::{NodeIndex, SyntaxKind, SyntaxTree, TreeBuilder};

struct Sample {
    tree: SyntaxTree,
    func: NodeIndex,
    local: NodeIndex,
    reference: NodeIndex,
    class: NodeIndex,
    method: NodeIndex,
}

/// fun f(x: Int) {
///   val y = x
/// }
/// class A {
///   fun f() {}
/// }
fn sample() -> Sample {
    let mut b = TreeBuilder::new("sample.kt");
    let mut local = NodeIndex::NONE;
    let mut reference = NodeIndex::NONE;
    let mut method = NodeIndex::NONE;
    let func = b.named(SyntaxKind::Function, "f", |b| {
        b.text("fun f(");
        b.named(SyntaxKind::Parameter, "x", |b| {
            b.text("x: ");
            b.leaf(SyntaxKind::TypeReference, "Int");
        });
        b.text(") ");
        b.node(SyntaxKind::Block, |b| {
            b.text("{\n  ");
            local = b.named(SyntaxKind::Property, "y", |b| {
                b.text("val y = ");
                reference = b.leaf(SyntaxKind::NameReference, "x");
            });
            b.text("\n}");
        });
    });
    b.text("\n");
    let class = b.named(SyntaxKind::Class, "A", |b| {
        b.text("class A {\n  ");
        method = b.named(SyntaxKind::Function, "f", |b| {
            b.text("fun f() ");
            b.node(SyntaxKind::Block, |b| {
                b.text("{}");
            });
        });
        b.text("\n}");
    });
    b.text("\n");
    Sample {
        tree: b.finish(),
        func,
        local,
        reference,
        class,
        method,
    }
}

#[test]
fn test_node_at_offset_finds_deepest_node() {
    let s = sample();
    let pos = s.tree.range(s.reference).unwrap().start;
    assert_eq!(s.tree.node_at_offset(pos), Some(s.reference));

    let keyword = s.tree.range(s.local).unwrap().start;
    assert_eq!(s.tree.node_at_offset(keyword), Some(s.local));
}

#[test]
fn test_node_at_offset_outside_declarations_is_root() {
    let s = sample();
    let between = s.tree.range(s.func).unwrap().end;
    assert_eq!(s.tree.node_at_offset(between), Some(s.tree.root()));
    let past_end = s.tree.text().len() as u32 + 5;
    assert_eq!(s.tree.node_at_offset(past_end), None);
}

#[test]
fn test_ancestors_walk_to_root() {
    let s = sample();
    let kinds: Vec<SyntaxKind> = s
        .tree
        .ancestors(s.reference)
        .filter_map(|n| s.tree.kind(n))
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Property,
            SyntaxKind::Block,
            SyntaxKind::Function,
            SyntaxKind::File
        ]
    );
    assert_eq!(s.tree.ancestors_with_self(s.local).next(), Some(s.local));
    assert!(s.tree.is_ancestor_or_self(s.func, s.reference));
    assert!(!s.tree.is_ancestor_or_self(s.class, s.reference));
}

#[test]
fn test_declaration_index_matches_exact_kind() {
    let s = sample();
    let method_pos = s.tree.range(s.method).unwrap().start;
    assert_eq!(
        s.tree.declaration_at(method_pos, SyntaxKind::Function),
        Some(s.method)
    );
    assert_eq!(s.tree.declaration_at(method_pos, SyntaxKind::Property), None);
    // f, y, A, A.f
    assert_eq!(s.tree.declaration_count(), 4);
}

#[test]
fn test_preorder_visits_parent_before_children() {
    let s = sample();
    let order: Vec<NodeIndex> = s.tree.preorder(s.tree.root()).collect();
    assert_eq!(order.len(), s.tree.len());
    let func_at = order.iter().position(|&n| n == s.func).unwrap();
    let local_at = order.iter().position(|&n| n == s.local).unwrap();
    let class_at = order.iter().position(|&n| n == s.class).unwrap();
    assert!(func_at < local_at && local_at < class_at);
}

#[test]
fn test_excerpt_collapses_whitespace_and_truncates() {
    let s = sample();
    assert_eq!(s.tree.excerpt(s.method, 80), "fun f() {}");
    assert_eq!(s.tree.excerpt(s.class, 7), "class A...");
}

#[test]
fn test_copy_has_same_content_and_new_identity() {
    let s = sample();
    let copy = s.tree.copy();
    assert_ne!(copy.id(), s.tree.id());
    assert_eq!(copy.text(), s.tree.text());
    assert_eq!(copy.range(s.method), s.tree.range(s.method));
}
