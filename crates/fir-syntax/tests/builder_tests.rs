use crate::{ModifierFlags, NodeIndex, SyntaxKind, TreeBuilder};

#[test]
fn test_offsets_follow_appended_text() {
    let mut b = TreeBuilder::new("a.kt");
    b.text("// header\n");
    let func = b.named(SyntaxKind::Function, "f", |b| {
        b.text("fun f() = ");
        b.leaf(SyntaxKind::Literal, "1");
    });
    b.text("\n");
    let tree = b.finish();

    let node = tree.get(func).unwrap();
    assert_eq!(node.pos, 10);
    assert_eq!(node.end, 21);
    assert_eq!(tree.text_of(func), "fun f() = 1");
    assert_eq!(tree.range(tree.root()).unwrap().end, 22);
}

#[test]
fn test_parent_and_children_links() {
    let mut b = TreeBuilder::new("a.kt");
    let mut param = NodeIndex::NONE;
    let func = b.named(SyntaxKind::Function, "f", |b| {
        b.text("fun f(");
        param = b.named(SyntaxKind::Parameter, "x", |b| {
            b.text("x: ");
            b.leaf(SyntaxKind::TypeReference, "Int");
        });
        b.text(") {}");
    });
    let tree = b.finish();

    assert_eq!(tree.parent(func), tree.root());
    assert_eq!(tree.parent(param), func);
    assert_eq!(tree.children(func), &[param]);
    assert_eq!(tree.parent(tree.root()), NodeIndex::NONE);
    assert_eq!(
        tree.child_of_kind(param, SyntaxKind::TypeReference)
            .and_then(|t| tree.name(t)),
        Some("Int")
    );
}

#[test]
fn test_modifiers_and_suppressions_apply_to_open_node() {
    let mut b = TreeBuilder::new("a.kt");
    let class = b.named(SyntaxKind::Class, "A", |b| {
        b.set_modifiers(ModifierFlags::ABSTRACT | ModifierFlags::PUBLIC)
            .suppress("UNUSED_VARIABLE");
        b.text("@Suppress(\"UNUSED_VARIABLE\") public abstract class A");
    });
    let tree = b.finish();

    let node = tree.get(class).unwrap();
    assert!(node.has_modifier(ModifierFlags::ABSTRACT));
    assert!(node.modifiers.intersects(ModifierFlags::VISIBILITY));
    assert_eq!(node.suppressions.as_slice(), &["UNUSED_VARIABLE".to_string()]);
}

#[test]
fn test_finish_closes_unbalanced_nodes() {
    let mut b = TreeBuilder::new("a.kt");
    let class = b.start_node(SyntaxKind::Class);
    b.set_name("A").text("class A {");
    let tree = b.finish();
    assert_eq!(tree.range(class).unwrap().end, 9);
    assert_eq!(tree.declaration_count(), 1);
}

#[test]
fn test_each_tree_gets_a_fresh_identity() {
    let first = TreeBuilder::new("a.kt").finish();
    let second = TreeBuilder::new("a.kt").finish();
    assert_ne!(first.id(), second.id());
}
