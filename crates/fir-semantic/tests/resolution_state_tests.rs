//! Cache behavior of `ResolutionState` under sequential and concurrent use.

use std::sync::Arc;

use fir_semantic::{DeclRef, ResolutionSession, ResolutionState};
use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree, TreeBuilder};
use rayon::prelude::*;

/// `count` classes, each with two member functions calling each other.
fn wide_file(count: usize) -> (SyntaxTree, Vec<NodeIndex>) {
    let mut b = TreeBuilder::new("wide.kt");
    let mut members = Vec::new();
    for i in 0..count {
        b.named(SyntaxKind::Class, &format!("C{i}"), |b| {
            b.text(&format!("class C{i} {{\n"));
            for name in ["first", "second"] {
                let member = b.named(SyntaxKind::Function, name, |b| {
                    b.text(&format!("  fun {name}() "));
                    b.node(SyntaxKind::Block, |b| {
                        b.text("{ ");
                        let callee = if name == "first" { "second" } else { "first" };
                        b.named(SyntaxKind::Call, callee, |b| {
                            b.text(&format!("{callee}()"));
                        });
                        b.text(" }");
                    });
                });
                members.push(member);
                b.text("\n");
            }
            b.text("}\n");
        });
    }
    (b.finish(), members)
}

#[test]
fn records_are_built_once() {
    let (tree, members) = wide_file(3);
    let state = ResolutionState::new(Arc::new(tree));
    assert_eq!(state.cached_record_count(), 0);

    let first = state.record_for_node(members[0]).expect("record");
    let again = state.record_for_node(members[0]).expect("record");
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(state.cached_record_count(), 1);
}

#[test]
fn foreign_tree_queries_return_none() {
    let (tree, members) = wide_file(1);
    let copy = tree.copy();
    let state = ResolutionState::new(Arc::new(tree));
    let foreign = DeclRef::new(copy.id(), members[0]);
    assert!(state.record_for(foreign).is_none());
    let own = DeclRef::new(state.tree().id(), members[0]);
    assert!(state.record_for(own).is_some());
}

#[test]
fn concurrent_requests_share_one_record() {
    let (tree, members) = wide_file(16);
    let state = Arc::new(ResolutionState::new(Arc::new(tree)));

    let records: Vec<_> = (0..8)
        .into_par_iter()
        .flat_map_iter(|_| {
            members
                .iter()
                .map(|&member| state.record_for_node(member))
                .collect::<Vec<_>>()
        })
        .collect();

    assert_eq!(records.len(), 8 * members.len());
    for (i, record) in records.iter().enumerate() {
        let record = record.as_ref().expect("record");
        let expected = state
            .record_for_node(members[i % members.len()])
            .expect("record");
        assert!(Arc::ptr_eq(record, &expected));
    }
    assert_eq!(state.cached_record_count(), members.len());
}

#[test]
fn concurrent_file_element_and_member_records_agree() {
    let (tree, members) = wide_file(8);
    let state = Arc::new(ResolutionState::new(Arc::new(tree)));

    let (file, member) = rayon::join(
        || state.file_element(),
        || state.record_for_node(members[5]),
    );
    let member = member.expect("record");
    let class = file.children[2].record().expect("class record");
    let nested = class.nested_records();
    assert!(nested.iter().any(|r| Arc::ptr_eq(r, &member)));
}

#[test]
fn sibling_member_calls_resolve_through_class_scope() {
    let (tree, members) = wide_file(1);
    let state = ResolutionState::new(Arc::new(tree));
    let first = state.record_for_node(members[0]).expect("record");

    let mut targets = Vec::new();
    first.element.walk(&mut |element| {
        if element.kind == SyntaxKind::Call {
            let target = element
                .resolution
                .as_ref()
                .and_then(|r| r.symbol())
                .and_then(|s| s.declaration());
            targets.push(target);
        }
    });
    assert_eq!(targets, vec![Some(DeclRef::new(state.tree().id(), members[1]))]);
}
