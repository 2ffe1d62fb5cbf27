use crate::checkers::{control_flow, declaration, expression};
use crate::component::{CheckerComponent, components_for};
use crate::registry::{
    DeclarationCheckers, ExpressionCheckers, declaration_checkers, expression_checkers,
};
use fir_syntax::SyntaxKind;

fn names(checkers: &[&'static dyn crate::registry::DeclarationChecker]) -> Vec<&'static str> {
    checkers.iter().map(|c| c.name()).collect()
}

#[test]
fn checker_sets_are_built_once() {
    assert!(std::ptr::eq(declaration_checkers(false), declaration_checkers(false)));
    assert!(std::ptr::eq(declaration_checkers(true), declaration_checkers(true)));
    assert!(std::ptr::eq(expression_checkers(true), expression_checkers(true)));
    assert!(!std::ptr::eq(declaration_checkers(false), declaration_checkers(true)));
}

#[test]
fn extended_sets_include_every_common_checker() {
    let common = declaration_checkers(false);
    let extended = declaration_checkers(true);
    for name in common.names() {
        assert!(extended.contains(name), "extended set lost {name}");
    }
    assert!(extended.contains("class-naming"));
    assert!(!common.contains("class-naming"));

    for name in expression_checkers(false).names() {
        assert!(expression_checkers(true).contains(name), "extended set lost {name}");
    }
    assert!(expression_checkers(true).contains("constant-condition"));
}

#[test]
fn sub_checkers_run_after_their_parent() {
    let selected = names(&declaration_checkers(false).for_kind(SyntaxKind::Function));
    assert_eq!(
        selected,
        [
            "conflicting-type-parameters",
            "function-body",
            "abstract-member-in-non-abstract-class",
        ]
    );
    // Shared by the function and property checkers, expanded once per kind.
    let property = names(&declaration_checkers(false).for_kind(SyntaxKind::Property));
    assert_eq!(
        property
            .iter()
            .filter(|&&n| n == "abstract-member-in-non-abstract-class")
            .count(),
        1
    );
}

#[test]
fn sub_checkers_are_part_of_the_registered_names() {
    assert!(declaration_checkers(false).contains("abstract-member-in-non-abstract-class"));
    assert!(declaration_checkers(true).contains("abstract-member-in-non-abstract-class"));
}

#[test]
fn file_node_skips_basic_checkers() {
    let selected = names(&declaration_checkers(true).for_kind(SyntaxKind::File));
    assert_eq!(selected, ["redeclaration"]);
}

#[test]
fn merge_is_additive_and_ignores_duplicates() {
    let base = DeclarationCheckers {
        class: vec![declaration::REDECLARATION],
        control_flow: vec![control_flow::UNREACHABLE_CODE],
        ..DeclarationCheckers::default()
    };
    let other = DeclarationCheckers {
        class: vec![declaration::REDECLARATION, declaration::CLASS_NAMING],
        control_flow: vec![control_flow::UNUSED_VARIABLE],
        ..DeclarationCheckers::default()
    };
    let merged = base.merge(&other);
    assert_eq!(names(&merged.class), ["redeclaration", "class-naming"]);
    let flow: Vec<_> = merged.flow_checkers().map(|c| c.name()).collect();
    assert_eq!(flow, ["unreachable-code", "unused-variable"]);

    let expressions = ExpressionCheckers {
        call: vec![expression::ARGUMENT_COUNT],
        ..ExpressionCheckers::default()
    }
    .merge(&ExpressionCheckers {
        call: vec![expression::ARGUMENT_COUNT],
        condition: vec![expression::CONSTANT_CONDITION],
        ..ExpressionCheckers::default()
    });
    assert_eq!(expressions.names(), ["argument-count", "constant-condition"]);
}

#[test]
fn flow_checkers_keep_bucket_order() {
    let flow: Vec<_> = declaration_checkers(false)
        .flow_checkers()
        .map(|c| c.name())
        .collect();
    assert_eq!(flow, ["unreachable-code", "missing-return", "uninitialized-variable"]);
}

#[test]
fn component_selection_depends_only_on_the_flag() {
    let common: Vec<_> = components_for(false).iter().map(CheckerComponent::name).collect();
    assert_eq!(common, ["declarations", "expressions", "error-nodes", "control-flow"]);
    let extended: Vec<_> = components_for(true).iter().map(CheckerComponent::name).collect();
    assert_eq!(extended, ["declarations", "expressions", "error-reports", "control-flow"]);

    match components_for(true).last() {
        Some(CheckerComponent::ControlFlow(set)) => {
            assert!(std::ptr::eq(*set, declaration_checkers(true)));
        }
        other => panic!("expected control flow last, got {other:?}"),
    }
}
