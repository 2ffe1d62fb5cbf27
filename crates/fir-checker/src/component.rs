//! Checker components: the units a collection run dispatches each element to.

use fir_semantic::{ElementCategory, FirElement};
use fir_syntax::SyntaxKind;

use crate::checkers::error_nodes::check_error_node;
use crate::context::CheckerContext;
use crate::registry::{
    DeclarationCheckers, ExpressionCheckers, declaration_checkers, expression_checkers,
};
use crate::reporter::DiagnosticReporter;

#[derive(Clone, Copy)]
pub enum CheckerComponent {
    Declarations(&'static DeclarationCheckers),
    Expressions(&'static ExpressionCheckers),
    /// Runs the `control_flow` and `variable_assignment` buckets on functions.
    ControlFlow(&'static DeclarationCheckers),
    /// Error reporting plus fallback coverage: claims every element.
    ErrorNodes,
    /// Error reporting only: claims just the elements it reports on.
    ErrorReports,
}

impl CheckerComponent {
    pub fn name(&self) -> &'static str {
        match self {
            CheckerComponent::Declarations(_) => "declarations",
            CheckerComponent::Expressions(_) => "expressions",
            CheckerComponent::ControlFlow(_) => "control-flow",
            CheckerComponent::ErrorNodes => "error-nodes",
            CheckerComponent::ErrorReports => "error-reports",
        }
    }

    /// Run this component's checkers on `element`. Returns whether any checker ran.
    pub fn visit(
        &self,
        element: &FirElement,
        ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) -> bool {
        match self {
            CheckerComponent::Declarations(checkers) => {
                if !matches!(
                    element.category(),
                    ElementCategory::Declaration | ElementCategory::File
                ) {
                    return false;
                }
                let selected = checkers.for_kind(element.kind);
                for checker in &selected {
                    checker.check(element, ctx, reporter);
                }
                !selected.is_empty()
            }
            CheckerComponent::Expressions(checkers) => {
                if element.category() != ElementCategory::Expression {
                    return false;
                }
                let mut handled = false;
                for checker in checkers.for_kind(element.kind) {
                    checker.check(element, ctx, reporter);
                    handled = true;
                }
                handled
            }
            CheckerComponent::ControlFlow(checkers) => {
                if element.kind != SyntaxKind::Function {
                    return false;
                }
                let mut handled = false;
                for checker in checkers.flow_checkers() {
                    checker.check(element, ctx, reporter);
                    handled = true;
                }
                handled
            }
            CheckerComponent::ErrorNodes => {
                check_error_node(element, reporter);
                true
            }
            CheckerComponent::ErrorReports => check_error_node(element, reporter),
        }
    }
}

impl std::fmt::Debug for CheckerComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Components of a run. Control flow is always last and always uses the
/// chosen declaration set. Only the common configuration gets the
/// all-claiming fallback; the extended one still reports error nodes.
pub fn components_for(extended: bool) -> Vec<CheckerComponent> {
    let declarations = declaration_checkers(extended);
    let errors = if extended {
        CheckerComponent::ErrorReports
    } else {
        CheckerComponent::ErrorNodes
    };
    vec![
        CheckerComponent::Declarations(declarations),
        CheckerComponent::Expressions(expression_checkers(extended)),
        errors,
        CheckerComponent::ControlFlow(declarations),
    ]
}
