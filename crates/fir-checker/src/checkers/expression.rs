//! Expression checkers.

use fir_common::diagnostic_messages;
use fir_semantic::{FirElement, Resolution};
use fir_syntax::SyntaxKind;

use super::name_of;
use crate::context::CheckerContext;
use crate::registry::ExpressionChecker;
use crate::reporter::DiagnosticReporter;

pub const RETURN_NOT_ALLOWED: &dyn ExpressionChecker = &ReturnNotAllowedChecker;
pub const ARGUMENT_COUNT: &dyn ExpressionChecker = &ArgumentCountChecker;
pub const CONSTANT_CONDITION: &dyn ExpressionChecker = &ConstantConditionChecker;

/// `return` outside a function or lambda body, e.g. in a member initializer.
pub struct ReturnNotAllowedChecker;

impl ExpressionChecker for ReturnNotAllowedChecker {
    fn name(&self) -> &'static str {
        "return-not-allowed"
    }

    fn check(
        &self,
        expression: &FirElement,
        ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        if expression.kind == SyntaxKind::Return && ctx.enclosing_callable().is_none() {
            reporter.report_on(expression, &diagnostic_messages::RETURN_NOT_ALLOWED, &[]);
        }
    }
}

/// Argument count against the arity of the resolved function or constructor.
pub struct ArgumentCountChecker;

impl ExpressionChecker for ArgumentCountChecker {
    fn name(&self) -> &'static str {
        "argument-count"
    }

    fn check(
        &self,
        call: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let Some(symbol) = call.resolution.as_ref().and_then(Resolution::symbol) else {
            return;
        };
        let Some(expected) = symbol.arity.filter(|_| symbol.kind.has_signature()) else {
            return;
        };
        let found = call.children.len() as u32;
        let message = if found > expected {
            &diagnostic_messages::TOO_MANY_ARGUMENTS
        } else if found < expected {
            &diagnostic_messages::NO_VALUE_FOR_PARAMETER
        } else {
            return;
        };
        let (expected, found) = (expected.to_string(), found.to_string());
        reporter.report_on(call, message, &[name_of(call), &expected, &found]);
    }
}

/// `if (true)` / `if (false)`.
pub struct ConstantConditionChecker;

impl ExpressionChecker for ConstantConditionChecker {
    fn name(&self) -> &'static str {
        "constant-condition"
    }

    fn check(
        &self,
        expression: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let Some(condition) = expression.children().next() else {
            return;
        };
        if condition.kind != SyntaxKind::Literal {
            return;
        }
        if let Some(value @ ("true" | "false")) = condition.name() {
            reporter.report_on(condition, &diagnostic_messages::CONDITION_ALWAYS_CONSTANT, &[value]);
        }
    }
}
