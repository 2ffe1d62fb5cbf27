//! Reachability and definite-assignment checks over function bodies.
//!
//! Each checker runs once per function declaration, local ones included, and
//! never descends into a nested function or class: those get their own run.

use fir_common::diagnostic_messages;
use fir_semantic::{DeclRef, FirElement, Resolution, SymbolOrigin};
use fir_syntax::SyntaxKind;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use super::{block_body, body_expression, name_of, return_type};
use crate::context::CheckerContext;
use crate::registry::ControlFlowChecker;
use crate::reporter::DiagnosticReporter;

pub const UNREACHABLE_CODE: &dyn ControlFlowChecker = &UnreachableCodeChecker;
pub const MISSING_RETURN: &dyn ControlFlowChecker = &MissingReturnChecker;
pub const UNINITIALIZED_VARIABLE: &dyn ControlFlowChecker = &UninitializedVariableChecker;
pub const UNUSED_VARIABLE: &dyn ControlFlowChecker = &UnusedVariableChecker;

// =============================================================================
// Fall-through analysis
// =============================================================================

/// Whether execution can continue after every statement of a block.
pub fn block_falls_through(block: &FirElement) -> bool {
    block.children().all(statement_falls_through)
}

/// Whether execution can continue after a statement.
pub fn statement_falls_through(statement: &FirElement) -> bool {
    match statement.kind {
        SyntaxKind::Return => false,
        SyntaxKind::Block => block_falls_through(statement),
        // if (cond) then else: exits only when both branches exit.
        SyntaxKind::If => {
            let mut branches = statement.children().skip(1);
            match (branches.next(), branches.next()) {
                (Some(then), Some(otherwise)) => {
                    statement_falls_through(then) || statement_falls_through(otherwise)
                }
                _ => true,
            }
        }
        SyntaxKind::Call => !is_nothing_call(statement),
        _ => true,
    }
}

/// A call to the builtin `error`, which never returns.
fn is_nothing_call(call: &FirElement) -> bool {
    call.resolution
        .as_ref()
        .and_then(Resolution::symbol)
        .is_some_and(|symbol| symbol.origin == SymbolOrigin::Builtin && symbol.name == "error")
}

/// Code below a function in its own tree: nested functions and classes excluded.
fn is_separate_body(element: &FirElement) -> bool {
    matches!(
        element.kind,
        SyntaxKind::Function | SyntaxKind::Class | SyntaxKind::Object
    )
}

fn for_each_block<'e>(element: &'e FirElement, visit: &mut impl FnMut(&'e FirElement)) {
    if element.kind == SyntaxKind::Block {
        visit(element);
    }
    for child in element.children() {
        if !is_separate_body(child) {
            for_each_block(child, visit);
        }
    }
}

/// Statements after one that never completes, reported once per block.
pub struct UnreachableCodeChecker;

impl ControlFlowChecker for UnreachableCodeChecker {
    fn name(&self) -> &'static str {
        "unreachable-code"
    }

    fn check(
        &self,
        function: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let Some(body) = body_expression(function) else {
            return;
        };
        for_each_block(body, &mut |block| {
            let mut exited = false;
            for statement in block.children() {
                if exited {
                    // Local declarations are hoisted and have no runtime effect here.
                    if is_separate_body(statement) {
                        continue;
                    }
                    reporter.report_on(statement, &diagnostic_messages::UNREACHABLE_CODE, &[]);
                    break;
                }
                if !statement_falls_through(statement) {
                    exited = true;
                }
            }
        });
    }
}

/// A function with a block body and a declared non-`Unit` return type must
/// not run off the end of its body.
pub struct MissingReturnChecker;

impl ControlFlowChecker for MissingReturnChecker {
    fn name(&self) -> &'static str {
        "missing-return"
    }

    fn check(
        &self,
        function: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let (Some(body), Some(returns)) = (block_body(function), return_type(function)) else {
            return;
        };
        if matches!(returns.name(), Some("Unit" | "Nothing")) {
            return;
        }
        if block_falls_through(body) {
            reporter.report_on(
                function,
                &diagnostic_messages::NO_RETURN_IN_FUNCTION_WITH_BLOCK_BODY,
                &[name_of(function)],
            );
        }
    }
}

// =============================================================================
// Local variables
// =============================================================================

fn local_variable_id(element: &FirElement) -> Option<DeclRef> {
    (element.kind == SyntaxKind::Property && element.is_local)
        .then(|| DeclRef::new(element.tree, element.source))
}

fn referenced_declaration(element: &FirElement) -> Option<DeclRef> {
    element
        .resolution
        .as_ref()
        .and_then(Resolution::symbol)
        .and_then(|symbol| symbol.declaration())
}

/// Reads of a local `val`/`var` declared without an initializer before any
/// assignment to it, in evaluation order.
pub struct UninitializedVariableChecker;

struct AssignmentState {
    uninitialized: FxHashSet<DeclRef>,
    reported: FxHashSet<DeclRef>,
}

impl UninitializedVariableChecker {
    fn walk(element: &FirElement, state: &mut AssignmentState, reporter: &mut DiagnosticReporter) {
        match element.kind {
            SyntaxKind::Property => {
                match body_expression(element) {
                    Some(initializer) => Self::walk(initializer, state, reporter),
                    None => {
                        if let Some(id) = local_variable_id(element) {
                            state.uninitialized.insert(id);
                        }
                    }
                }
                return;
            }
            SyntaxKind::Assignment => {
                let mut children = element.children();
                let target = children.next();
                for value in children {
                    Self::walk(value, state, reporter);
                }
                if let Some(id) = target.and_then(referenced_declaration) {
                    state.uninitialized.remove(&id);
                }
                return;
            }
            SyntaxKind::NameReference => {
                if let Some(id) = referenced_declaration(element)
                    && state.uninitialized.contains(&id)
                    && state.reported.insert(id)
                {
                    reporter.report_on(
                        element,
                        &diagnostic_messages::UNINITIALIZED_VARIABLE,
                        &[name_of(element)],
                    );
                }
            }
            _ => {}
        }
        for child in element.children() {
            if !is_separate_body(child) {
                Self::walk(child, state, reporter);
            }
        }
    }
}

impl ControlFlowChecker for UninitializedVariableChecker {
    fn name(&self) -> &'static str {
        "uninitialized-variable"
    }

    fn check(
        &self,
        function: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let Some(body) = body_expression(function) else {
            return;
        };
        let mut state = AssignmentState {
            uninitialized: FxHashSet::default(),
            reported: FxHashSet::default(),
        };
        Self::walk(body, &mut state, reporter);
    }
}

fn collect_locals<'e>(element: &'e FirElement, out: &mut IndexMap<DeclRef, &'e FirElement>) {
    if let Some(id) = local_variable_id(element) {
        out.insert(id, element);
    }
    for child in element.children() {
        if !is_separate_body(child) {
            collect_locals(child, out);
        }
    }
}

/// Local variables never read or written after their declaration.
pub struct UnusedVariableChecker;

impl ControlFlowChecker for UnusedVariableChecker {
    fn name(&self) -> &'static str {
        "unused-variable"
    }

    fn check(
        &self,
        function: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let Some(body) = body_expression(function) else {
            return;
        };
        let mut locals = IndexMap::new();
        collect_locals(body, &mut locals);
        // Nested functions and lambdas may capture locals, so uses are
        // collected from the whole body.
        let mut used = FxHashSet::default();
        body.walk(&mut |element| {
            if let Some(id) = referenced_declaration(element) {
                used.insert(id);
            }
        });
        for (id, local) in locals {
            let name = name_of(local);
            if !used.contains(&id) && !name.starts_with('_') {
                reporter.report_on(local, &diagnostic_messages::UNUSED_VARIABLE, &[name]);
            }
        }
    }
}
