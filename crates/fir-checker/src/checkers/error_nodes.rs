//! Syntax errors and unresolved names.
//!
//! Runs in both configurations. In the common one it also serves as the
//! fallback that claims every element, so no element goes unexamined.

use fir_common::diagnostic_messages;
use fir_semantic::{FirElement, Resolution};
use fir_syntax::SyntaxKind;

use super::name_of;
use crate::reporter::DiagnosticReporter;

/// Report `element` if it is a syntax error or an unresolved reference.
/// Returns whether it was one.
pub fn check_error_node(element: &FirElement, reporter: &mut DiagnosticReporter) -> bool {
    if element.kind == SyntaxKind::ErrorElement {
        let message = element.name().unwrap_or("unexpected input");
        reporter.report_on(element, &diagnostic_messages::SYNTAX, &[message]);
        return true;
    }
    if !matches!(element.resolution, Some(Resolution::Unresolved)) {
        return false;
    }
    match element.kind {
        SyntaxKind::ThisReference => {
            reporter.report_on(element, &diagnostic_messages::NO_THIS, &[]);
            true
        }
        SyntaxKind::NameReference | SyntaxKind::Call | SyntaxKind::TypeReference => {
            reporter.report_on(
                element,
                &diagnostic_messages::UNRESOLVED_REFERENCE,
                &[name_of(element)],
            );
            true
        }
        _ => false,
    }
}
