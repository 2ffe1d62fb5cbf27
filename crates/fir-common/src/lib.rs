//! Common types and utilities for the FIR analysis crates.
//!
//! This crate provides foundational types used across all fir crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, the message table)
//! - Source ranges (`TextRange`)
//! - Cooperative cancellation (`CancellationToken`, `Cancelled`)
//! - Analysis limits and thresholds

// Diagnostic data model and message lookup
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticRelatedInformation,
    diagnostic_codes, diagnostic_messages, format_message, get_diagnostic_message,
    get_diagnostic_message_by_name,
};

// Text ranges - byte offsets into a syntax tree's source text
pub mod range;
pub use range::TextRange;

// Cooperative cancellation shared between a request and its caller
pub mod cancellation;
pub use cancellation::{CancellationPoller, CancellationToken, Cancelled};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "../tests/cancellation_tests.rs"]
mod cancellation_tests;
