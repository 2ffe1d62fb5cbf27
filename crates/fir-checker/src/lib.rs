//! Semantic diagnostics for resolved FIR trees.
//!
//! This crate is organized into several submodules:
//! - `registry` - checker capability traits and the memoized checker sets
//! - `checkers` - the concrete declaration, expression and control-flow checkers
//! - `component` - `CheckerComponent`, the per-node dispatch units of a run
//! - `context` - `CheckerContext`, the containing-element stack seen by checkers
//! - `reporter` - suppression filtering and per-declaration flushing
//! - `sink` - diagnostic sinks and delivery modes
//! - `collector` - `DiagnosticsCollector`, the traversal driver

pub mod checkers;
pub mod collector;
pub mod component;
pub mod context;
pub mod registry;
pub mod reporter;
pub mod sink;

pub use collector::{CollectionStats, CollectorOptions, DiagnosticsByElement, DiagnosticsCollector};
pub use component::{CheckerComponent, components_for};
pub use context::CheckerContext;
pub use registry::{
    ControlFlowChecker, DeclarationChecker, DeclarationCheckers, ExpressionChecker,
    ExpressionCheckers, declaration_checkers, expression_checkers,
};
pub use reporter::{DiagnosticReporter, SuppressionIndex};
pub use sink::{BufferedSink, DeliveryMode, DiagnosticSink};

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
#[cfg(test)]
#[path = "../tests/checker_tests.rs"]
mod checker_tests;
