//! Speculative FIR analysis of edited file copies.
//!
//! The workspace crates, bottom up:
//! - `fir-common` - diagnostics, ranges, cancellation and limits
//! - `fir-syntax` - the arena syntax tree and its builder
//! - `fir-semantic` - scopes, resolved elements and `ResolutionState`
//! - `fir-checker` - checker registry and the diagnostics collector
//! - `fir-lowlevel` - correspondence resolution and dependent states
//!
//! This crate ties them together behind [`AnalysisOptions`] and
//! [`analyze_copy_at_offset`].

pub use fir_checker::{
    BufferedSink, CollectionStats, CollectorOptions, DeliveryMode, DiagnosticSink,
    DiagnosticsByElement, DiagnosticsCollector,
};
pub use fir_common::{CancellationToken, Cancelled, Diagnostic, DiagnosticCategory, TextRange};
pub use fir_lowlevel::{
    CorrespondenceMap, DependentResolutionState, LowLevelFacade, ResolveError, ResolveOptions,
};
pub use fir_semantic::{DeclRef, FirElement, ResolutionSession, ResolutionState};
pub use fir_syntax::{NodeIndex, SyntaxKind, SyntaxTree, TreeBuilder};

// Configuration loaded from JSON
pub mod options;
pub use options::AnalysisOptions;

// End-to-end what-if requests
pub mod what_if;
pub use what_if::{WhatIfReport, analyze_copy_at_offset};

// Tracing subscriber setup, driven by FIR_LOG / FIR_LOG_FORMAT
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;
