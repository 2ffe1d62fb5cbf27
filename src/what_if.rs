//! What-if analysis: diagnostics of an edited copy of a file.

use std::sync::Arc;

use anyhow::{Context, Result};
use fir_checker::{CollectionStats, DiagnosticSink};
use fir_common::{CancellationToken, Diagnostic};
use fir_lowlevel::DependentResolutionState;
use fir_semantic::ResolutionState;
use fir_syntax::SyntaxTree;
use tracing::{debug, instrument};

use crate::options::AnalysisOptions;

/// Outcome of one what-if request.
pub struct WhatIfReport {
    pub state: DependentResolutionState,
    pub stats: CollectionStats,
    /// Collected diagnostics in pull mode; empty in push mode.
    pub diagnostics: Vec<Diagnostic>,
}

/// Re-resolve the declaration of `copy` enclosing `offset` against `original`
/// and collect the diagnostics of the resulting file.
#[instrument(level = "debug", skip_all, fields(file = copy.file_name(), offset = offset))]
pub fn analyze_copy_at_offset(
    original: &Arc<ResolutionState>,
    copy: &Arc<SyntaxTree>,
    offset: u32,
    options: &AnalysisOptions,
    sink: Option<&mut dyn DiagnosticSink>,
    cancellation: Option<&CancellationToken>,
) -> Result<WhatIfReport> {
    let state = options
        .facade(cancellation)
        .dependent_state_at_offset(original, copy, offset)
        .with_context(|| format!("failed to derive a dependent state at offset {offset}"))?;

    let mut collector = options.collector(sink, cancellation)?;
    let stats = collector
        .collect_file(&state)
        .context("diagnostics collection was cancelled")?;
    debug!(
        rebuilt = %state.replaced_record().declaration,
        reported = stats.reported,
        "what-if analysis finished"
    );
    Ok(WhatIfReport {
        stats,
        diagnostics: collector.take_diagnostics(),
        state,
    })
}
