//! Diagnostic sinks.

use fir_common::Diagnostic;
use serde::{Deserialize, Serialize};

/// Receiver of delivered diagnostics, e.g. an editor's problem view.
pub trait DiagnosticSink {
    fn on_diagnostic(&mut self, diagnostic: Diagnostic);
}

impl<F: FnMut(Diagnostic)> DiagnosticSink for F {
    fn on_diagnostic(&mut self, diagnostic: Diagnostic) {
        self(diagnostic);
    }
}

/// How a collector hands out its diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Delivered to a caller's sink as each declaration completes; nothing is retained.
    Push,
    /// Buffered in the collector and read back after the run.
    #[default]
    Pull,
}

/// A sink that keeps everything it receives.
#[derive(Clone, Debug, Default)]
pub struct BufferedSink {
    diagnostics: Vec<Diagnostic>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Codes in delivery order.
    pub fn codes(&self) -> Vec<u32> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }
}

impl DiagnosticSink for BufferedSink {
    fn on_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
