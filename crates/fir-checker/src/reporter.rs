//! Diagnostic reporter: suppression filtering and ordered delivery.

use fir_common::{Diagnostic, DiagnosticMessage, TextRange, get_diagnostic_message_by_name};
use fir_semantic::FirElement;
use tracing::{debug, trace};

use crate::sink::DiagnosticSink;

/// Key that suppresses every diagnostic in its range.
pub const SUPPRESS_ALL: &str = "all";

/// Suppressed source regions of one traversal root, one entry per key.
#[derive(Clone, Debug, Default)]
pub struct SuppressionIndex {
    regions: Vec<(TextRange, String)>,
}

impl SuppressionIndex {
    /// Collect the suppressions of `root` and everything below it.
    pub fn from_element(root: &FirElement) -> Self {
        let mut index = SuppressionIndex::default();
        root.walk(&mut |element| {
            for key in &element.suppressions {
                index.add(element.range, key.as_str());
            }
        });
        index
    }

    pub fn add(&mut self, range: TextRange, key: impl Into<String>) {
        let key = key.into();
        if key != SUPPRESS_ALL && get_diagnostic_message_by_name(&key).is_none() {
            debug!(key = %key, start = range.start, "suppression key names no diagnostic");
        }
        self.regions.push((range, key));
    }

    pub fn is_suppressed(&self, offset: u32, name: &str) -> bool {
        self.regions.iter().any(|(range, key)| {
            range.contains_inclusive(offset) && (key == name || key == SUPPRESS_ALL)
        })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Receives diagnostics from checkers.
///
/// Suppressed diagnostics are dropped on arrival. Survivors wait in a queue
/// until the collector flushes them, so a cancelled run can throw away what
/// was not yet delivered.
pub struct DiagnosticReporter {
    file_name: String,
    suppressions: SuppressionIndex,
    pending: Vec<Diagnostic>,
    reported: usize,
    suppressed: usize,
}

impl DiagnosticReporter {
    pub fn new(file_name: impl Into<String>, suppressions: SuppressionIndex) -> Self {
        DiagnosticReporter {
            file_name: file_name.into(),
            suppressions,
            pending: Vec::new(),
            reported: 0,
            suppressed: 0,
        }
    }

    /// Count `message` at `range` as reported or suppressed. Returns whether it survives.
    fn accept(&mut self, range: TextRange, message: &DiagnosticMessage) -> bool {
        if self.suppressions.is_suppressed(range.start, message.name) {
            trace!(name = message.name, start = range.start, "suppressed diagnostic");
            self.suppressed += 1;
            return false;
        }
        self.reported += 1;
        true
    }

    fn build(&self, range: TextRange, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
        Diagnostic::from_message(
            self.file_name.as_str(),
            range.start,
            range.len(),
            message,
            args,
        )
    }

    pub fn report(&mut self, range: TextRange, message: &DiagnosticMessage, args: &[&str]) {
        if self.accept(range, message) {
            let diagnostic = self.build(range, message, args);
            self.pending.push(diagnostic);
        }
    }

    pub fn report_on(&mut self, element: &FirElement, message: &DiagnosticMessage, args: &[&str]) {
        self.report(element.range, message, args);
    }

    /// Report on `element` with a note pointing at `related` in the same file.
    pub fn report_related(
        &mut self,
        element: &FirElement,
        message: &DiagnosticMessage,
        args: &[&str],
        related: TextRange,
        note: String,
    ) {
        if self.accept(element.range, message) {
            let diagnostic = self.build(element.range, message, args).with_related(
                self.file_name.clone(),
                related.start,
                related.len(),
                note,
            );
            self.pending.push(diagnostic);
        }
    }

    /// Deliver queued diagnostics in report order. Returns how many were delivered.
    pub fn flush_to(&mut self, sink: &mut dyn DiagnosticSink) -> usize {
        let count = self.pending.len();
        for diagnostic in self.pending.drain(..) {
            sink.on_diagnostic(diagnostic);
        }
        count
    }

    /// Drop queued diagnostics without delivering them. Returns how many were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn pending(&self) -> &[Diagnostic] {
        &self.pending
    }

    /// Diagnostics accepted so far, delivered or not.
    pub fn reported_count(&self) -> usize {
        self.reported
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }
}
