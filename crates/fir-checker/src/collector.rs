//! Diagnostics Collector
//!
//! Drives a pre-order traversal of a resolved file (or of one declaration
//! record) and dispatches every element to the checker components of the
//! configured mode. Diagnostics surviving suppression are queued in the
//! reporter and flushed at each completed structure element, either to the
//! caller's sink (push) or into the collector's own buffer (pull).

use fir_common::limits::CANCELLATION_CHECK_INTERVAL;
use fir_common::{CancellationPoller, CancellationToken, Cancelled, Diagnostic};
use fir_semantic::{DeclRef, DeclarationRecord, FirElement, FirNode, ResolutionSession};
use indexmap::IndexMap;
use tracing::{debug, instrument, trace};

use crate::component::{CheckerComponent, components_for};
use crate::context::CheckerContext;
use crate::reporter::{DiagnosticReporter, SuppressionIndex};
use crate::sink::{DeliveryMode, DiagnosticSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectorOptions {
    /// Run the extended checker set instead of the common one.
    pub extended_checkers: bool,
    /// Element visits between two cancellation polls.
    pub cancellation_check_interval: u32,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        CollectorOptions {
            extended_checkers: false,
            cancellation_check_interval: CANCELLATION_CHECK_INTERVAL,
        }
    }
}

/// Counters of one collection run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub visited: usize,
    /// Elements no component claimed.
    pub unhandled: usize,
    pub reported: usize,
    pub suppressed: usize,
}

/// Pull-mode diagnostics grouped by the structure element that produced them.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticsByElement {
    /// Reported outside any non-local declaration, e.g. on imports.
    pub file_level: Vec<Diagnostic>,
    pub by_declaration: IndexMap<DeclRef, Vec<Diagnostic>>,
}

impl DiagnosticsByElement {
    pub fn for_declaration(&self, declaration: DeclRef) -> &[Diagnostic] {
        self.by_declaration
            .get(&declaration)
            .map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.file_level.len() + self.by_declaration.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum Target<'s> {
    Push(&'s mut dyn DiagnosticSink),
    Pull {
        diagnostics: Vec<Diagnostic>,
        /// Structure element of each buffered diagnostic, parallel to `diagnostics`.
        owners: Vec<Option<DeclRef>>,
    },
}

struct PullSink<'a> {
    diagnostics: &'a mut Vec<Diagnostic>,
    owners: &'a mut Vec<Option<DeclRef>>,
    owner: Option<DeclRef>,
}

impl DiagnosticSink for PullSink<'_> {
    fn on_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
        self.owners.push(self.owner);
    }
}

pub struct DiagnosticsCollector<'s> {
    options: CollectorOptions,
    components: Vec<CheckerComponent>,
    cancellation: Option<CancellationToken>,
    target: Target<'s>,
}

impl<'s> DiagnosticsCollector<'s> {
    /// A collector that buffers diagnostics for [`DiagnosticsCollector::collected_diagnostics`].
    pub fn pull(options: CollectorOptions) -> Self {
        DiagnosticsCollector::with_target(
            options,
            Target::Pull {
                diagnostics: Vec::new(),
                owners: Vec::new(),
            },
        )
    }

    /// A collector that delivers to `sink` and retains nothing.
    pub fn push(options: CollectorOptions, sink: &'s mut dyn DiagnosticSink) -> Self {
        DiagnosticsCollector::with_target(options, Target::Push(sink))
    }

    fn with_target(options: CollectorOptions, target: Target<'s>) -> Self {
        DiagnosticsCollector {
            options,
            components: components_for(options.extended_checkers),
            cancellation: None,
            target,
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn options(&self) -> &CollectorOptions {
        &self.options
    }

    pub fn components(&self) -> &[CheckerComponent] {
        &self.components
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        match self.target {
            Target::Push(_) => DeliveryMode::Push,
            Target::Pull { .. } => DeliveryMode::Pull,
        }
    }

    /// Diagnostics buffered so far. Always empty in push mode.
    pub fn collected_diagnostics(&self) -> &[Diagnostic] {
        match &self.target {
            Target::Push(_) => &[],
            Target::Pull { diagnostics, .. } => diagnostics,
        }
    }

    /// Move the buffered diagnostics out, leaving the buffer empty.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        match &mut self.target {
            Target::Push(_) => Vec::new(),
            Target::Pull {
                diagnostics,
                owners,
            } => {
                owners.clear();
                std::mem::take(diagnostics)
            }
        }
    }

    pub fn diagnostics_by_element(&self) -> DiagnosticsByElement {
        let mut grouped = DiagnosticsByElement::default();
        if let Target::Pull {
            diagnostics,
            owners,
        } = &self.target
        {
            for (diagnostic, owner) in diagnostics.iter().zip(owners) {
                match owner {
                    Some(declaration) => grouped
                        .by_declaration
                        .entry(*declaration)
                        .or_default()
                        .push(diagnostic.clone()),
                    None => grouped.file_level.push(diagnostic.clone()),
                }
            }
        }
        grouped
    }

    /// Check every element of the session's file.
    #[instrument(level = "debug", skip_all, fields(file = session.file_name()))]
    pub fn collect_file(
        &mut self,
        session: &dyn ResolutionSession,
    ) -> Result<CollectionStats, Cancelled> {
        let file = session.file_element();
        let suppressions = SuppressionIndex::from_element(&file);
        self.run(&file, None, session.file_name(), suppressions)
    }

    /// Check one non-local declaration and the declarations nested in it.
    #[instrument(level = "debug", skip_all, fields(declaration = %record.declaration))]
    pub fn collect_declaration(
        &mut self,
        record: &DeclarationRecord,
        file_name: &str,
    ) -> Result<CollectionStats, Cancelled> {
        let suppressions = SuppressionIndex::from_element(&record.element);
        self.run(
            &record.element,
            Some(record.declaration),
            file_name,
            suppressions,
        )
    }

    fn run<'e>(
        &mut self,
        root: &'e FirElement,
        owner: Option<DeclRef>,
        file_name: &'e str,
        suppressions: SuppressionIndex,
    ) -> Result<CollectionStats, Cancelled> {
        let DiagnosticsCollector {
            options,
            components,
            cancellation,
            target,
        } = self;
        let poller = CancellationPoller::new(
            cancellation.as_ref(),
            options.cancellation_check_interval,
        );
        poller.check_now()?;

        let mut traversal = Traversal {
            components: components.as_slice(),
            ctx: CheckerContext::new(file_name),
            reporter: DiagnosticReporter::new(file_name, suppressions),
            poller,
            target,
            owners: Vec::new(),
            stats: CollectionStats::default(),
        };
        let result = match owner {
            Some(declaration) => traversal.visit_record(declaration, root),
            None => traversal.visit(root),
        };

        if let Err(cancelled) = result {
            let dropped = traversal.reporter.discard_pending();
            debug!(dropped, visited = traversal.stats.visited, "collection cancelled");
            return Err(cancelled);
        }
        traversal.flush();

        let mut stats = traversal.stats;
        stats.reported = traversal.reporter.reported_count();
        stats.suppressed = traversal.reporter.suppressed_count();
        debug!(
            visited = stats.visited,
            unhandled = stats.unhandled,
            reported = stats.reported,
            suppressed = stats.suppressed,
            "collection finished"
        );
        Ok(stats)
    }
}

struct Traversal<'r, 's, 'e> {
    components: &'r [CheckerComponent],
    ctx: CheckerContext<'e>,
    reporter: DiagnosticReporter,
    poller: CancellationPoller<'r>,
    target: &'r mut Target<'s>,
    /// Structure elements being visited, innermost last.
    owners: Vec<DeclRef>,
    stats: CollectionStats,
}

impl<'e> Traversal<'_, '_, 'e> {
    fn flush(&mut self) {
        let owner = self.owners.last().copied();
        let delivered = match &mut *self.target {
            Target::Push(sink) => self.reporter.flush_to(&mut **sink),
            Target::Pull {
                diagnostics,
                owners,
            } => self.reporter.flush_to(&mut PullSink {
                diagnostics,
                owners,
                owner,
            }),
        };
        if delivered > 0 {
            trace!(delivered, "flushed diagnostics");
        }
    }

    fn visit_record(&mut self, owner: DeclRef, element: &'e FirElement) -> Result<(), Cancelled> {
        self.flush();
        self.owners.push(owner);
        let result = self.visit(element);
        if result.is_ok() {
            self.flush();
        }
        self.owners.pop();
        result
    }

    fn visit(&mut self, element: &'e FirElement) -> Result<(), Cancelled> {
        self.poller.tick()?;
        self.stats.visited += 1;

        let mut handled = false;
        for component in self.components {
            handled |= component.visit(element, &self.ctx, &mut self.reporter);
        }
        if !handled {
            self.stats.unhandled += 1;
            trace!(kind = ?element.kind, start = element.range.start, "unhandled element");
        }

        self.ctx.push(element);
        for child in &element.children {
            match child {
                FirNode::Element(inline) => self.visit(inline)?,
                FirNode::Declaration(record) => {
                    self.visit_record(record.declaration, &record.element)?;
                }
            }
        }
        self.ctx.pop();
        Ok(())
    }
}
