//! Analysis configuration.
//!
//! One JSON object configures both halves of a what-if request: how the
//! dependent state is resolved and how its diagnostics are collected.
//!
//! ```json
//! { "extendedCheckers": true, "delivery": "push", "cancellationCheckInterval": 32 }
//! ```

use anyhow::{Context, Result, bail};
use fir_checker::{CollectorOptions, DeliveryMode, DiagnosticSink, DiagnosticsCollector};
use fir_common::CancellationToken;
use fir_common::limits::{CANCELLATION_CHECK_INTERVAL, MAX_EXCERPT_LENGTH};
use fir_lowlevel::{LowLevelFacade, ResolveOptions};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOptions {
    pub extended_checkers: bool,
    pub delivery: DeliveryMode,
    pub cancellation_check_interval: u32,
    pub excerpt_length: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            extended_checkers: false,
            delivery: DeliveryMode::default(),
            cancellation_check_interval: CANCELLATION_CHECK_INTERVAL,
            excerpt_length: MAX_EXCERPT_LENGTH,
        }
    }
}

impl AnalysisOptions {
    /// Parse options from JSON text. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let options: AnalysisOptions =
            serde_json::from_str(text).context("failed to parse analysis options")?;
        if options.cancellation_check_interval == 0 {
            bail!("cancellationCheckInterval must be at least 1");
        }
        Ok(options)
    }

    pub fn collector_options(&self) -> CollectorOptions {
        CollectorOptions {
            extended_checkers: self.extended_checkers,
            cancellation_check_interval: self.cancellation_check_interval,
        }
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            excerpt_length: self.excerpt_length,
        }
    }

    pub fn facade(&self, cancellation: Option<&CancellationToken>) -> LowLevelFacade {
        let facade = LowLevelFacade::new(self.resolve_options());
        match cancellation {
            Some(token) => facade.with_cancellation(token.clone()),
            None => facade,
        }
    }

    /// A collector for the configured delivery mode.
    ///
    /// Push delivery requires `sink`; pull delivery ignores it.
    pub fn collector<'s>(
        &self,
        sink: Option<&'s mut dyn DiagnosticSink>,
        cancellation: Option<&CancellationToken>,
    ) -> Result<DiagnosticsCollector<'s>> {
        let options = self.collector_options();
        let collector = match (self.delivery, sink) {
            (DeliveryMode::Push, Some(sink)) => DiagnosticsCollector::push(options, sink),
            (DeliveryMode::Push, None) => bail!("push delivery needs a diagnostic sink"),
            (DeliveryMode::Pull, _) => DiagnosticsCollector::pull(options),
        };
        Ok(match cancellation {
            Some(token) => collector.with_cancellation(token.clone()),
            None => collector,
        })
    }
}
