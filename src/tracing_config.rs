//! Subscriber installation for hosts and tests that want to watch a what-if
//! request: correspondence, dependent-state build and collection all emit
//! spans under the `fir_*` targets.
//!
//! ```bash
//! FIR_LOG=fir_lowlevel=debug FIR_LOG_FORMAT=tree cargo test --test what_if_analysis_tests
//! ```
//!
//! `FIR_LOG` wins over `RUST_LOG`; with neither set nothing is installed.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "FIR_LOG";
const FORMAT_VAR: &str = "FIR_LOG_FORMAT";
const FALLBACK_LOG_VAR: &str = "RUST_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    /// Indented span hierarchy (`tracing-tree`).
    Tree,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Filter directives and output format resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub directives: String,
    pub format: LogFormat,
}

impl TracingConfig {
    /// Resolve from variables supplied by `lookup`. `None` when logging was
    /// not requested.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let directives = lookup(LOG_VAR).or_else(|| lookup(FALLBACK_LOG_VAR))?;
        let format = lookup(FORMAT_VAR)
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();
        Some(TracingConfig { directives, format })
    }

    pub fn from_env() -> Option<Self> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Install as the global subscriber on stderr. Returns `false` if another
    /// subscriber was already installed.
    pub fn install(&self) -> bool {
        let filter = EnvFilter::builder().parse_lossy(&self.directives);
        let text = (self.format == LogFormat::Text)
            .then(|| fmt::layer().with_writer(std::io::stderr));
        let json = (self.format == LogFormat::Json)
            .then(|| fmt::layer().json().with_writer(std::io::stderr));
        let tree = (self.format == LogFormat::Tree).then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true)
        });
        Registry::default()
            .with(filter)
            .with(text)
            .with(json)
            .with(tree)
            .try_init()
            .is_ok()
    }
}

/// Install the subscriber described by the environment, if any. Safe to call
/// repeatedly.
pub fn init_tracing() {
    if let Some(config) = TracingConfig::from_env() {
        config.install();
    }
}
