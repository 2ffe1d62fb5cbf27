//! Failures of correspondence resolution and dependent-state construction.

use fir_common::Cancelled;
use fir_syntax::SyntaxKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The caller broke a precondition; never retried.
    #[error("contract violation: {message}\n  at: `{context}`")]
    ContractViolation { message: String, context: String },

    /// An ancestor level of the copy has no original declaration of the same
    /// kind at the same offset.
    #[error("no original {kind} at offset {offset} corresponds to `{context}`")]
    CorrespondenceNotFound {
        kind: SyntaxKind,
        offset: u32,
        context: String,
    },

    #[error("resolution cancelled")]
    Cancelled,
}

impl ResolveError {
    pub(crate) fn contract(message: impl Into<String>, context: impl Into<String>) -> Self {
        ResolveError::ContractViolation {
            message: message.into(),
            context: context.into(),
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ResolveError::ContractViolation { .. })
    }

    /// Cancellation is a normal outcome: callers drop partial work and move on.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ResolveError::Cancelled)
    }
}

impl From<Cancelled> for ResolveError {
    fn from(_: Cancelled) -> Self {
        ResolveError::Cancelled
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
