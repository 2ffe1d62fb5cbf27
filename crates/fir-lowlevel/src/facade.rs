//! Entry point combining correspondence resolution and dependent-state building.

use std::sync::Arc;

use fir_common::CancellationToken;
use fir_common::limits::MAX_EXCERPT_LENGTH;
use fir_semantic::ResolutionState;
use fir_syntax::{NodeIndex, SyntaxTree};
use tracing::instrument;

use crate::correspondence::{
    CorrespondenceMap, find_enclosing_non_local_declaration, resolve_correspondence,
    resolve_correspondence_at_offset,
};
use crate::dependent::DependentResolutionState;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Maximum characters of source text quoted in error contexts.
    pub excerpt_length: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            excerpt_length: MAX_EXCERPT_LENGTH,
        }
    }
}

/// Speculative-analysis facade over one or more original resolution states.
///
/// The facade itself holds no analysis data and may be shared freely; each
/// call is independent.
#[derive(Clone, Debug, Default)]
pub struct LowLevelFacade {
    options: ResolveOptions,
    cancellation: Option<CancellationToken>,
}

impl LowLevelFacade {
    pub fn new(options: ResolveOptions) -> Self {
        LowLevelFacade {
            options,
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    #[inline]
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    fn check_cancelled(&self) -> Result<()> {
        if let Some(token) = &self.cancellation {
            token.check()?;
        }
        Ok(())
    }

    pub fn find_enclosing_non_local_declaration(
        &self,
        tree: &SyntaxTree,
        node: NodeIndex,
    ) -> Result<NodeIndex> {
        find_enclosing_non_local_declaration(tree, node, &self.options)
    }

    pub fn resolve_correspondence(
        &self,
        copy: &SyntaxTree,
        original: &SyntaxTree,
        node: NodeIndex,
    ) -> Result<CorrespondenceMap> {
        self.check_cancelled()?;
        resolve_correspondence(copy, original, node, &self.options)
    }

    /// Dependent state for the declaration of `copy` enclosing `node`.
    #[instrument(level = "debug", skip_all, fields(copy = %copy.id(), node = %node))]
    pub fn dependent_state_for(
        &self,
        original: &Arc<ResolutionState>,
        copy: &Arc<SyntaxTree>,
        node: NodeIndex,
    ) -> Result<DependentResolutionState> {
        self.check_cancelled()?;
        let correspondence = resolve_correspondence(copy, original.tree(), node, &self.options)?;
        self.check_cancelled()?;
        DependentResolutionState::build(
            Arc::clone(original),
            Arc::clone(copy),
            correspondence,
            &self.options,
        )
    }

    /// Dependent state for the declaration of `copy` enclosing `offset`.
    #[instrument(level = "debug", skip_all, fields(copy = %copy.id(), offset = offset))]
    pub fn dependent_state_at_offset(
        &self,
        original: &Arc<ResolutionState>,
        copy: &Arc<SyntaxTree>,
        offset: u32,
    ) -> Result<DependentResolutionState> {
        self.check_cancelled()?;
        let correspondence =
            resolve_correspondence_at_offset(copy, original.tree(), offset, &self.options)?;
        self.check_cancelled()?;
        DependentResolutionState::build(
            Arc::clone(original),
            Arc::clone(copy),
            correspondence,
            &self.options,
        )
    }
}
