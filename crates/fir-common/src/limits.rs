//! Centralized limits and thresholds for the analysis core.
//!
//! # Categories
//!
//! - **Polling intervals**: how often long traversals look at the cancellation flag
//! - **Depth limits**: guards against runaway ancestor walks on malformed trees
//! - **Display limits**: sizes of source excerpts carried by error values

// =============================================================================
// Polling Intervals
// =============================================================================

/// Number of node visits between two cancellation polls in the diagnostics collector.
///
/// Polling reads a relaxed atomic, so the cost is small, but the collector visits
/// every semantic node and checks run per node. 64 keeps the abort latency well
/// below a millisecond on typical files.
pub const CANCELLATION_CHECK_INTERVAL: u32 = 64;

// =============================================================================
// Depth Limits
// =============================================================================

/// Maximum number of ancestors walked when searching for an enclosing declaration.
///
/// Trees produced by the parser never nest this deep; the bound only protects
/// against parent cycles in hand-built or corrupted arenas.
pub const MAX_ANCESTOR_WALK: u32 = 10_000;

/// Maximum nesting depth of non-local declarations (classes inside classes).
pub const MAX_DECLARATION_NESTING: u32 = 256;

// =============================================================================
// Display Limits
// =============================================================================

/// Maximum number of characters of source text kept in error context excerpts.
pub const MAX_EXCERPT_LENGTH: usize = 120;
