//! Cooperative cancellation.
//!
//! Long traversals poll a shared flag at a bounded interval and bail out with
//! [`Cancelled`]. Cancellation is a normal control outcome, not an error in the
//! analysed code: callers discard partial work and re-run from scratch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Marker returned when a request observed a cancellation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("analysis request was cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Shared cancellation flag. Cloning yields a handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of ongoing work.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Clear any pending cancellation request.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Return `Err(Cancelled)` if cancellation was requested.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Counts node visits and polls a token every `interval` visits.
///
/// A missing token never cancels.
#[derive(Debug)]
pub struct CancellationPoller<'a> {
    token: Option<&'a CancellationToken>,
    interval: u32,
    countdown: u32,
}

impl<'a> CancellationPoller<'a> {
    pub fn new(token: Option<&'a CancellationToken>, interval: u32) -> Self {
        let interval = interval.max(1);
        Self {
            token,
            interval,
            countdown: interval,
        }
    }

    /// Record one unit of work, polling the token when the interval elapses.
    #[inline]
    pub fn tick(&mut self) -> Result<(), Cancelled> {
        self.countdown -= 1;
        if self.countdown == 0 {
            self.countdown = self.interval;
            if let Some(token) = self.token {
                return token.check();
            }
        }
        Ok(())
    }

    /// Poll the token immediately, independent of the interval.
    pub fn check_now(&self) -> Result<(), Cancelled> {
        self.token.map_or(Ok(()), CancellationToken::check)
    }
}
