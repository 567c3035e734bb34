//! Cancellation of a running maneuver.
//!
//! Physical motion cannot be undone instantly, so a maneuver is only ever
//! stopped between legs. The token can be tripped from another thread (an
//! operator's stop button) or by an optional wall-clock budget.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// Cheaply cloneable stop flag shared between the sequencer and whoever may
/// want to abort it.
#[derive(Debug, Clone)]
pub struct CancelToken {
    /// Shared stop flag
    cancelled: Arc<AtomicBool>,
    /// When the maneuver started, set once by [`CancelToken::start`]
    started: Arc<OnceLock<Instant>>,
    /// Wall-clock budget for the whole maneuver (None = unlimited)
    budget: Option<Duration>,
}

impl CancelToken {
    /// A token that only stops when [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::with_budget(None)
    }

    /// A token that also stops once `budget` has elapsed since [`start`](Self::start).
    pub fn with_budget(budget: Option<Duration>) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            started: Arc::new(OnceLock::new()),
            budget,
        }
    }

    /// Start the budget clock. Later calls keep the first start time.
    pub fn start(&self) {
        self.started.get_or_init(Instant::now);
    }

    /// Request a stop at the next leg boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Check the flag and the budget; trips the flag if the budget ran out.
    pub fn check(&self) -> bool {
        if self.is_cancelled() {
            return true;
        }

        if let Some(limit) = self.budget
            && let Some(start) = self.started.get()
            && start.elapsed() >= limit
        {
            self.cancel();
            return true;
        }

        false
    }

    pub fn elapsed(&self) -> Duration {
        self.started
            .get()
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Remaining budget (None if unlimited).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.budget?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod cancel_tests;
