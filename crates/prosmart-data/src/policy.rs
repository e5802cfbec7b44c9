//! Timing policy for a load cycle.

use std::time::Duration;

/// Ceiling after which an outbound call is aborted.
pub const DEFAULT_CEILING: Duration = Duration::from_secs(20);

/// Minimum time the listing shows its loading state.
pub const LISTING_MIN_DISPLAY: Duration = Duration::from_millis(500);

/// Minimum time the detail view shows its loading state.
pub const DETAIL_MIN_DISPLAY: Duration = Duration::from_millis(2000);

/// Timeout ceiling plus minimum loading display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Abort the call after this long.
    pub ceiling: Duration,
    /// Keep the loading state at least this long after a success,
    /// measured from the start of the call.
    pub min_display: Duration,
}

impl LoadPolicy {
    /// Create a new policy.
    pub fn new(ceiling: Duration, min_display: Duration) -> Self {
        Self {
            ceiling,
            min_display,
        }
    }

    /// Policy of the listing view.
    pub fn listing() -> Self {
        Self::new(DEFAULT_CEILING, LISTING_MIN_DISPLAY)
    }

    /// Policy of the detail view.
    pub fn detail() -> Self {
        Self::new(DEFAULT_CEILING, DETAIL_MIN_DISPLAY)
    }

    /// Override the ceiling.
    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Override the minimum display time.
    pub fn with_min_display(mut self, min_display: Duration) -> Self {
        self.min_display = min_display;
        self
    }

    /// How much longer the loading state must stay up after `elapsed`.
    pub fn remaining_display(&self, elapsed: Duration) -> Duration {
        self.min_display.saturating_sub(elapsed)
    }
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self::listing()
    }
}
