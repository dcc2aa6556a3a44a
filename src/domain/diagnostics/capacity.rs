// SPDX-License-Identifier: MPL-2.0
//! Sizing of the diagnostics event buffer.
//!
//! Capacity is counted in acquisition events. A one-shot attempt that ends in
//! success logs six of them (five stage changes and the observed fix). A watch
//! session logs its start, its stop and the stage changes around them, then
//! one event per fix.

/// Event counts and capacity limits.
pub mod capacity_bounds {
    /// Smallest buffer: one complete one-shot attempt with room to spare.
    pub const MIN: usize = 10;
    /// Largest buffer.
    pub const MAX: usize = 10_000;
    /// Default buffer.
    pub const DEFAULT: usize = 500;

    /// Events logged by a successful one-shot attempt.
    pub const EVENTS_PER_ONE_SHOT: usize = 6;
    /// Events logged by a watch session regardless of how many fixes it sees.
    pub const EVENTS_PER_WATCH_SESSION: usize = 5;
    /// Events logged per watch fix.
    pub const EVENTS_PER_WATCH_FIX: usize = 1;
}

/// Number of acquisition events kept by the diagnostics buffer, always
/// within [`capacity_bounds::MIN`]..=[`capacity_bounds::MAX`].
///
/// ```
/// use geofix::domain::diagnostics::BufferCapacity;
///
/// // Room for a watch session of 120 fixes.
/// assert_eq!(BufferCapacity::for_watch_session(120).value(), 125);
/// assert_eq!(BufferCapacity::new(50_000).value(), 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Clamps `events` into the allowed range.
    #[must_use]
    pub fn new(events: usize) -> Self {
        Self(events.clamp(capacity_bounds::MIN, capacity_bounds::MAX))
    }

    /// Capacity that holds one whole watch session of `fixes` fixes.
    #[must_use]
    pub fn for_watch_session(fixes: usize) -> Self {
        Self::new(
            fixes
                .saturating_mul(capacity_bounds::EVENTS_PER_WATCH_FIX)
                .saturating_add(capacity_bounds::EVENTS_PER_WATCH_SESSION),
        )
    }

    /// Capacity that holds `attempts` successful one-shot attempts.
    #[must_use]
    pub fn for_one_shots(attempts: usize) -> Self {
        Self::new(attempts.saturating_mul(capacity_bounds::EVENTS_PER_ONE_SHOT))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(capacity_bounds::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(BufferCapacity::new(0).value(), capacity_bounds::MIN);
        assert_eq!(BufferCapacity::new(usize::MAX).value(), capacity_bounds::MAX);
    }

    #[test]
    fn short_watch_still_gets_minimum() {
        assert_eq!(BufferCapacity::for_watch_session(0).value(), capacity_bounds::MIN);
    }

    #[test]
    fn long_watch_saturates_at_maximum() {
        assert_eq!(
            BufferCapacity::for_watch_session(usize::MAX).value(),
            capacity_bounds::MAX
        );
    }

    #[test]
    fn one_shots_scale_by_attempt() {
        assert_eq!(BufferCapacity::for_one_shots(20).value(), 120);
    }
}
