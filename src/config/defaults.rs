// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Stage dwell**: cosmetic delays between acquisition stages
//! - **Platform request**: options sent with every position request
//! - **Diagnostics**: event buffer size

use crate::domain::diagnostics::capacity_bounds;
use crate::domain::location::dwell_bounds;

// ==========================================================================
// Stage Dwell Defaults
// ==========================================================================

/// Time spent in `requesting` before `detecting` (milliseconds).
pub const DEFAULT_REQUESTING_DWELL_MS: u64 = dwell_bounds::DEFAULT_REQUESTING_MS;

/// Time spent in `processing` before `success` (milliseconds).
pub const DEFAULT_PROCESSING_DWELL_MS: u64 = dwell_bounds::DEFAULT_PROCESSING_MS;

/// Time a one-shot `success` is shown before returning to `idle` (milliseconds).
pub const DEFAULT_SUCCESS_RESET_MS: u64 = dwell_bounds::DEFAULT_SUCCESS_RESET_MS;

/// Upper bound for any dwell (milliseconds).
pub const MAX_DWELL_MS: u64 = dwell_bounds::MAX_MS;

// ==========================================================================
// Platform Request Defaults
// ==========================================================================

/// Ask for the most precise position source.
pub const DEFAULT_HIGH_ACCURACY: bool = true;

/// Platform timeout for a single position report (milliseconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Maximum age of a cached platform fix (milliseconds). Zero forces a fresh fix.
pub const DEFAULT_MAXIMUM_AGE_MS: u64 = 0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default diagnostics buffer capacity (events).
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = capacity_bounds::DEFAULT;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = capacity_bounds::MIN;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = capacity_bounds::MAX;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_REQUESTING_DWELL_MS <= MAX_DWELL_MS);
    assert!(DEFAULT_PROCESSING_DWELL_MS <= MAX_DWELL_MS);
    assert!(DEFAULT_SUCCESS_RESET_MS <= MAX_DWELL_MS);

    assert!(DEFAULT_TIMEOUT_MS > 0);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY >= capacity_bounds::EVENTS_PER_ONE_SHOT);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_dwell_defaults_match_presentation_timing() {
        assert_eq!(DEFAULT_REQUESTING_DWELL_MS, 1000);
        assert_eq!(DEFAULT_PROCESSING_DWELL_MS, 800);
        assert_eq!(DEFAULT_SUCCESS_RESET_MS, 2000);
    }

    #[test]
    fn request_defaults_force_fresh_precise_fix() {
        assert!(DEFAULT_HIGH_ACCURACY);
        assert_eq!(DEFAULT_TIMEOUT_MS, 10_000);
        assert_eq!(DEFAULT_MAXIMUM_AGE_MS, 0);
    }
}
