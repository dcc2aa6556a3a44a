// SPDX-License-Identifier: MPL-2.0
//! Platform request options and stage dwell newtypes.

use std::time::Duration;

// =============================================================================
// PositionOptions
// =============================================================================

/// Options passed to the platform with every position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask the platform for its most precise source (GPS over network).
    pub high_accuracy: bool,
    /// Maximum time the platform may take before reporting a timeout.
    pub timeout: Duration,
    /// Maximum age of a cached fix the platform may return. Zero forces a fresh fix.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(10_000),
            maximum_age: Duration::ZERO,
        }
    }
}

// =============================================================================
// Dwell Bounds
// =============================================================================

/// Cosmetic stage delay bounds (0 to 10 seconds).
pub mod dwell_bounds {
    /// Minimum dwell in milliseconds.
    pub const MIN_MS: u64 = 0;
    /// Maximum dwell in milliseconds.
    pub const MAX_MS: u64 = 10_000;
    /// Default `Requesting → Detecting` dwell.
    pub const DEFAULT_REQUESTING_MS: u64 = 1000;
    /// Default `Processing → Success` dwell.
    pub const DEFAULT_PROCESSING_MS: u64 = 800;
    /// Default `Success → Idle` reset delay.
    pub const DEFAULT_SUCCESS_RESET_MS: u64 = 2000;
}

// =============================================================================
// Dwell
// =============================================================================

/// A cosmetic delay between two stages, clamped to 0–10 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dwell(u64);

impl Dwell {
    /// Creates a dwell, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(dwell_bounds::MIN_MS, dwell_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

/// The three cosmetic delays of the one-shot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimings {
    pub requesting: Dwell,
    pub processing: Dwell,
    pub success_reset: Dwell,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            requesting: Dwell::from_millis(dwell_bounds::DEFAULT_REQUESTING_MS),
            processing: Dwell::from_millis(dwell_bounds::DEFAULT_PROCESSING_MS),
            success_reset: Dwell::from_millis(dwell_bounds::DEFAULT_SUCCESS_RESET_MS),
        }
    }
}

// =============================================================================
// AcquisitionSettings
// =============================================================================

/// Everything the acquisition component needs besides the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcquisitionSettings {
    pub timings: StageTimings,
    pub options: PositionOptions,
}
