// SPDX-License-Identifier: MPL-2.0
//! Presentation stages of an acquisition attempt.

use std::fmt;

/// Presentation phase of a location acquisition.
///
/// Stages are for user feedback. `Requesting` and `Processing` last a fixed
/// dwell time regardless of how fast the platform actually answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Permission prompt dwell (one-shot only).
    Requesting,
    /// Waiting for the platform to report a fix.
    Detecting,
    /// A fix was received and is being finalized (one-shot only).
    Processing,
    /// A location is available.
    Success,
    /// The last attempt failed.
    Error,
}

impl Stage {
    /// Stable lowercase name, used in logs and diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Requesting => "requesting",
            Stage::Detecting => "detecting",
            Stage::Processing => "processing",
            Stage::Success => "success",
            Stage::Error => "error",
        }
    }

    /// Returns true while an attempt is between start and outcome.
    #[must_use]
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            Stage::Requesting | Stage::Detecting | Stage::Processing
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
