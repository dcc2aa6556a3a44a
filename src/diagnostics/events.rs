// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for acquisition tracking.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single diagnostic event with its capture time.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEvent {
    /// When the event occurred (wall clock).
    pub timestamp: DateTime<Utc>,
    /// The type and data of the event.
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// The acquisition stage changed.
    StageChanged { from: String, to: String },

    /// A fix was accepted. Coordinates are not recorded.
    FixObserved { accuracy: f64, watching: bool },

    /// An attempt failed; `error` is the i18n key of the failure.
    AcquisitionFailed { error: String },

    /// A watch subscription was requested.
    WatchStarted,

    /// A watch subscription ended (stopped or failed).
    WatchStopped,

    /// The component was torn down.
    Disposed,
}
