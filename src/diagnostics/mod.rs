// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting acquisition activity.
//!
//! Components send [`DiagnosticEvent`]s through a cloneable
//! [`DiagnosticsHandle`]; the [`DiagnosticsCollector`] drains them into a
//! memory-bounded [`CircularBuffer`] and can export them as JSON.
//!
//! # Privacy
//!
//! Events never carry coordinates, only accuracy and stage names.

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
