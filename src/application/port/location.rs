// SPDX-License-Identifier: MPL-2.0
//! Location platform port definition.
//!
//! This module defines the [`LocationPlatform`] trait: the device capability
//! the acquisition component consumes. Infrastructure adapters (browser bridge,
//! OS location service, simulators) implement it.
//!
//! # Design Notes
//!
//! - Completions are delivered through callbacks, mirroring how platform
//!   location services report results
//! - Callbacks may run on any thread, at any time, and may run synchronously
//!   inside the call that registered them
//! - Uses domain types only ([`Fix`], [`PositionErrorCode`], [`PositionOptions`])

use crate::domain::error::PositionErrorCode;
use crate::domain::location::{Fix, PositionOptions};
use std::sync::Arc;

/// Outcome of a single platform position report.
pub type PositionResult = Result<Fix, PositionErrorCode>;

/// Completion for a one-shot request. Called at most once.
pub type PositionCallback = Box<dyn FnOnce(PositionResult) + Send + 'static>;

/// Completion for a watch subscription. Called once per report until cleared.
pub type WatchCallback = Arc<dyn Fn(PositionResult) + Send + Sync + 'static>;

/// Identifier of an active watch subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

// =============================================================================
// LocationPlatform Trait
// =============================================================================

/// Port for the platform location capability.
///
/// # Lifecycle
///
/// 1. Check `is_supported()`
/// 2. Either call `get_current_position()` for a single fix, or
/// 3. `watch_position()` to receive fixes continuously, then
/// 4. `clear_watch()` to end the subscription
///
/// After `clear_watch()` returns, the platform must not invoke that
/// subscription's callback again.
pub trait LocationPlatform: Send + Sync {
    /// Whether location services exist on this platform.
    fn is_supported(&self) -> bool;

    /// Requests a single position report.
    fn get_current_position(&self, options: PositionOptions, on_result: PositionCallback);

    /// Opens a continuous subscription and returns its identifier.
    fn watch_position(&self, options: PositionOptions, on_result: WatchCallback) -> WatchId;

    /// Cancels a subscription. Unknown identifiers are ignored.
    fn clear_watch(&self, id: WatchId);
}

impl<P: LocationPlatform + ?Sized> LocationPlatform for Arc<P> {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn get_current_position(&self, options: PositionOptions, on_result: PositionCallback) {
        (**self).get_current_position(options, on_result);
    }

    fn watch_position(&self, options: PositionOptions, on_result: WatchCallback) -> WatchId {
        (**self).watch_position(options, on_result)
    }

    fn clear_watch(&self, id: WatchId) {
        (**self).clear_watch(id);
    }
}
