// SPDX-License-Identifier: MPL-2.0
//! Caller-driven location platform.
//!
//! [`ManualPlatform`] records every request and subscription and only reports
//! when told to. Completions are invoked with the internal lock released, so
//! a callback may re-enter the platform (for example to clear its watch).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::port::{
    LocationPlatform, PositionCallback, PositionResult, WatchCallback, WatchId,
};
use crate::domain::location::PositionOptions;

/// Platform whose completions are fired explicitly.
///
/// Share it through an `Arc` to keep a handle after giving it to a component.
///
/// ```
/// use std::sync::Arc;
/// use geofix::application::port::{LocationPlatform, PositionResult};
/// use geofix::domain::location::{Fix, PositionOptions};
/// use geofix::infrastructure::ManualPlatform;
///
/// let platform = Arc::new(ManualPlatform::new());
/// platform.get_current_position(PositionOptions::default(), Box::new(|result: PositionResult| {
///     assert!(result.is_ok());
/// }));
/// assert!(platform.resolve_next(Ok(Fix::new(1.0, 2.0, 3.0))));
/// ```
#[derive(Default)]
pub struct ManualPlatform {
    unsupported: AtomicBool,
    inner: Mutex<ManualInner>,
}

#[derive(Default)]
struct ManualInner {
    pending: Vec<PositionCallback>,
    watches: Vec<(WatchId, WatchCallback)>,
    next_watch: u64,
    requests: Vec<PositionOptions>,
    watch_calls: usize,
    cleared: Vec<WatchId>,
}

impl ManualPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A platform reporting no location capability.
    #[must_use]
    pub fn unsupported() -> Self {
        let platform = Self::default();
        platform.unsupported.store(true, Ordering::SeqCst);
        platform
    }

    fn lock(&self) -> MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answers the oldest outstanding one-shot request.
    ///
    /// Returns `false` when nothing was pending.
    pub fn resolve_next(&self, result: PositionResult) -> bool {
        let callback = {
            let mut inner = self.lock();
            if inner.pending.is_empty() {
                return false;
            }
            inner.pending.remove(0)
        };
        callback(result);
        true
    }

    /// Answers every outstanding one-shot request with the same result.
    pub fn resolve_all(&self, result: PositionResult) -> usize {
        let callbacks = std::mem::take(&mut self.lock().pending);
        let count = callbacks.len();
        for callback in callbacks {
            callback(result);
        }
        count
    }

    /// Reports through every active subscription. Returns how many were reached.
    pub fn emit(&self, result: PositionResult) -> usize {
        let callbacks: Vec<WatchCallback> = self
            .lock()
            .watches
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in &callbacks {
            callback(result);
        }
        callbacks.len()
    }

    /// Reports through one subscription, returning `false` if it is not active.
    pub fn emit_to(&self, id: WatchId, result: PositionResult) -> bool {
        let callback = self
            .lock()
            .watches
            .iter()
            .find(|(watch, _)| *watch == id)
            .map(|(_, callback)| Arc::clone(callback));
        match callback {
            Some(callback) => {
                callback(result);
                true
            }
            None => false,
        }
    }

    /// Number of one-shot requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Options of the most recent one-shot request.
    #[must_use]
    pub fn last_request(&self) -> Option<PositionOptions> {
        self.lock().requests.last().copied()
    }

    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of `watch_position` calls received so far.
    #[must_use]
    pub fn watch_calls(&self) -> usize {
        self.lock().watch_calls
    }

    #[must_use]
    pub fn active_watches(&self) -> Vec<WatchId> {
        self.lock().watches.iter().map(|(id, _)| *id).collect()
    }

    /// Subscriptions closed through `clear_watch`, in order.
    #[must_use]
    pub fn cleared_watches(&self) -> Vec<WatchId> {
        self.lock().cleared.clone()
    }
}

impl LocationPlatform for ManualPlatform {
    fn is_supported(&self) -> bool {
        !self.unsupported.load(Ordering::SeqCst)
    }

    fn get_current_position(&self, options: PositionOptions, on_result: PositionCallback) {
        let mut inner = self.lock();
        inner.requests.push(options);
        inner.pending.push(on_result);
    }

    fn watch_position(&self, _options: PositionOptions, on_result: WatchCallback) -> WatchId {
        let mut inner = self.lock();
        inner.watch_calls += 1;
        inner.next_watch += 1;
        let id = WatchId(inner.next_watch);
        inner.watches.push((id, on_result));
        id
    }

    fn clear_watch(&self, id: WatchId) {
        let mut inner = self.lock();
        let before = inner.watches.len();
        inner.watches.retain(|(watch, _)| *watch != id);
        if inner.watches.len() != before {
            inner.cleared.push(id);
        }
    }
}

impl std::fmt::Debug for ManualPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ManualPlatform")
            .field("supported", &self.is_supported())
            .field("pending", &inner.pending.len())
            .field("watches", &inner.watches.len())
            .finish()
    }
}
