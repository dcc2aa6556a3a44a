// SPDX-License-Identifier: MPL-2.0
//! Scripted location platform backed by Tokio timers.
//!
//! Every report is produced by a spawned task after the configured latency.
//! Watches keep reporting at a fixed interval, moving the fix by a constant
//! step each time, until cleared or until the scripted failure is reported.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::application::port::{
    LocationPlatform, PositionCallback, PositionResult, WatchCallback, WatchId,
};
use crate::domain::error::PositionErrorCode;
use crate::domain::location::{Fix, PositionOptions};

const DEFAULT_LATENCY: Duration = Duration::from_millis(300);
const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// What each report contains.
#[derive(Debug, Clone, Copy)]
struct Script {
    origin: Fix,
    /// Degrees added to latitude and longitude per report.
    step: (f64, f64),
    failure: Option<PositionErrorCode>,
}

impl Script {
    fn report(&self, index: u64) -> PositionResult {
        if let Some(code) = self.failure {
            return Err(code);
        }
        let n = index as f64;
        Ok(Fix::new(
            self.origin.coordinates.latitude() + self.step.0 * n,
            self.origin.coordinates.longitude() + self.step.1 * n,
            self.origin.accuracy,
        ))
    }
}

/// Platform producing scripted fixes on the ambient Tokio runtime.
///
/// Calls made outside a runtime are answered immediately with
/// [`PositionErrorCode::PositionUnavailable`].
#[derive(Debug)]
pub struct SimulatedPlatform {
    script: Script,
    latency: Duration,
    interval: Duration,
    reports: Arc<AtomicU64>,
    next_watch: AtomicU64,
    watches: Mutex<HashMap<WatchId, AbortHandle>>,
}

impl SimulatedPlatform {
    /// A platform reporting a fixed position.
    #[must_use]
    pub fn at(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            script: Script {
                origin: Fix::new(latitude, longitude, accuracy),
                step: (0.0, 0.0),
                failure: None,
            },
            latency: DEFAULT_LATENCY,
            interval: DEFAULT_INTERVAL,
            reports: Arc::new(AtomicU64::new(0)),
            next_watch: AtomicU64::new(0),
            watches: Mutex::new(HashMap::new()),
        }
    }

    /// Delay before the first report of every request or watch.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delay between successive watch reports.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Moves the reported position by this many degrees per report.
    #[must_use]
    pub fn with_step(mut self, latitude: f64, longitude: f64) -> Self {
        self.script.step = (latitude, longitude);
        self
    }

    /// Answers every request with `code` instead of a fix.
    #[must_use]
    pub fn failing_with(mut self, code: PositionErrorCode) -> Self {
        self.script.failure = Some(code);
        self
    }

    /// Number of subscriptions not yet cleared.
    #[must_use]
    pub fn active_watches(&self) -> usize {
        self.watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn next_report(&self) -> PositionResult {
        self.script
            .report(self.reports.fetch_add(1, Ordering::SeqCst))
    }
}

impl LocationPlatform for SimulatedPlatform {
    fn is_supported(&self) -> bool {
        true
    }

    fn get_current_position(&self, _options: PositionOptions, on_result: PositionCallback) {
        let Ok(runtime) = Handle::try_current() else {
            log::warn!("simulated platform used outside a Tokio runtime");
            on_result(Err(PositionErrorCode::PositionUnavailable));
            return;
        };
        let result = self.next_report();
        let latency = self.latency;
        runtime.spawn(async move {
            tokio::time::sleep(latency).await;
            on_result(result);
        });
    }

    fn watch_position(&self, _options: PositionOptions, on_result: WatchCallback) -> WatchId {
        let id = WatchId(self.next_watch.fetch_add(1, Ordering::SeqCst) + 1);
        let Ok(runtime) = Handle::try_current() else {
            log::warn!("simulated platform used outside a Tokio runtime");
            on_result(Err(PositionErrorCode::PositionUnavailable));
            return id;
        };

        let script = self.script;
        let reports = Arc::clone(&self.reports);
        let (latency, interval) = (self.latency, self.interval);
        let task = runtime.spawn(async move {
            tokio::time::sleep(latency).await;
            loop {
                let result = script.report(reports.fetch_add(1, Ordering::SeqCst));
                on_result(result);
                if result.is_err() {
                    break;
                }
                tokio::time::sleep(interval).await;
            }
        });

        self.watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, task.abort_handle());
        log::debug!("simulated watch {} opened", id.0);
        id
    }

    fn clear_watch(&self, id: WatchId) {
        let removed = self
            .watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if let Some(task) = removed {
            task.abort();
            log::debug!("simulated watch {} cleared", id.0);
        }
    }
}

impl Drop for SimulatedPlatform {
    fn drop(&mut self) {
        let watches = self.watches.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, task) in watches.drain() {
            task.abort();
        }
    }
}
