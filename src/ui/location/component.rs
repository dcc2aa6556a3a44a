// SPDX-License-Identifier: MPL-2.0
//! Runtime driver for the location acquisition state machine.
//!
//! [`LocationAcquisition`] owns a [`State`] and executes its effects on the
//! ambient Tokio runtime: stage timers become sleeping tasks, platform calls
//! go through the [`LocationPlatform`] port, and every completion is fed back
//! as a [`Message`].
//!
//! Timer tasks and platform callbacks only hold a `Weak` reference to the
//! component. Once the component is disposed (explicitly or on drop), pending
//! timers are aborted and any late completion is discarded by the state
//! machine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::state::{AcquisitionState, Effect, Message, State, Timer};
use crate::application::port::{LocationPlatform, PositionCallback, WatchCallback};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::domain::location::AcquisitionSettings;
use crate::error::{Error, Result};

/// Location acquisition component.
///
/// All operations return immediately; progress is observed through
/// [`state`](Self::state) or a [`subscribe`](Self::subscribe) receiver.
///
/// # Example
///
/// ```no_run
/// use geofix::domain::location::{AcquisitionSettings, Stage};
/// use geofix::infrastructure::SimulatedPlatform;
/// use geofix::ui::location::LocationAcquisition;
///
/// # async fn run() -> geofix::error::Result<()> {
/// let platform = SimulatedPlatform::at(48.8566, 2.3522, 10.0);
/// let acquisition = LocationAcquisition::new(platform, AcquisitionSettings::default())?;
/// let mut updates = acquisition.subscribe();
///
/// acquisition.request_once();
/// while updates.changed().await.is_ok() {
///     let state = updates.borrow_and_update().clone();
///     if state.stage == Stage::Success {
///         println!("{:?}", state.location);
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct LocationAcquisition {
    shared: Arc<Shared>,
}

struct Shared {
    platform: Arc<dyn LocationPlatform>,
    runtime: Handle,
    inner: Mutex<Inner>,
    publisher: watch::Sender<AcquisitionState>,
}

struct Inner {
    state: State,
    timers: Vec<AbortHandle>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl LocationAcquisition {
    /// Creates an idle component bound to the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] when called outside a Tokio runtime.
    pub fn new<P>(platform: P, settings: AcquisitionSettings) -> Result<Self>
    where
        P: LocationPlatform + 'static,
    {
        let state = State::new(platform.is_supported(), settings);
        Self::with_state(Arc::new(platform), state)
    }

    /// Creates a component around a prepared state machine (custom clock).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] when called outside a Tokio runtime.
    pub fn with_state(platform: Arc<dyn LocationPlatform>, state: State) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| Error::Runtime(e.to_string()))?;
        let (publisher, _) = watch::channel(state.snapshot().clone());

        Ok(Self {
            shared: Arc::new(Shared {
                platform,
                runtime,
                inner: Mutex::new(Inner {
                    state,
                    timers: Vec::new(),
                    diagnostics: None,
                }),
                publisher,
            }),
        })
    }

    /// Sets the diagnostics handle for logging acquisition events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        self.shared.lock().diagnostics = Some(handle);
    }

    /// Requests a single fix.
    pub fn request_once(&self) {
        Shared::dispatch(&self.shared, Message::RequestOnce);
    }

    /// Starts continuous updates. No-op while a watch is already held.
    pub fn start_watching(&self) {
        Shared::dispatch(&self.shared, Message::StartWatching);
    }

    /// Ends continuous updates. No-op when no watch is held.
    pub fn stop_watching(&self) {
        Shared::dispatch(&self.shared, Message::StopWatching);
    }

    /// Dismisses the current error and returns to idle. A one-shot attempt
    /// still in flight is abandoned; a watch keeps running.
    pub fn clear_error(&self) {
        Shared::dispatch(&self.shared, Message::ClearError);
    }

    /// Cancels the watch and every pending timer. Further calls and late
    /// platform completions have no effect. Also performed on drop.
    pub fn dispose(&self) {
        Shared::dispatch(&self.shared, Message::Dispose);
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AcquisitionState {
        self.shared.lock().state.snapshot().clone()
    }

    /// Returns a receiver notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AcquisitionState> {
        self.shared.publisher.subscribe()
    }

    /// Number of stage timers that have not fired or been aborted yet.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        let mut inner = self.shared.lock();
        inner.timers.retain(|timer| !timer.is_finished());
        inner.timers.len()
    }

    /// Returns true after [`dispose`](Self::dispose); every operation is then a no-op.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.lock().state.is_disposed()
    }
}

impl Drop for LocationAcquisition {
    fn drop(&mut self) {
        Shared::dispatch(&self.shared, Message::Dispose);
    }
}

impl std::fmt::Debug for LocationAcquisition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationAcquisition")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feeds one message to the state machine, then runs the resulting
    /// platform effects with the lock released so platforms may call back
    /// synchronously.
    fn dispatch(this: &Arc<Self>, message: Message) {
        let platform_effects = {
            let mut inner = this.lock();
            let is_dispose = matches!(message, Message::Dispose) && !inner.state.is_disposed();
            let before = inner.state.snapshot().clone();

            let effects = inner.state.handle(message);
            inner.report(&before, is_dispose);

            let after = inner.state.snapshot();
            if *after != before {
                this.publisher.send_replace(after.clone());
            }

            let mut platform_effects = Vec::new();
            for effect in effects {
                match effect {
                    Effect::ScheduleTimer { timer, delay } => {
                        let handle = this.spawn_timer(timer, delay);
                        inner.timers.retain(|pending| !pending.is_finished());
                        inner.timers.push(handle);
                    }
                    Effect::CancelTimers => {
                        for timer in inner.timers.drain(..) {
                            timer.abort();
                        }
                    }
                    other => platform_effects.push(other),
                }
            }
            platform_effects
        };

        for effect in platform_effects {
            Self::run_platform_effect(this, effect);
        }
    }

    fn spawn_timer(self: &Arc<Self>, timer: Timer, delay: std::time::Duration) -> AbortHandle {
        let weak = Arc::downgrade(self);
        self.runtime
            .spawn(async move {
                tokio::time::sleep(delay).await;
                if let Some(shared) = weak.upgrade() {
                    Shared::dispatch(&shared, Message::TimerElapsed(timer));
                }
            })
            .abort_handle()
    }

    fn run_platform_effect(this: &Arc<Self>, effect: Effect) {
        match effect {
            Effect::RequestPosition { attempt, options } => {
                let weak = Arc::downgrade(this);
                let on_result: PositionCallback = Box::new(move |result| {
                    deliver(&weak, Message::PositionReported { attempt, result });
                });
                this.platform.get_current_position(options, on_result);
            }
            Effect::OpenWatch { session, options } => {
                let weak = Arc::downgrade(this);
                let on_result: WatchCallback = Arc::new(move |result| {
                    deliver(&weak, Message::WatchReported { session, result });
                });
                let id = this.platform.watch_position(options, on_result);
                Self::dispatch(this, Message::WatchOpened { session, id });
            }
            Effect::ClearWatch(id) => this.platform.clear_watch(id),
            Effect::ScheduleTimer { .. } | Effect::CancelTimers => {}
        }
    }
}

fn deliver(weak: &Weak<Shared>, message: Message) {
    if let Some(shared) = weak.upgrade() {
        Shared::dispatch(&shared, message);
    }
}

impl Inner {
    /// Logs what changed between `before` and the current snapshot.
    fn report(&self, before: &AcquisitionState, disposed_now: bool) {
        let Some(handle) = &self.diagnostics else {
            return;
        };
        let after = self.state.snapshot();

        if before.stage != after.stage {
            handle.log(DiagnosticEventKind::StageChanged {
                from: before.stage.as_str().to_string(),
                to: after.stage.as_str().to_string(),
            });
        }
        if after.error.is_some() && before.error != after.error {
            if let Some(error) = self.state.last_error() {
                handle.log(DiagnosticEventKind::AcquisitionFailed {
                    error: error.i18n_key().to_string(),
                });
            }
        }
        if let Some(location) = after.location {
            if before.location != Some(location) {
                handle.log(DiagnosticEventKind::FixObserved {
                    accuracy: location.accuracy,
                    watching: after.is_watching,
                });
            }
        }
        match (before.is_watching, after.is_watching) {
            (false, true) => handle.log(DiagnosticEventKind::WatchStarted),
            (true, false) => handle.log(DiagnosticEventKind::WatchStopped),
            _ => {}
        }
        if disposed_now {
            handle.log(DiagnosticEventKind::Disposed);
        }
    }
}
