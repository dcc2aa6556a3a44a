// SPDX-License-Identifier: MPL-2.0
//! Location acquisition state machine.
//!
//! [`State`] is pure: it consumes [`Message`]s and returns [`Effect`]s that the
//! runtime driver ([`LocationAcquisition`](super::LocationAcquisition)) executes
//! (timers, platform calls). This keeps every stage rule testable without a
//! runtime.
//!
//! One-shot path:
//!
//! ```text
//! Idle ─request─▶ Requesting ─dwell─▶ Detecting ─fix─▶ Processing ─dwell─▶ Success ─reset─▶ Idle
//! ```
//!
//! Watch path: `Idle ─start─▶ Detecting ─fix─▶ Success ─fix─▶ Success … ─stop─▶ Idle`.
//! Any failure goes straight to `Error`.

use std::time::Duration;

use crate::application::port::{PositionResult, WatchId};
use crate::domain::error::AcquisitionError;
use crate::domain::location::{AcquisitionSettings, Fix, Location, PositionOptions, Stage};

/// Source of capture timestamps, in Unix milliseconds.
pub type Clock = fn() -> i64;

fn wall_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// =============================================================================
// Public Snapshot
// =============================================================================

/// Observable state of a location acquisition, as rendered by UI callers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcquisitionState {
    /// Last accepted fix.
    pub location: Option<Location>,
    /// Message of the last failure. Present iff `stage` is [`Stage::Error`].
    pub error: Option<String>,
    /// An attempt (one-shot, or the first watch fix) is outstanding.
    pub loading: bool,
    /// Whether the platform has a location capability. Fixed at construction.
    pub is_supported: bool,
    /// A watch subscription is held.
    pub is_watching: bool,
    pub stage: Stage,
}

// =============================================================================
// Messages and Effects
// =============================================================================

/// Which cosmetic delay a timer implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// `Requesting → Detecting`.
    RequestingDwell,
    /// `Processing → Success`.
    ProcessingDwell,
    /// `Success → Idle` after a one-shot success.
    SuccessReset,
}

impl TimerKind {
    /// The stage this timer moves away from. A timer firing in any other
    /// stage is stale and ignored.
    #[must_use]
    pub fn leaves(self) -> Stage {
        match self {
            TimerKind::RequestingDwell => Stage::Requesting,
            TimerKind::ProcessingDwell => Stage::Processing,
            TimerKind::SuccessReset => Stage::Success,
        }
    }
}

/// A scheduled stage timer, tagged with the one-shot attempt it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub attempt: u64,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// User asked for a single fix.
    RequestOnce,
    /// User asked for continuous updates.
    StartWatching,
    /// User ended continuous updates.
    StopWatching,
    /// User dismissed the current error.
    ClearError,
    /// The owning component is going away.
    Dispose,
    /// A stage timer elapsed.
    TimerElapsed(Timer),
    /// The platform answered a one-shot request.
    PositionReported {
        attempt: u64,
        result: PositionResult,
    },
    /// The platform returned the identifier of a watch subscription.
    WatchOpened { session: u64, id: WatchId },
    /// The platform reported through a watch subscription.
    WatchReported {
        session: u64,
        result: PositionResult,
    },
}

/// Work the driver must perform after a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start a timer that later delivers [`Message::TimerElapsed`].
    ScheduleTimer { timer: Timer, delay: Duration },
    /// Abort every pending timer.
    CancelTimers,
    /// Issue a one-shot platform request for `attempt`.
    RequestPosition {
        attempt: u64,
        options: PositionOptions,
    },
    /// Open a platform subscription for `session`.
    OpenWatch {
        session: u64,
        options: PositionOptions,
    },
    /// Cancel a platform subscription.
    ClearWatch(WatchId),
}

/// Watch subscription bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum WatchSlot {
    #[default]
    Empty,
    /// `watch_position` was requested but its id is not known yet.
    Opening { session: u64 },
    Active { session: u64, id: WatchId },
}

impl WatchSlot {
    fn session(self) -> Option<u64> {
        match self {
            WatchSlot::Empty => None,
            WatchSlot::Opening { session } | WatchSlot::Active { session, .. } => Some(session),
        }
    }

    fn id(self) -> Option<WatchId> {
        match self {
            WatchSlot::Active { id, .. } => Some(id),
            _ => None,
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// Location acquisition state machine.
#[derive(Debug, Clone)]
pub struct State {
    snapshot: AcquisitionState,
    settings: AcquisitionSettings,
    clock: Clock,
    /// Current one-shot attempt. Timers and reports from older attempts are stale.
    attempt: u64,
    /// The current attempt still expects a platform answer.
    awaiting_report: bool,
    /// Fix held during the processing dwell.
    pending_fix: Option<Fix>,
    watch: WatchSlot,
    next_session: u64,
    last_error: Option<AcquisitionError>,
    disposed: bool,
}

impl State {
    /// Creates an idle state machine.
    #[must_use]
    pub fn new(is_supported: bool, settings: AcquisitionSettings) -> Self {
        Self {
            snapshot: AcquisitionState {
                is_supported,
                ..AcquisitionState::default()
            },
            settings,
            clock: wall_clock,
            attempt: 0,
            awaiting_report: false,
            pending_fix: None,
            watch: WatchSlot::Empty,
            next_session: 0,
            last_error: None,
            disposed: false,
        }
    }

    /// Replaces the capture timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the observable state.
    #[must_use]
    pub fn snapshot(&self) -> &AcquisitionState {
        &self.snapshot
    }

    /// Returns the current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.snapshot.stage
    }

    /// Returns the kind of the current error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<AcquisitionError> {
        self.last_error
    }

    /// Returns the id of the held subscription, if it is open.
    #[must_use]
    pub fn watch_id(&self) -> Option<WatchId> {
        self.watch.id()
    }

    /// Returns true once [`Message::Dispose`] has been handled.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Returns the dwell timings and request options in use.
    #[must_use]
    pub fn settings(&self) -> &AcquisitionSettings {
        &self.settings
    }

    /// Handles a message and returns the effects to execute.
    ///
    /// After [`Message::Dispose`] every message is ignored, except that a
    /// late [`Message::WatchOpened`] still yields [`Effect::ClearWatch`] so
    /// the platform subscription does not leak.
    pub fn handle(&mut self, message: Message) -> Vec<Effect> {
        if self.disposed {
            return match message {
                Message::WatchOpened { id, .. } => vec![Effect::ClearWatch(id)],
                _ => Vec::new(),
            };
        }

        match message {
            Message::RequestOnce => self.request_once(),
            Message::StartWatching => self.start_watching(),
            Message::StopWatching => self.stop_watching(),
            Message::ClearError => self.clear_error(),
            Message::Dispose => self.dispose(),
            Message::TimerElapsed(timer) => self.timer_elapsed(timer),
            Message::PositionReported { attempt, result } => {
                self.position_reported(attempt, result)
            }
            Message::WatchOpened { session, id } => self.watch_opened(session, id),
            Message::WatchReported { session, result } => self.watch_reported(session, result),
        }
    }

    /// The single place where `stage` changes.
    fn enter(&mut self, stage: Stage) {
        if self.snapshot.stage != stage {
            log::debug!("location stage {} -> {}", self.snapshot.stage, stage);
            self.snapshot.stage = stage;
        }
    }

    fn fail(&mut self, error: AcquisitionError) -> Vec<Effect> {
        log::warn!("location acquisition failed: {error}");
        self.last_error = Some(error);
        self.snapshot.error = Some(error.message().to_string());
        self.snapshot.loading = false;
        self.awaiting_report = false;
        self.pending_fix = None;
        self.enter(Stage::Error);

        // A failure ends any watch, whichever path reported it.
        let mut effects = Vec::new();
        if let Some(id) = self.watch.id() {
            effects.push(Effect::ClearWatch(id));
        }
        self.watch = WatchSlot::Empty;
        self.snapshot.is_watching = false;
        effects
    }

    fn clear_failure(&mut self) {
        self.last_error = None;
        self.snapshot.error = None;
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    fn schedule(&self, kind: TimerKind, delay: Duration) -> Effect {
        Effect::ScheduleTimer {
            timer: Timer {
                kind,
                attempt: self.attempt,
            },
            delay,
        }
    }

    fn request_once(&mut self) -> Vec<Effect> {
        if !self.snapshot.is_supported {
            return self.fail(AcquisitionError::Unsupported);
        }

        self.attempt += 1;
        self.awaiting_report = true;
        self.pending_fix = None;
        self.snapshot.loading = true;
        self.clear_failure();
        self.enter(Stage::Requesting);

        vec![
            self.schedule(
                TimerKind::RequestingDwell,
                self.settings.timings.requesting.as_duration(),
            ),
            Effect::RequestPosition {
                attempt: self.attempt,
                options: self.settings.options,
            },
        ]
    }

    fn start_watching(&mut self) -> Vec<Effect> {
        if self.watch != WatchSlot::Empty {
            return Vec::new();
        }
        if !self.snapshot.is_supported {
            return self.fail(AcquisitionError::Unsupported);
        }

        self.next_session += 1;
        let session = self.next_session;
        self.watch = WatchSlot::Opening { session };
        self.snapshot.loading = true;
        self.snapshot.is_watching = true;
        self.clear_failure();
        self.enter(Stage::Detecting);

        vec![Effect::OpenWatch {
            session,
            options: self.settings.options,
        }]
    }

    fn stop_watching(&mut self) -> Vec<Effect> {
        let effects = match self.watch {
            WatchSlot::Empty => return Vec::new(),
            // The id arrives later through `WatchOpened` and is cleared there.
            WatchSlot::Opening { .. } => Vec::new(),
            WatchSlot::Active { id, .. } => vec![Effect::ClearWatch(id)],
        };

        self.watch = WatchSlot::Empty;
        self.snapshot.is_watching = false;
        self.snapshot.loading = false;
        self.awaiting_report = false;
        self.pending_fix = None;
        self.enter(Stage::Idle);
        effects
    }

    fn clear_error(&mut self) -> Vec<Effect> {
        self.clear_failure();
        let abandoned = self.awaiting_report || self.pending_fix.is_some();
        self.awaiting_report = false;
        self.pending_fix = None;
        if !self.snapshot.is_watching {
            self.snapshot.loading = false;
        }
        self.enter(Stage::Idle);

        // Dwells of an abandoned one-shot would only be dropped as stale.
        if abandoned {
            vec![Effect::CancelTimers]
        } else {
            Vec::new()
        }
    }

    fn dispose(&mut self) -> Vec<Effect> {
        self.disposed = true;
        let mut effects = vec![Effect::CancelTimers];
        if let Some(id) = self.watch.id() {
            effects.push(Effect::ClearWatch(id));
        }
        self.watch = WatchSlot::Empty;
        effects
    }

    fn timer_elapsed(&mut self, timer: Timer) -> Vec<Effect> {
        if timer.attempt != self.attempt || self.snapshot.stage != timer.kind.leaves() {
            log::trace!(
                "dropping stale {:?} timer (attempt {}, stage {})",
                timer.kind,
                timer.attempt,
                self.snapshot.stage
            );
            return Vec::new();
        }

        match timer.kind {
            TimerKind::RequestingDwell => {
                self.enter(Stage::Detecting);
                Vec::new()
            }
            TimerKind::ProcessingDwell => {
                let Some(fix) = self.pending_fix.take() else {
                    return Vec::new();
                };
                self.snapshot.location = Some(Location::from_fix(fix, self.now()));
                self.snapshot.loading = false;
                self.enter(Stage::Success);
                vec![self.schedule(
                    TimerKind::SuccessReset,
                    self.settings.timings.success_reset.as_duration(),
                )]
            }
            TimerKind::SuccessReset => {
                if !self.snapshot.is_watching {
                    self.enter(Stage::Idle);
                }
                Vec::new()
            }
        }
    }

    fn position_reported(&mut self, attempt: u64, result: PositionResult) -> Vec<Effect> {
        if attempt != self.attempt || !self.awaiting_report {
            log::trace!("dropping stale position report for attempt {attempt}");
            return Vec::new();
        }
        self.awaiting_report = false;

        match result {
            Ok(fix) if matches!(self.snapshot.stage, Stage::Requesting | Stage::Detecting) => {
                // Forced even when the requesting dwell has not elapsed yet.
                self.pending_fix = Some(fix);
                self.enter(Stage::Processing);
                vec![self.schedule(
                    TimerKind::ProcessingDwell,
                    self.settings.timings.processing.as_duration(),
                )]
            }
            Ok(_) => {
                log::trace!(
                    "one-shot fix for attempt {attempt} superseded by watch in stage {}",
                    self.snapshot.stage
                );
                Vec::new()
            }
            Err(code) => self.fail(code.into()),
        }
    }

    fn watch_opened(&mut self, session: u64, id: WatchId) -> Vec<Effect> {
        match self.watch {
            WatchSlot::Opening { session: current } if current == session => {
                self.watch = WatchSlot::Active { session, id };
                Vec::new()
            }
            // Stopped or failed before the platform returned the id.
            _ => vec![Effect::ClearWatch(id)],
        }
    }

    fn watch_reported(&mut self, session: u64, result: PositionResult) -> Vec<Effect> {
        if self.watch.session() != Some(session) {
            log::trace!("dropping report from closed watch session {session}");
            return Vec::new();
        }

        match result {
            Ok(fix) => {
                self.snapshot.location = Some(Location::from_fix(fix, self.now()));
                self.snapshot.loading = false;
                // A one-shot fix held for the processing dwell is superseded.
                // Its platform request stays open so a failure still surfaces.
                self.pending_fix = None;
                self.clear_failure();
                self.enter(Stage::Success);
                Vec::new()
            }
            Err(code) => self.fail(code.into()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
