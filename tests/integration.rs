// SPDX-License-Identifier: MPL-2.0
use std::sync::Arc;
use std::time::Duration;

use geofix::application::port::{LocationPlatform, WatchId};
use geofix::config::{self, Config};
use geofix::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
use geofix::domain::error::{AcquisitionError, PositionErrorCode};
use geofix::domain::location::{AcquisitionSettings, Coordinates, Fix, RadiusQuery, Stage};
use geofix::infrastructure::{ManualPlatform, SimulatedPlatform, UnsupportedPlatform};
use geofix::ui::location::{LocationAcquisition, State};
use tempfile::tempdir;

const CAPTURED_AT: i64 = 1_717_171_717_000;

fn fixed_clock() -> i64 {
    CAPTURED_AT
}

fn paris() -> Fix {
    Fix::new(48.8566, 2.3522, 12.0)
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn manual() -> (Arc<ManualPlatform>, LocationAcquisition) {
    let platform = Arc::new(ManualPlatform::new());
    let acquisition =
        LocationAcquisition::new(Arc::clone(&platform), AcquisitionSettings::default())
            .expect("inside a runtime");
    (platform, acquisition)
}

fn assert_error_iff_message(acquisition: &LocationAcquisition) {
    let state = acquisition.state();
    assert_eq!(state.stage == Stage::Error, state.error.is_some(), "{state:?}");
}

#[tokio::test(start_paused = true)]
async fn one_shot_walks_through_every_stage() {
    let (platform, acquisition) = manual();

    acquisition.request_once();
    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Requesting);
    assert!(state.loading);
    assert_eq!(platform.request_count(), 1);
    assert_eq!(platform.last_request(), Some(AcquisitionSettings::default().options));

    advance(999).await;
    assert_eq!(acquisition.state().stage, Stage::Requesting);
    advance(2).await;
    assert_eq!(acquisition.state().stage, Stage::Detecting);

    assert!(platform.resolve_next(Ok(paris())));
    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Processing);
    assert!(state.loading);
    assert!(state.location.is_none());

    advance(801).await;
    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Success);
    assert!(!state.loading);
    let location = state.location.expect("location after success");
    assert_eq!(location.latitude, 48.8566);
    assert_eq!(location.longitude, 2.3522);
    assert_eq!(location.accuracy, 12.0);

    advance(2001).await;
    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Idle);
    assert_eq!(state.location, Some(location));
    assert_eq!(acquisition.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn early_fix_skips_remaining_requesting_dwell() {
    let (platform, acquisition) = manual();

    acquisition.request_once();
    platform.resolve_next(Ok(paris()));
    assert_eq!(acquisition.state().stage, Stage::Processing);

    advance(801).await;
    assert_eq!(acquisition.state().stage, Stage::Success);

    // The requesting dwell elapses here and must not pull the stage back.
    advance(300).await;
    assert_eq!(acquisition.state().stage, Stage::Success);
}

#[tokio::test(start_paused = true)]
async fn unsupported_platform_fails_synchronously_without_timers() {
    let platform = Arc::new(ManualPlatform::unsupported());
    let acquisition =
        LocationAcquisition::new(Arc::clone(&platform), AcquisitionSettings::default())
            .expect("inside a runtime");
    assert!(!acquisition.state().is_supported);

    acquisition.request_once();
    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Error);
    assert!(!state.loading);
    assert_eq!(
        state.error.as_deref(),
        Some(AcquisitionError::Unsupported.message())
    );
    assert_eq!(acquisition.pending_timers(), 0);
    assert_eq!(platform.request_count(), 0);
}

#[tokio::test]
async fn unsupported_platform_refuses_to_watch() {
    let acquisition = LocationAcquisition::new(UnsupportedPlatform, AcquisitionSettings::default())
        .expect("inside a runtime");

    acquisition.start_watching();
    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Error);
    assert!(!state.is_watching);
    assert_eq!(
        state.error.as_deref(),
        Some("Geolocation is not supported by this platform")
    );
}

#[tokio::test(start_paused = true)]
async fn clear_error_returns_to_idle() {
    let (platform, acquisition) = manual();
    acquisition.request_once();
    platform.resolve_next(Err(PositionErrorCode::Timeout));
    assert_eq!(
        acquisition.state().error.as_deref(),
        Some("Location request timed out. Please try again or check your connection.")
    );

    acquisition.clear_error();
    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Idle);
    assert!(state.error.is_none());
    assert_error_iff_message(&acquisition);
}

#[tokio::test(start_paused = true)]
async fn starting_twice_opens_one_subscription() {
    let (platform, acquisition) = manual();

    acquisition.start_watching();
    acquisition.start_watching();

    assert_eq!(platform.watch_calls(), 1);
    assert_eq!(platform.active_watches().len(), 1);
    let state = acquisition.state();
    assert!(state.is_watching);
    assert!(state.loading);
    assert_eq!(state.stage, Stage::Detecting);
}

#[tokio::test(start_paused = true)]
async fn watch_reports_replace_location_until_stopped() {
    let (platform, acquisition) = manual();
    acquisition.start_watching();

    platform.emit(Ok(paris()));
    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Success);
    assert!(!state.loading);

    platform.emit(Ok(Fix::new(48.8606, 2.3376, 8.0)));
    let location = acquisition.state().location.expect("second fix");
    assert_eq!(location.latitude, 48.8606);

    // Watch successes stay in `Success`; no reset to idle.
    advance(5_000).await;
    assert_eq!(acquisition.state().stage, Stage::Success);

    acquisition.stop_watching();
    let stopped = acquisition.state();
    assert!(!stopped.is_watching);
    assert_eq!(stopped.stage, Stage::Idle);
    assert_eq!(platform.cleared_watches(), vec![WatchId(1)]);

    assert_eq!(platform.emit(Ok(paris())), 0);
    assert_eq!(acquisition.state(), stopped);
}

#[tokio::test(start_paused = true)]
async fn permission_denied_during_watch_ends_subscription() {
    let (platform, acquisition) = manual();
    acquisition.start_watching();

    platform.emit(Err(PositionErrorCode::PermissionDenied));

    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Error);
    assert_eq!(
        state.error.as_deref(),
        Some("Location permission denied. Please enable location access in your settings.")
    );
    assert!(!state.is_watching);
    assert!(!state.loading);
    assert!(platform.active_watches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn one_shot_failure_during_watch_is_reported() {
    let (platform, acquisition) = manual();
    acquisition.start_watching();
    platform.emit(Ok(paris()));

    acquisition.request_once();
    platform.emit(Ok(paris()));
    assert_eq!(acquisition.state().stage, Stage::Success);

    platform.resolve_next(Err(PositionErrorCode::PermissionDenied));

    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Error);
    assert_eq!(
        state.error.as_deref(),
        Some(AcquisitionError::PermissionDenied.message())
    );
    assert!(!state.is_watching);
    assert!(platform.active_watches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dispose_mid_acquisition_freezes_state() {
    let (platform, acquisition) = manual();
    acquisition.request_once();
    let frozen = acquisition.state();

    acquisition.dispose();
    assert!(acquisition.is_disposed());
    assert_eq!(acquisition.pending_timers(), 0);

    platform.resolve_next(Ok(paris()));
    advance(10_000).await;
    acquisition.request_once();
    acquisition.start_watching();

    assert_eq!(acquisition.state(), frozen);
    assert_eq!(platform.watch_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_component_clears_watch() {
    let (platform, acquisition) = manual();
    acquisition.start_watching();
    assert_eq!(platform.active_watches().len(), 1);

    drop(acquisition);

    assert!(platform.active_watches().is_empty());
    assert_eq!(platform.emit(Ok(paris())), 0);
}

#[tokio::test(start_paused = true)]
async fn subscribers_observe_stage_changes() {
    let (_platform, acquisition) = manual();
    let mut updates = acquisition.subscribe();

    acquisition.request_once();
    updates.changed().await.expect("sender alive");
    assert_eq!(updates.borrow_and_update().stage, Stage::Requesting);

    updates.changed().await.expect("sender alive");
    assert_eq!(updates.borrow_and_update().stage, Stage::Detecting);
}

#[tokio::test(start_paused = true)]
async fn diagnostics_record_failure_without_coordinates() {
    let (platform, acquisition) = manual();
    let mut collector = DiagnosticsCollector::default();
    acquisition.set_diagnostics(collector.handle());

    acquisition.request_once();
    platform.resolve_next(Err(PositionErrorCode::PositionUnavailable));
    acquisition.dispose();

    collector.process_pending();
    let kinds: Vec<_> = collector.iter().map(|event| event.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticEventKind::StageChanged {
                from: "idle".into(),
                to: "requesting".into()
            },
            DiagnosticEventKind::StageChanged {
                from: "requesting".into(),
                to: "error".into()
            },
            DiagnosticEventKind::AcquisitionFailed {
                error: "error-location-unavailable".into()
            },
            DiagnosticEventKind::Disposed,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn custom_clock_stamps_accepted_fix() {
    let platform = Arc::new(ManualPlatform::new());
    let shared: Arc<dyn LocationPlatform> = platform.clone();
    let state = State::new(true, AcquisitionSettings::default()).with_clock(fixed_clock);
    let acquisition = LocationAcquisition::with_state(shared, state).expect("inside a runtime");

    acquisition.start_watching();
    platform.emit(Ok(paris()));

    let location = acquisition.state().location.expect("fix");
    assert_eq!(location.observed_at_millis, CAPTURED_AT);

    let louvre = Coordinates::new(48.8606, 2.3376);
    assert!(RadiusQuery::new(location.coordinates(), 2.0).contains(louvre));
}

#[tokio::test(start_paused = true)]
async fn simulated_platform_drives_one_shot_to_success() {
    let platform = SimulatedPlatform::at(51.5074, -0.1278, 20.0)
        .with_latency(Duration::from_millis(1_500));
    let acquisition = LocationAcquisition::new(platform, AcquisitionSettings::default())
        .expect("inside a runtime");

    acquisition.request_once();
    advance(1_001).await;
    assert_eq!(acquisition.state().stage, Stage::Detecting);
    advance(500).await;
    assert_eq!(acquisition.state().stage, Stage::Processing);
    advance(800).await;

    let state = acquisition.state();
    assert_eq!(state.stage, Stage::Success);
    assert_eq!(state.location.map(|l| l.accuracy), Some(20.0));
}

#[test]
fn component_requires_runtime() {
    let result = LocationAcquisition::new(ManualPlatform::new(), AcquisitionSettings::default());
    assert!(matches!(result, Err(geofix::error::Error::Runtime(_))));
}

#[tokio::test(start_paused = true)]
async fn settings_loaded_from_config_file_shape_timing() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut saved = Config::default();
    saved.acquisition.requesting_dwell_ms = 100;
    saved.acquisition.high_accuracy = false;
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, saved);

    let platform = Arc::new(ManualPlatform::new());
    let acquisition = LocationAcquisition::new(Arc::clone(&platform), loaded.acquisition.settings())
        .expect("inside a runtime");
    acquisition.request_once();
    assert_eq!(platform.last_request().map(|o| o.high_accuracy), Some(false));

    advance(101).await;
    assert_eq!(acquisition.state().stage, Stage::Detecting);
}
