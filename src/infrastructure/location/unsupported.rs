// SPDX-License-Identifier: MPL-2.0
use crate::application::port::{LocationPlatform, PositionCallback, WatchCallback, WatchId};
use crate::domain::error::PositionErrorCode;
use crate::domain::location::PositionOptions;

/// Platform without location services.
///
/// Requests that reach it anyway are answered with
/// [`PositionErrorCode::PositionUnavailable`]; watches never report.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl LocationPlatform for UnsupportedPlatform {
    fn is_supported(&self) -> bool {
        false
    }

    fn get_current_position(&self, _options: PositionOptions, on_result: PositionCallback) {
        on_result(Err(PositionErrorCode::PositionUnavailable));
    }

    fn watch_position(&self, _options: PositionOptions, _on_result: WatchCallback) -> WatchId {
        WatchId(0)
    }

    fn clear_watch(&self, _id: WatchId) {}
}
