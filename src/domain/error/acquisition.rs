// SPDX-License-Identifier: MPL-2.0
//! Location acquisition errors.

use std::fmt;

/// Raw failure code reported by a platform location service.
///
/// Numeric codes follow the common platform convention:
/// `1` permission denied, `2` position unavailable, `3` timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    /// Any other code, kept for logging.
    Other(u16),
}

impl PositionErrorCode {
    /// Maps a numeric platform code.
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => PositionErrorCode::PermissionDenied,
            2 => PositionErrorCode::PositionUnavailable,
            3 => PositionErrorCode::Timeout,
            other => PositionErrorCode::Other(other),
        }
    }

    /// Returns the numeric platform code.
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            PositionErrorCode::PermissionDenied => 1,
            PositionErrorCode::PositionUnavailable => 2,
            PositionErrorCode::Timeout => 3,
            PositionErrorCode::Other(code) => code,
        }
    }
}

/// Terminal failure of one acquisition attempt.
///
/// Every variant is recoverable by the user starting a new attempt;
/// nothing is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcquisitionError {
    /// The platform has no location capability.
    Unsupported,
    /// The user or OS refused location access.
    PermissionDenied,
    /// The platform could not determine a position.
    PositionUnavailable,
    /// The platform did not answer within the configured timeout.
    Timeout,
    /// Any other platform failure.
    Unknown,
}

impl AcquisitionError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            AcquisitionError::Unsupported => "error-location-unsupported",
            AcquisitionError::PermissionDenied => "error-location-permission-denied",
            AcquisitionError::PositionUnavailable => "error-location-unavailable",
            AcquisitionError::Timeout => "error-location-timeout",
            AcquisitionError::Unknown => "error-location-unknown",
        }
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            AcquisitionError::Unsupported => "Geolocation is not supported by this platform",
            AcquisitionError::PermissionDenied => {
                "Location permission denied. Please enable location access in your settings."
            }
            AcquisitionError::PositionUnavailable => {
                "Location information is unavailable. Please try again."
            }
            AcquisitionError::Timeout => {
                "Location request timed out. Please try again or check your connection."
            }
            AcquisitionError::Unknown => "Failed to get location",
        }
    }
}

impl From<PositionErrorCode> for AcquisitionError {
    fn from(code: PositionErrorCode) -> Self {
        match code {
            PositionErrorCode::PermissionDenied => AcquisitionError::PermissionDenied,
            PositionErrorCode::PositionUnavailable => AcquisitionError::PositionUnavailable,
            PositionErrorCode::Timeout => AcquisitionError::Timeout,
            PositionErrorCode::Other(_) => AcquisitionError::Unknown,
        }
    }
}

impl fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AcquisitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes_map_to_known_variants() {
        assert_eq!(
            PositionErrorCode::from_code(1),
            PositionErrorCode::PermissionDenied
        );
        assert_eq!(
            PositionErrorCode::from_code(2),
            PositionErrorCode::PositionUnavailable
        );
        assert_eq!(PositionErrorCode::from_code(3), PositionErrorCode::Timeout);
        assert_eq!(PositionErrorCode::from_code(42), PositionErrorCode::Other(42));
        assert_eq!(PositionErrorCode::Other(42).code(), 42);
    }

    #[test]
    fn unknown_codes_become_generic_error() {
        let err = AcquisitionError::from(PositionErrorCode::Other(0));
        assert_eq!(err, AcquisitionError::Unknown);
        assert_eq!(err.to_string(), "Failed to get location");
    }

    #[test]
    fn permission_message_points_to_settings() {
        let err = AcquisitionError::from(PositionErrorCode::PermissionDenied);
        assert!(err.message().contains("permission denied"));
        assert!(err.message().contains("settings"));
    }

    #[test]
    fn timeout_and_unavailable_suggest_retry() {
        assert!(AcquisitionError::Timeout.message().contains("timed out"));
        assert!(AcquisitionError::PositionUnavailable
            .message()
            .contains("unavailable"));
    }

    #[test]
    fn unsupported_message_mentions_support() {
        assert!(AcquisitionError::Unsupported
            .message()
            .contains("not supported"));
    }

    #[test]
    fn i18n_keys_are_distinct() {
        let keys = [
            AcquisitionError::Unsupported.i18n_key(),
            AcquisitionError::PermissionDenied.i18n_key(),
            AcquisitionError::PositionUnavailable.i18n_key(),
            AcquisitionError::Timeout.i18n_key(),
            AcquisitionError::Unknown.i18n_key(),
        ];
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}
