// SPDX-License-Identifier: MPL-2.0
//! Location domain types.
//!
//! Pure value types for positions reported by a platform location service.

// =============================================================================
// Coordinates
// =============================================================================

/// Geographic coordinates in decimal degrees (WGS84).
///
/// # Example
///
/// ```
/// use geofix::domain::location::Coordinates;
///
/// let paris = Coordinates::new(48.8566, 2.3522);
/// assert_eq!(paris.format(), "48.856600° N, 2.352200° E");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    /// Latitude in decimal degrees (-90.0 to 90.0)
    latitude: f64,
    /// Longitude in decimal degrees (-180.0 to 180.0)
    longitude: f64,
}

impl Coordinates {
    /// Creates new coordinates.
    ///
    /// Values outside valid ranges are clamped:
    /// - Latitude: -90.0 to 90.0
    /// - Longitude: -180.0 to 180.0
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }

    /// Returns the latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether both components are finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Returns whether this is (0, 0), which usually means the platform
    /// reported a placeholder rather than a real position.
    #[must_use]
    pub fn is_null_island(&self) -> bool {
        self.latitude.abs() < f64::EPSILON && self.longitude.abs() < f64::EPSILON
    }

    /// Formats the coordinates for display.
    ///
    /// Format: "48.856600° N, 2.352200° E"
    #[must_use]
    pub fn format(&self) -> String {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        format!(
            "{:.6}° {}, {:.6}° {}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }
}

// =============================================================================
// Fix
// =============================================================================

/// A single raw position sample delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    /// Reported position.
    pub coordinates: Coordinates,
    /// Accuracy radius in metres.
    pub accuracy: f64,
}

impl Fix {
    /// Creates a fix. Negative or non-finite accuracy is treated as 0.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        let accuracy = if accuracy.is_finite() {
            accuracy.max(0.0)
        } else {
            0.0
        };
        Self {
            coordinates: Coordinates::new(latitude, longitude),
            accuracy,
        }
    }
}

// =============================================================================
// Location
// =============================================================================

/// A fix that has been accepted by the acquisition component.
///
/// `observed_at_millis` is a Unix timestamp in milliseconds taken when the
/// component accepted the fix, not when the platform produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub observed_at_millis: i64,
}

impl Location {
    /// Builds a location from a fix and a capture timestamp.
    #[must_use]
    pub fn from_fix(fix: Fix, observed_at_millis: i64) -> Self {
        Self {
            latitude: fix.coordinates.latitude(),
            longitude: fix.coordinates.longitude(),
            accuracy: fix.accuracy,
            observed_at_millis,
        }
    }

    /// Returns the position as [`Coordinates`].
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

// =============================================================================
// Tests
// =============================================================================
