// SPDX-License-Identifier: MPL-2.0
//! Location domain types.
//!
//! - [`Coordinates`], [`Fix`], [`Location`]: position values
//! - [`Stage`]: presentation phase of an acquisition
//! - [`PositionOptions`], [`Dwell`], [`StageTimings`], [`AcquisitionSettings`]: request and
//!   timing settings
//! - [`RadiusQuery`], [`haversine_km`]: nearby search

mod distance;
mod options;
mod stage;
mod types;

pub use distance::{haversine_km, RadiusQuery, EARTH_RADIUS_KM};
pub use options::{dwell_bounds, AcquisitionSettings, Dwell, PositionOptions, StageTimings};
pub use stage::Stage;
pub use types::{Coordinates, Fix, Location};
