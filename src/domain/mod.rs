// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))
//! - [`error`]: Acquisition failures ([`AcquisitionError`](error::AcquisitionError),
//!   [`PositionErrorCode`](error::PositionErrorCode))
//! - [`location`]: Positions, stages, request options and radius search
//!   ([`Fix`](location::Fix), [`Location`](location::Location), [`Stage`](location::Stage),
//!   [`RadiusQuery`](location::RadiusQuery))

pub mod diagnostics;
pub mod error;
pub mod location;
