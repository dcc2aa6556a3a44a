// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the [`LocationPlatform`]
//! port defined in `application::port`.
//!
//! # Available Adapters
//!
//! - [`ManualPlatform`]: completions fired by the caller, for tests and tools
//! - [`SimulatedPlatform`]: scripted fixes delivered after a latency
//! - [`UnsupportedPlatform`]: a device without location services
//!
//! [`LocationPlatform`]: crate::application::port::LocationPlatform

pub mod location;

pub use location::{ManualPlatform, SimulatedPlatform, UnsupportedPlatform};
