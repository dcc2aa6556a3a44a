// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`BufferCapacity`]: how many acquisition events the diagnostics buffer keeps

mod capacity;

pub use capacity::{capacity_bounds, BufferCapacity};
