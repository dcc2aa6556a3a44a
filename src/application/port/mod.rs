// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`location`]: Platform location capability (one-shot and watch)
//!
//! # Design Notes
//!
//! - All traits use domain types only (no runtime handles, no FFI types)
//! - Traits are `Send + Sync` so adapters can be shared with timer tasks
//! - No `async fn` - completions arrive through callbacks

pub mod location;

// Re-export main types for convenience
pub use location::{
    LocationPlatform, PositionCallback, PositionResult, WatchCallback, WatchId,
};
