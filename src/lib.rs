// SPDX-License-Identifier: MPL-2.0
//! `geofix` acquires the device position for user-facing features.
//!
//! It wraps a platform location capability in a component that walks through
//! presentation stages (requesting, detecting, processing, success), supports
//! one-shot and continuous acquisition, and maps platform failures to
//! readable messages.

#![doc(html_root_url = "https://docs.rs/geofix/0.1.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
