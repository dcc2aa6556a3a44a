// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern and are
//! independent of any particular widget toolkit: they expose observable state
//! and operations, a front-end renders the state.
//!
//! # Components
//!
//! - [`location`] - Staged location acquisition (one-shot and watch)

pub mod location;
