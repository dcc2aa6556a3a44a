// SPDX-License-Identifier: MPL-2.0
//! Location acquisition component.
//!
//! Follows the "state down, messages up" pattern: [`state`] is a pure
//! State/Message/Effect machine, [`component`] runs it on Tokio.
//!
//! ```text
//! LocationAcquisition (component.rs)
//!     ├── State          - stage rules, attempt/session bookkeeping
//!     ├── timer tasks    - requesting / processing / success-reset dwells
//!     └── LocationPlatform port - one-shot requests and watch subscriptions
//! ```

pub mod component;
pub mod state;

pub use component::LocationAcquisition;
pub use state::{AcquisitionState, Effect, Message, State, Timer, TimerKind};
