// SPDX-License-Identifier: MPL-2.0
//! Location platform adapters.

mod manual;
mod simulated;
mod unsupported;

pub use manual::ManualPlatform;
pub use simulated::SimulatedPlatform;
pub use unsupported::UnsupportedPlatform;
