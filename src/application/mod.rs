// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports and orchestration contracts.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer (`ui`) drives ports through the acquisition component
//!
//! # Example
//!
//! ```ignore
//! use geofix::application::port::LocationPlatform;
//!
//! // Infrastructure implements the port trait
//! struct BrowserGeolocation { /* ... */ }
//! impl LocationPlatform for BrowserGeolocation { /* ... */ }
//! ```

pub mod port;
