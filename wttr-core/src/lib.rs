//! Core library for the `wttr` CLI.
//!
//! This crate defines:
//! - Configuration with compiled-in defaults
//! - A client for the wttr.in weather service (JSON report + PNG card)
//! - Payload extraction and on-disk persistence
//!
//! It is used by `wttr-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod wttr;

pub use config::Config;
pub use error::{ErrorKind, FetchError};
pub use model::{WeatherReport, WeatherRequest};
pub use wttr::{WttrClient, extract_report};
