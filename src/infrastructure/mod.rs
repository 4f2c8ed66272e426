//! Infrastructure layer providing external service integrations.
//!
//! This module contains the configuration file, log file setup and the
//! hand-off of finished applications to the system mail client.

pub mod config;
pub mod handoff;
pub mod logging;

pub use config::*;
pub use handoff::*;
pub use logging::*;
