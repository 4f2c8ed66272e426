//! Application layer managing the wizard's state and workflow.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the form controller owns the record, the app state owns everything the
//! terminal view needs on top of it.

pub mod controller;
pub mod state;

pub use controller::*;
pub use state::*;
