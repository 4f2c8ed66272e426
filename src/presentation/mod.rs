//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the landing page and the five form steps with
//! ratatui and maps keyboard input onto application operations.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
