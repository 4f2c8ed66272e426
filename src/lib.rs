//! Church loan campaign intake form.
//!
//! A five-step terminal wizard that collects a church's application for
//! the branch loan campaign and hands the result to the system mail
//! client as a prepared `mailto:` message.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
