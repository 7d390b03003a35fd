//! # Application Layer
//!
//! The conversation relay and credential check, orchestrating calls through
//! the transport and sleeper interfaces.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
