//! # Domain Layer
//!
//! Conversation and run identifiers, wire shapes of the assistant thread API,
//! relay configuration and the error taxonomy.
//! This layer is independent of HTTP clients and runtimes.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
