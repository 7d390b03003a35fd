//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Transport (reqwest against the assistant API, in-process mock)
//! - Timers (tokio sleeper)
//! - Caller surfaces (CLI controllers, axum chat endpoint)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::{Container, ContainerConfig};
