//! Domain services: pure helpers with no I/O.

mod message_sanitizer;

pub use message_sanitizer::*;
