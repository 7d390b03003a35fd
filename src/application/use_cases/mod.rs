mod api_call;
mod conversation_relay;
mod validate_credentials;

pub use api_call::{path_segment, ApiStep, API_VERSION_HEADER};
pub use conversation_relay::*;
pub use validate_credentials::*;
