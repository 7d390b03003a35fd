mod assistant_api;
mod conversation;
mod relay_config;
mod run_state;

pub use assistant_api::*;
pub use conversation::*;
pub use relay_config::*;
pub use run_state::*;
