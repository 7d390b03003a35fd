pub mod http;
mod mock_assistant_api;
mod reqwest_transport;
mod tokio_sleeper;

pub use mock_assistant_api::*;
pub use reqwest_transport::*;
pub use tokio_sleeper::*;
