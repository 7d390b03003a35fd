mod http_transport;
mod sleeper;

pub use http_transport::*;
pub use sleeper::*;
