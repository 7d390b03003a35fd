pub mod chat_controller;
pub mod validate_controller;

pub use chat_controller::ChatController;
pub use validate_controller::ValidateController;
