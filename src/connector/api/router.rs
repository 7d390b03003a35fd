use anyhow::{bail, Result};

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, ValidateController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    validate_controller: ValidateController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            validate_controller: ValidateController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Chat {
                message,
                thread,
                json,
            } => self.chat_controller.chat(message, thread, json).await,
            Commands::Validate { json } => self.validate_controller.validate(json).await,
            Commands::Serve { .. } => bail!("serve is handled by main, not routed"),
        }
    }
}
