use anyhow::{bail, Result};

use crate::connector::adapter::http::Envelope;
use crate::AssistantSummary;

use super::super::Container;

pub struct ValidateController<'a> {
    container: &'a Container,
}

impl<'a> ValidateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn validate(&self, json: bool) -> Result<String> {
        let result = self.container.validate_use_case().execute().await;

        if json {
            return Ok(serde_json::to_string_pretty(&Envelope::from_validation(result))?);
        }

        match result {
            Ok(summary) => Ok(self.format_summary(&summary)),
            Err(e) => bail!("{} error: {}", e.kind(), e),
        }
    }

    fn format_summary(&self, summary: &AssistantSummary) -> String {
        format!(
            "Credentials OK\n==============\nAssistant: {}\nName:      {}\nModel:     {}\nAPI:       {}",
            summary.id,
            summary.name.as_deref().unwrap_or("(unnamed)"),
            summary.model.as_deref().unwrap_or("(unknown)"),
            if self.container.mock_api() {
                "mock"
            } else {
                self.container.base_url()
            }
        )
    }
}
