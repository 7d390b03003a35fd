use async_trait::async_trait;
use tracing::{enabled, trace, Level};

use crate::application::{HttpMethod, HttpTransport, TransportFailure, TransportRequest, TransportResponse};
use crate::domain::DEFAULT_BASE_URL;

/// [`HttpTransport`] backed by `reqwest`.
///
/// Request paths are appended to the base URL (e.g. `https://api.openai.com/v1`).
/// The per-request timeout comes from the [`TransportRequest`]; exceeding it
/// surfaces as [`TransportFailure::Timeout`]. Non-2xx responses are returned,
/// not turned into errors.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client,
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_error(err: reqwest::Error) -> TransportFailure {
        if err.is_timeout() {
            TransportFailure::Timeout
        } else if err.is_builder() {
            TransportFailure::Build(err.to_string())
        } else {
            TransportFailure::Network(err.to_string())
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure> {
        let url = self.url(&request.path);

        if enabled!(Level::TRACE) {
            trace!(
                "{} to {}: {}",
                request.method,
                url,
                request.body.as_ref().map(|b| b.to_string()).unwrap_or_default()
            );
        }

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        builder = builder.timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| TransportFailure::Build(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(Self::map_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(Self::map_error)?;

        Ok(TransportResponse { status, body })
    }
}
