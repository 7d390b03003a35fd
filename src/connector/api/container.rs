use std::sync::Arc;

use tracing::debug;

use crate::application::{HttpTransport, Sleeper};
use crate::domain::RelayConfig;
use crate::{
    ConversationRelay, MockAssistantApi, NoopSleeper, ReqwestTransport, TokioSleeper,
    ValidateCredentialsUseCase,
};

pub struct ContainerConfig {
    pub relay: RelayConfig,
    /// Answer from the in-process mock assistant API instead of the network.
    pub mock_api: bool,
}

/// Wires the relay to its transport and timer once per process.
pub struct Container {
    transport: Arc<dyn HttpTransport>,
    relay: Arc<ConversationRelay>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let (transport, sleeper): (Arc<dyn HttpTransport>, Arc<dyn Sleeper>) = if config.mock_api {
            debug!("Using mock assistant API");
            (Arc::new(MockAssistantApi::new()), Arc::new(NoopSleeper))
        } else {
            debug!("Using assistant API at {}", config.relay.base_url());
            (
                Arc::new(ReqwestTransport::new(config.relay.base_url())),
                Arc::new(TokioSleeper::new()),
            )
        };

        Self::with_services(config, transport, sleeper)
    }

    /// Build around caller-supplied services, bypassing `mock_api`.
    pub fn with_services(
        config: ContainerConfig,
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        let relay = Arc::new(ConversationRelay::new(
            config.relay.clone(),
            Arc::clone(&transport),
            sleeper,
        ));

        Self {
            transport,
            relay,
            config,
        }
    }

    pub fn relay(&self) -> Arc<ConversationRelay> {
        Arc::clone(&self.relay)
    }

    pub fn validate_use_case(&self) -> ValidateCredentialsUseCase {
        ValidateCredentialsUseCase::new(self.config.relay.clone(), Arc::clone(&self.transport))
    }

    pub fn base_url(&self) -> &str {
        self.config.relay.base_url()
    }

    pub fn mock_api(&self) -> bool {
        self.config.mock_api
    }
}
