pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ConversationRelay, HttpMethod, HttpTransport, Sleeper, TransportFailure, TransportRequest,
    TransportResponse, ValidateCredentialsUseCase,
};

pub use cli::Commands;

pub use connector::{
    Container, ContainerConfig, MockAssistantApi, NoopSleeper, ReqwestTransport, TokioSleeper,
};

pub use domain::{
    sanitize_text_field, AssistantSummary, ConversationHandle, PollPolicy, RelayConfig,
    RelayError, RelayErrorKind, RelayResult, RunHandle, RunState,
};
