use serde::Serialize;
use thiserror::Error;

/// Failure of one relay operation.
///
/// The `Display` text is the user-visible message: it is safe to render in a
/// chat bubble. Raw response bodies and per-attempt detail only go to the log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    RemoteRejection { status: u16, message: String },

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Processing(String),

    #[error("{0}")]
    InvalidInput(String),
}

/// Serializable tag of a [`RelayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayErrorKind {
    Configuration,
    Transport,
    RemoteRejection,
    Timeout,
    Processing,
    InvalidInput,
}

impl RelayErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayErrorKind::Configuration => "configuration",
            RelayErrorKind::Transport => "transport",
            RelayErrorKind::RemoteRejection => "remote_rejection",
            RelayErrorKind::Timeout => "timeout",
            RelayErrorKind::Processing => "processing",
            RelayErrorKind::InvalidInput => "invalid_input",
        }
    }
}

impl std::fmt::Display for RelayErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RelayError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn remote_rejection(status: u16, msg: impl Into<String>) -> Self {
        Self::RemoteRejection {
            status,
            message: msg.into(),
        }
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> RelayErrorKind {
        match self {
            Self::Configuration(_) => RelayErrorKind::Configuration,
            Self::Transport(_) => RelayErrorKind::Transport,
            Self::RemoteRejection { .. } => RelayErrorKind::RemoteRejection,
            Self::Timeout(_) => RelayErrorKind::Timeout,
            Self::Processing(_) => RelayErrorKind::Processing,
            Self::InvalidInput(_) => RelayErrorKind::InvalidInput,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, Self::RemoteRejection { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = RelayError::remote_rejection(401, "Incorrect API key provided");
        assert_eq!(err.to_string(), "Incorrect API key provided");
        assert_eq!(err.kind(), RelayErrorKind::RemoteRejection);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&RelayErrorKind::RemoteRejection).unwrap();
        assert_eq!(json, "\"remote_rejection\"");
        assert_eq!(RelayErrorKind::Timeout.to_string(), "timeout");
    }
}
