use serde::{Deserialize, Serialize};

/// Lifecycle state of a run as reported by the remote service.
///
/// Only `Pending` is non-terminal. Every remote status that is not one of the
/// four terminal names (`queued`, `in_progress`, `requires_action`,
/// `cancelling`, or anything unrecognised) is folded into `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Pending,
    Completed,
    Failed,
    Cancelled,
    Expired,
}

impl RunState {
    pub fn from_status(status: &str) -> Self {
        match status {
            "completed" => RunState::Completed,
            "failed" => RunState::Failed,
            "cancelled" => RunState::Cancelled,
            "expired" => RunState::Expired,
            _ => RunState::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Pending => "pending",
            RunState::Completed => "completed",
            RunState::Failed => "failed",
            RunState::Cancelled => "cancelled",
            RunState::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunState::Pending)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
