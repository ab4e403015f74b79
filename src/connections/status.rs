use std::{fmt, str::FromStr};

use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Outcome of a legal status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    /// The request already had that terminal status.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Request is already {from}, cannot change it to {to}")]
pub struct IllegalTransition {
    pub from: ConnectionStatus,
    pub to: ConnectionStatus,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        use ConnectionStatus::*;
        match self {
            Pending => "pending",
            Accepted => "accepted",
            Rejected => "rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        self != ConnectionStatus::Pending
    }

    /// Pending may become accepted or rejected, once. Repeating the terminal
    /// status is allowed and changes nothing.
    pub fn transition(self, to: ConnectionStatus) -> Result<Transition, IllegalTransition> {
        use ConnectionStatus::*;
        match (self, to) {
            (Pending, Accepted | Rejected) => Ok(Transition::Changed),
            (from, to) if from == to && from.is_terminal() => Ok(Transition::Unchanged),
            (from, to) => Err(IllegalTransition { from, to }),
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ConnectionStatus::*;
        match s {
            "pending" => Ok(Pending),
            "accepted" => Ok(Accepted),
            "rejected" => Ok(Rejected),
            other => Err(AppError::Validation(format!(
                "Invalid status {other:?}, expected pending, accepted or rejected"
            ))),
        }
    }
}

impl From<IllegalTransition> for AppError {
    fn from(err: IllegalTransition) -> Self {
        AppError::Conflict(err.to_string())
    }
}
