//! Error types for the generation service client.
//!
//! Every failure is classified by the operation that produced it, which
//! decides whether it is a submission failure (no task exists) or a poll
//! failure (a task exists but its status could not be read).

use std::fmt;

use thiserror::Error;

use crate::model::RequestError;

/// Remote operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    FetchStatus,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Submit => f.write_str("submit generation"),
            Operation::FetchStatus => f.write_str("fetch status"),
        }
    }
}

/// Which stage of a task's life the failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The job could not be accepted; no task was created.
    Submission,
    /// A status check failed after the task was created.
    Poll,
}

/// Errors that can occur while talking to the generation service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request rejected locally before any network call.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// Configured base URL cannot be used to build endpoints.
    #[error("Invalid service URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection or I/O failure.
    #[error("Failed to {operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured total timeout.
    #[error("Request to {operation} timed out after {duration}s")]
    Timeout { operation: Operation, duration: u64 },

    /// Service answered with a non-success status.
    #[error("Service error during {operation}: {status} - {message}")]
    Status {
        operation: Operation,
        status: u16,
        message: String,
    },

    /// Response parsed but violated the result invariants.
    #[error("Malformed {operation} response: {reason}")]
    MalformedResponse { operation: Operation, reason: String },
}

impl ClientError {
    pub(crate) fn transport(operation: Operation, source: reqwest::Error, timeout_secs: u64) -> Self {
        if source.is_timeout() {
            ClientError::Timeout {
                operation,
                duration: timeout_secs,
            }
        } else {
            ClientError::Transport { operation, source }
        }
    }

    pub(crate) fn malformed(operation: Operation, reason: impl Into<String>) -> Self {
        ClientError::MalformedResponse {
            operation,
            reason: reason.into(),
        }
    }

    /// Operation that failed, if the error came from a remote call.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ClientError::InvalidRequest(_)
            | ClientError::InvalidBaseUrl { .. }
            | ClientError::ClientBuild(_) => None,
            ClientError::Transport { operation, .. }
            | ClientError::Timeout { operation, .. }
            | ClientError::Status { operation, .. }
            | ClientError::MalformedResponse { operation, .. } => Some(*operation),
        }
    }

    /// Classify the failure. Local errors count as submission failures since
    /// no task can exist yet.
    pub fn kind(&self) -> FailureKind {
        match self.operation() {
            Some(Operation::FetchStatus) => FailureKind::Poll,
            Some(Operation::Submit) | None => FailureKind::Submission,
        }
    }

    pub fn is_submission(&self) -> bool {
        self.kind() == FailureKind::Submission
    }

    pub fn is_poll(&self) -> bool {
        self.kind() == FailureKind::Poll
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ClientError::MalformedResponse { .. })
    }

    /// Short reason suitable for the failure panel.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            FailureKind::Submission => "Failed to start generation",
            FailureKind::Poll => "Failed to check status",
        }
    }

    /// Technical details for diagnostics.
    pub fn details(&self) -> String {
        self.to_string()
    }
}
