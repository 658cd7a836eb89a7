//! Result of one logical request, returned by value instead of raised.

use serde_json::Value;

/// Failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The endpoint was not reached or did not answer in time. Retry-eligible.
    Transient,
    /// The endpoint answered with a 4xx/5xx status. Never retried.
    HttpStatus(u16),
    /// Malformed request, invalid local input or a body that is not JSON.
    ClientError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Transient => write!(f, "transient network failure"),
            ErrorKind::HttpStatus(code) => write!(f, "HTTP {}", code),
            ErrorKind::ClientError => write!(f, "client error"),
        }
    }
}

/// Outcome of a request, together with the number of attempts it took.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success {
        payload: Value,
        attempts: usize,
    },
    Failure {
        kind: ErrorKind,
        message: String,
        attempts: usize,
    },
}

impl RequestOutcome {
    pub fn success(payload: Value, attempts: usize) -> Self {
        RequestOutcome::Success { payload, attempts }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>, attempts: usize) -> Self {
        RequestOutcome::Failure {
            kind,
            message: message.into(),
            attempts,
        }
    }

    pub fn attempts(&self) -> usize {
        match self {
            RequestOutcome::Success { attempts, .. } | RequestOutcome::Failure { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    /// Returns the failure kind, or `None` on success.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RequestOutcome::Success { .. } => None,
            RequestOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Converts into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<Value, RequestFailure> {
        match self {
            RequestOutcome::Success { payload, .. } => Ok(payload),
            RequestOutcome::Failure { kind, message, .. } => Err(RequestFailure { kind, message }),
        }
    }
}

/// A failed request as an error value.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RequestFailure {}
