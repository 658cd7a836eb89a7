//! HTTP layer: transport seam, retry policy and the request executor.

mod client;
mod outcome;
mod retry;
mod transport;

pub use client::{DEFAULT_TIMEOUT_SECS, RequestExecutor};
pub use outcome::{ErrorKind, RequestFailure, RequestOutcome};
pub use retry::{DEFAULT_BACKOFF_MS, DEFAULT_MAX_ATTEMPTS, InvalidRetryPolicy, RetryPolicy};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};

#[cfg(test)]
pub use transport::MockTransport;
