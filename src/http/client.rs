//! Request executor with bounded retries and failure classification.

use log::{debug, error, info, warn};
use serde_json::Value;
use std::time::Duration;

use super::outcome::{ErrorKind, RequestOutcome};
use super::retry::RetryPolicy;
use super::transport::{RawResponse, Transport, TransportError};

/// Default per-attempt timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runs requests through a [`Transport`], retrying only transient failures.
///
/// Every failure path produces a [`RequestOutcome::Failure`]; nothing is returned as `Err`.
#[derive(Clone)]
pub struct RequestExecutor<T: Transport> {
    transport: T,
    policy: RetryPolicy,
    timeout: Duration,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            transport,
            policy,
            timeout,
        }
    }

    /// GET with the executor's own timeout and retry policy.
    pub async fn get(&self, url: &str, query: &[(String, String)]) -> RequestOutcome {
        self.execute(url, query, self.timeout, &self.policy).await
    }

    /// GET `url` with `query`, making up to `policy.max_attempts()` attempts.
    ///
    /// Only transport-level failures are retried, after a fixed `policy.backoff()` delay.
    /// An error status or an unparseable body ends the call after that attempt.
    #[tracing::instrument(skip(self, query, policy))]
    pub async fn execute(
        &self,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
        policy: &RetryPolicy,
    ) -> RequestOutcome {
        if let Some(outcome) = reject_invalid(url, timeout) {
            return outcome;
        }

        let max_attempts = policy.max_attempts();
        info!("Request started: {}", url);

        for attempt in 1..=max_attempts {
            info!("Attempt {}/{} for {}", attempt, max_attempts, url);

            match self.transport.get(url, query, timeout).await {
                Ok(response) => return interpret(url, response, attempt),
                Err(TransportError::Request(msg)) => {
                    error!("Request exception for {}: {}", url, msg);
                    return RequestOutcome::failure(
                        ErrorKind::ClientError,
                        format!("Request failed: {}", msg),
                        attempt,
                    );
                }
                Err(TransportError::Transient(msg)) => {
                    warn!(
                        "Attempt {}/{} failed due to network issue: {}",
                        attempt, max_attempts, msg
                    );
                    if attempt < max_attempts {
                        debug!("Retrying {} in {:?}", url, policy.backoff());
                        tokio::time::sleep(policy.backoff()).await;
                    }
                }
            }
        }

        error!("Request failed after {} attempts: {}", max_attempts, url);
        RequestOutcome::failure(
            ErrorKind::Transient,
            format!("failed after {} attempts", max_attempts),
            max_attempts,
        )
    }

    /// POST a JSON body exactly once. Creates are not idempotent, so nothing is retried.
    #[tracing::instrument(skip(self, body))]
    pub async fn create(&self, url: &str, body: &Value) -> RequestOutcome {
        if let Some(outcome) = reject_invalid(url, self.timeout) {
            return outcome;
        }

        info!("Create request: {}", url);

        match self.transport.post_json(url, body, self.timeout).await {
            Ok(response) => interpret(url, response, 1),
            Err(TransportError::Request(msg)) => {
                error!("Request exception for {}: {}", url, msg);
                RequestOutcome::failure(ErrorKind::ClientError, format!("Request failed: {}", msg), 1)
            }
            Err(TransportError::Transient(msg)) => {
                error!("Create request to {} failed: {}", url, msg);
                RequestOutcome::failure(ErrorKind::Transient, format!("Request failed: {}", msg), 1)
            }
        }
    }
}

fn reject_invalid(url: &str, timeout: Duration) -> Option<RequestOutcome> {
    if url.trim().is_empty() {
        return Some(RequestOutcome::failure(
            ErrorKind::ClientError,
            "Request URL is empty",
            0,
        ));
    }
    if timeout.is_zero() {
        return Some(RequestOutcome::failure(
            ErrorKind::ClientError,
            "Request timeout must be greater than zero",
            0,
        ));
    }
    None
}

/// Classifies a received response.
fn interpret(url: &str, response: RawResponse, attempt: usize) -> RequestOutcome {
    if response.status >= 400 {
        error!("HTTP error {} for {}", response.status, url);
        return RequestOutcome::failure(
            ErrorKind::HttpStatus(response.status),
            format!("HTTP Error: {}", response.status),
            attempt,
        );
    }

    match serde_json::from_str::<Value>(&response.body) {
        Ok(payload) => {
            info!("Request successful ({}) for {}", response.status, url);
            RequestOutcome::success(payload, attempt)
        }
        Err(e) => {
            error!("Response from {} is not valid JSON: {}", url, e);
            RequestOutcome::failure(ErrorKind::ClientError, "invalid response body", attempt)
        }
    }
}
