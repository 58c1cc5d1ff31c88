//! HTTP retrieval with retry, backoff and mirror fallback
//!
//! The client is abstracted behind [`HttpClient`] so tests inject scripted
//! responses. Retry policy per host: up to [`MAX_RETRIES`] additional attempts
//! after the first, exponential backoff with jitter between attempts. Only
//! transient failures (transport errors, 5xx) are retried; 4xx responses are
//! surfaced immediately as a [`FetchOutcome::Denied`] so callers decide the
//! fallback policy instead of burning the retry budget.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{Result, SkillfetchError};

/// Per-attempt request timeout
pub const FETCH_TIMEOUT_SECS: u64 = 15;

/// Additional attempts after the first, per host
pub const MAX_RETRIES: u32 = 3;

/// Base backoff delay; attempt `n` waits `base * 2^n` (+ jitter)
pub const RETRY_BASE_DELAY_MS: u64 = 500;

/// Upper bound (exclusive) of the random jitter added to each backoff
pub const RETRY_JITTER_MS: u64 = 100;

/// Transport-level failure classification, the retry decision input
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection, DNS, timeout and similar transport failures
    Transport { reason: String },
    /// Non-2xx response status
    Status { status: u16 },
}

impl HttpError {
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::Transport { .. } => true,
            HttpError::Status { status } => *status >= 500,
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::Transport { reason } => write!(f, "{reason}"),
            HttpError::Status { status } => write!(f, "HTTP {status}"),
        }
    }
}

/// Minimal HTTP GET abstraction for dependency injection in tests
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, HttpError>;
}

/// Real HTTP client backed by reqwest's blocking API
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(concat!("skillfetch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkillfetchError::IoError {
                message: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, HttpError> {
        let response = self.client.get(url).send().map_err(|e| HttpError::Transport {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Transport {
                reason: format!("failed to read response body: {e}"),
            })
    }
}

/// Result of one host's retry phase. A tagged value instead of exception
/// unwinding, so phases compose sequentially over the host list.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(Vec<u8>),
    /// 4xx: the host answered, the resource is not there; retrying is futile
    Denied { status: u16 },
    /// Retry budget spent on transient failures
    Exhausted { error: SkillfetchError },
}

/// Pre-jitter backoff delay before retry `attempt + 1`
pub fn backoff_delay_ms(base_delay_ms: u64, attempt: u32) -> u64 {
    base_delay_ms * 2u64.pow(attempt)
}

/// Random jitter in `[0, RETRY_JITTER_MS)`, so concurrent downloads do not
/// retry in lockstep
fn jitter_ms() -> u64 {
    rand::rng().random_range(0..RETRY_JITTER_MS)
}

/// Fetcher combining an HTTP client with the retry/fallback policy
pub struct Fetcher {
    client: Arc<dyn HttpClient>,
    max_retries: u32,
    base_delay_ms: u64,
}

impl Fetcher {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_retry_policy(client, MAX_RETRIES, RETRY_BASE_DELAY_MS)
    }

    /// Customize the retry budget and backoff base (0 disables the sleeps)
    pub fn with_retry_policy(
        client: Arc<dyn HttpClient>,
        max_retries: u32,
        base_delay_ms: u64,
    ) -> Self {
        Self {
            client,
            max_retries,
            base_delay_ms,
        }
    }

    fn backoff_sleep(&self, attempt: u32) {
        let base = backoff_delay_ms(self.base_delay_ms, attempt);
        if base > 0 {
            std::thread::sleep(Duration::from_millis(base + jitter_ms()));
        }
    }

    /// Fetch one URL, retrying transient failures with exponential backoff
    pub fn fetch_with_retry(&self, url: &str) -> FetchOutcome {
        let mut last_error: Option<HttpError> = None;

        for attempt in 0..=self.max_retries {
            match self.client.get(url) {
                Ok(body) => {
                    debug!(url, attempt, bytes = body.len(), "fetch succeeded");
                    return FetchOutcome::Success(body);
                }
                Err(err) => {
                    if !err.is_retryable() {
                        if let HttpError::Status { status } = err {
                            debug!(url, status, "fetch denied, not retrying");
                            return FetchOutcome::Denied { status };
                        }
                    }
                    warn!(url, attempt, error = %err, "fetch attempt failed");
                    if attempt < self.max_retries {
                        self.backoff_sleep(attempt);
                    }
                    last_error = Some(err);
                }
            }
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "request failed".to_string());
        FetchOutcome::Exhausted {
            error: SkillfetchError::Network {
                url: url.to_string(),
                reason,
            },
        }
    }

    /// Fetch with mirror fallback: the fallback host gets its own full retry
    /// budget, and when both fail the primary host's error is surfaced.
    pub fn fetch_with_fallback(&self, primary: &str, fallback: &str) -> Result<Vec<u8>> {
        let primary_outcome = match self.fetch_with_retry(primary) {
            FetchOutcome::Success(body) => return Ok(body),
            other => other,
        };

        debug!(primary, fallback, "primary host failed, trying fallback");
        if let FetchOutcome::Success(body) = self.fetch_with_retry(fallback) {
            return Ok(body);
        }

        Err(match primary_outcome {
            FetchOutcome::Denied { status } => SkillfetchError::HttpStatus {
                status,
                url: primary.to_string(),
            },
            FetchOutcome::Exhausted { error } => error,
            FetchOutcome::Success(_) => unreachable!("success returns early"),
        })
    }
}
