//! Invoice payload fetcher
//!
//! Retrieves one day's raw CSV payload over HTTP with basic authentication.
//! Transient failures (transport errors, timeouts, 5xx) are retried with a
//! linearly increasing delay; 4xx responses fail immediately.

use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::types::{InvsumError, Result};

/// Total attempts, including the first
const MAX_ATTEMPTS: u32 = 3;

/// Base retry delay; attempt n waits n times this before the next try
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// One failed attempt, classified for the retry loop.
#[derive(Debug)]
pub(crate) enum FetchFailure {
    /// Expected to self-resolve: transport error, timeout, 5xx
    Transient(String),
    /// Will not improve on retry: 4xx, including auth failures
    Fatal(String),
}

/// HTTP fetcher bound to one API configuration.
pub struct Fetcher<'a> {
    config: &'a Config,
    client: reqwest::blocking::Client,
}

impl<'a> Fetcher<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| InvsumError::Fetch(format!("HTTP client error: {e}")))?;
        Ok(Self { config, client })
    }

    /// Fetch the raw payload for `date` (pre-validated `YYYY-MM-DD`).
    pub fn fetch(&self, date: &str) -> Result<String> {
        retry_transient(MAX_ATTEMPTS, thread::sleep, |attempt| {
            info!(date, attempt, max_attempts = MAX_ATTEMPTS, "fetching invoice data");
            self.attempt(date)
        })
    }

    fn attempt(&self, date: &str) -> std::result::Result<String, FetchFailure> {
        let url = format!("{}{}", self.config.base_url, date);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    FetchFailure::Transient(format!("request timed out: {e}"))
                } else {
                    FetchFailure::Transient(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if status.is_client_error() {
            return Err(FetchFailure::Fatal(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(FetchFailure::Transient(format!("HTTP {status}")));
        }
        response
            .text()
            .map_err(|e| FetchFailure::Transient(format!("failed to read body: {e}")))
    }
}

/// Drive `attempt` until success, a fatal failure, or the attempt budget is
/// exhausted.
///
/// Delays between attempts go through the injected `delay` function, so
/// tests can record the schedule instead of sleeping for real.
pub(crate) fn retry_transient<T>(
    max_attempts: u32,
    mut delay: impl FnMut(Duration),
    mut attempt: impl FnMut(u32) -> std::result::Result<T, FetchFailure>,
) -> Result<T> {
    let mut last_error = String::from("no attempts made");
    for n in 1..=max_attempts {
        match attempt(n) {
            Ok(payload) => return Ok(payload),
            Err(FetchFailure::Fatal(cause)) => return Err(InvsumError::Fetch(cause)),
            Err(FetchFailure::Transient(cause)) => {
                warn!(attempt = n, max_attempts, %cause, "transient fetch failure");
                last_error = cause;
                if n < max_attempts {
                    delay(RETRY_DELAY * n);
                }
            }
        }
    }
    Err(InvsumError::Fetch(format!(
        "giving up after {max_attempts} attempts: {last_error}"
    )))
}
