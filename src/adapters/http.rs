//! Shared HTTP plumbing for provider adapters
//!
//! Client construction with the configured timeout and a bounded retry loop.
//! Transport errors and 5xx back off linearly, 429 backs off exponentially.
//! `max_retries = 0` means exactly one attempt.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response};

use crate::ports::SourceError;

/// Longest response body kept in a status error
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Upper bound on a single backoff sleep
pub const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Retry settings for one adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first
    pub max_retries: u32,
    /// Base delay for backoff
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self, attempt: u32, err: &SourceError) -> Duration {
        let delay = match err {
            SourceError::Status { status: 429, .. } => self
                .base_delay
                .saturating_mul(2u32.saturating_pow(attempt.saturating_add(1))),
            _ => self.base_delay.saturating_mul(attempt.saturating_add(1)),
        };
        delay.min(MAX_BACKOFF)
    }
}

/// Timeout and retry settings shared by all adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl HttpSettings {
    pub fn build_client(&self) -> Result<Client, SourceError> {
        Ok(Client::builder().timeout(self.timeout).build()?)
    }
}

/// Send a request, retrying retryable failures per `policy`
///
/// Returns the first successful (2xx) response.
pub async fn send_with_retry<F, Fut>(
    policy: &RetryPolicy,
    source: &str,
    request_fn: F,
) -> Result<Response, SourceError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 0;

    loop {
        let err = match request_fn().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                SourceError::Status {
                    status,
                    body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                }
            }
            Err(e) => SourceError::from(e),
        };

        if !err.is_retryable() || attempt >= policy.max_retries {
            return Err(err);
        }

        let backoff = policy.backoff(attempt, &err);
        tracing::warn!(
            "{} request failed ({}), retrying in {:?} (attempt {}/{})",
            source,
            err,
            backoff,
            attempt + 1,
            policy.max_retries
        );
        tokio::time::sleep(backoff).await;
        attempt += 1;
    }
}

/// Join a base URL and a path without doubling slashes
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Return the key if set and non-blank, otherwise a `MissingCredential` error
pub fn require_key<'a>(key: Option<&'a str>, name: &str) -> Result<&'a str, SourceError> {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| SourceError::MissingCredential(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_single_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_backoff_shapes() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        };
        let rate_limited = SourceError::Status { status: 429, body: String::new() };

        assert_eq!(policy.backoff(0, &SourceError::Timeout), Duration::from_millis(100));
        assert_eq!(policy.backoff(2, &SourceError::Timeout), Duration::from_millis(300));
        assert_eq!(policy.backoff(0, &rate_limited), Duration::from_millis(200));
        assert_eq!(policy.backoff(2, &rate_limited), Duration::from_millis(800));
    }

    #[test]
    fn test_backoff_saturates_on_late_attempts() {
        let policy = RetryPolicy {
            max_retries: u32::MAX,
            base_delay: Duration::from_millis(500),
        };
        let rate_limited = SourceError::Status { status: 429, body: String::new() };

        assert_eq!(policy.backoff(31, &rate_limited), MAX_BACKOFF);
        assert_eq!(policy.backoff(u32::MAX, &rate_limited), MAX_BACKOFF);
        assert_eq!(policy.backoff(u32::MAX, &SourceError::Timeout), MAX_BACKOFF);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://api.example.com/", "/v1/icos"), "https://api.example.com/v1/icos");
        assert_eq!(join_url("https://api.example.com", "v1/icos"), "https://api.example.com/v1/icos");
    }

    #[test]
    fn test_require_key() {
        assert_eq!(require_key(Some("abc"), "KEY"), Ok("abc"));
        assert!(matches!(require_key(Some("  "), "KEY"), Err(SourceError::MissingCredential(_))));
        assert!(matches!(require_key(None, "KEY"), Err(SourceError::MissingCredential(_))));
    }

    #[test]
    fn test_build_client() {
        assert!(HttpSettings::default().build_client().is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = HttpSettings::default().build_client().unwrap();
        let result = send_with_retry(&RetryPolicy::default(), "test", || {
            client.get("http://127.0.0.1:1/unreachable").send()
        })
        .await;

        assert!(matches!(result, Err(SourceError::Http(_))));
    }
}
