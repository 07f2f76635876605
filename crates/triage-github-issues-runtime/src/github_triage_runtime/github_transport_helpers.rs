use std::time::Duration;

use serde::Deserialize;

const RETRY_DELAY_CAP_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Client-side retry budget for throttled or failing GitHub calls.
pub(super) struct RetryPolicy {
    pub(super) max_attempts: usize,
    pub(super) base_delay_ms: u64,
}

impl RetryPolicy {
    pub(super) fn new(max_attempts: usize, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms: base_delay_ms.max(1),
        }
    }

    #[cfg(test)]
    pub(super) fn single_attempt() -> Self {
        Self::new(1, 1)
    }

    pub(super) fn allows_retry_after(&self, attempt: usize) -> bool {
        attempt < self.max_attempts
    }

    /// Exponential backoff from `base_delay_ms`, floored by `retry-after` when
    /// GitHub sends one and capped at thirty seconds otherwise.
    pub(super) fn delay_for(&self, attempt: usize, retry_after: Option<Duration>) -> Duration {
        if let Some(delay) = retry_after {
            return delay.max(Duration::from_millis(self.base_delay_ms));
        }
        let exponent = attempt.saturating_sub(1).min(10) as u32;
        let scaled = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(exponent));
        Duration::from_millis(scaled.min(RETRY_DELAY_CAP_MS))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Failures after which a request may be sent again.
pub(super) enum RetryScope {
    /// Repeating the request has no further effect: retry throttling, server
    /// errors, and transient transport failures.
    Idempotent,
    /// The request may already have been applied: retry only an explicit 429.
    ThrottledOnly,
}

impl RetryScope {
    pub(super) fn retries_status(self, status: u16) -> bool {
        match self {
            Self::Idempotent => is_retryable_github_status(status),
            Self::ThrottledOnly => status == 429,
        }
    }

    pub(super) fn retries_transport_error(self, error: &reqwest::Error) -> bool {
        match self {
            Self::Idempotent => is_retryable_transport_error(error),
            Self::ThrottledOnly => false,
        }
    }
}

pub(super) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    let raw = headers.get(reqwest::header::RETRY_AFTER)?.to_str().ok()?;
    raw.trim().parse::<u64>().ok().map(Duration::from_secs)
}

pub(super) fn is_retryable_transport_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}

pub(super) fn is_retryable_github_status(status: u16) -> bool {
    status == 429 || status >= 500
}

pub(super) fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Prefer the `message` field of a GitHub error document over the raw body.
pub(super) fn github_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct GithubErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<GithubErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| truncate_for_error(body.trim(), 800))
}
