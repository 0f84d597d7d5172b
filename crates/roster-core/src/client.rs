//! HTTP fetch client for the paginated users endpoint.
//!
//! One network round trip per page, fixed base URL and timeout, no automatic
//! retry. Retry policy belongs to the caller: a failed page leaves the loader
//! in a retriable state and the next trigger re-requests the same page.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use roster_types::UsersPage;
use serde_json::Value;

use crate::config::ClientConfig;

/// Categories of fetch errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Connection timeout or request timeout
    Timeout,
    /// Connection-level failure (refused, DNS, closed mid-body)
    Network,
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Failed to decode the response body
    Parse,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::Timeout => write!(f, "timeout"),
            FetchErrorKind::Network => write!(f, "network"),
            FetchErrorKind::HttpStatus => write!(f, "http_status"),
            FetchErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from a page fetch with kind and details.
#[derive(Debug, Clone)]
pub struct FetchError {
    /// Error category
    pub kind: FetchErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g. raw error body)
    pub details: Option<String>,
}

impl FetchError {
    /// Creates a new fetch error.
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error, extracting the server's `{"message"}`
    /// body when present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let mut message = format!("HTTP {status}");
        let details = if body.is_empty() {
            None
        } else {
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(msg) = json.get("message").and_then(|v| v.as_str())
            {
                message = format!("HTTP {status}: {msg}");
            }
            Some(body.to_string())
        };
        Self {
            kind: FetchErrorKind::HttpStatus,
            message,
            details,
        }
    }

    fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::new(FetchErrorKind::Timeout, "request timed out");
        }
        if err.is_decode() {
            return Self::new(FetchErrorKind::Parse, format!("invalid response: {err}"));
        }
        Self::new(FetchErrorKind::Network, format!("request failed: {err}"))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Client for the paginated users API.
///
/// Cheap to clone: the inner reqwest client is reference-counted, so one
/// instance can be shared with spawned fetch tasks.
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: String,
    http: reqwest::Client,
}

impl FetchClient {
    /// Creates a client from the settled startup configuration.
    ///
    /// The base URL is validated here so a typo fails at startup rather than
    /// on the first scroll.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)
            .with_context(|| format!("Invalid API base URL: {}", config.base_url))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Fetches one page of users.
    ///
    /// Returns the decoded page exactly as produced by the server; ordering
    /// within the page is preserved.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> FetchResult<UsersPage> {
        let url = format!("{}/fetchUsers", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::http_status(status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;
        serde_json::from_str(&body)
            .map_err(|e| FetchError::new(FetchErrorKind::Parse, format!("invalid page body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_message_body() {
        let err = FetchError::http_status(500, r#"{"message":"Failed to fetch users"}"#);
        assert_eq!(err.kind, FetchErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 500: Failed to fetch users");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_http_status_without_body() {
        let err = FetchError::http_status(502, "");
        assert_eq!(err.message, "HTTP 502");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_http_status_with_non_json_body() {
        let err = FetchError::http_status(500, "Internal Server Error");
        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.details.as_deref(), Some("Internal Server Error"));
    }

    #[test]
    fn test_new_client_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(FetchClient::new(&config).is_err());
    }

    #[test]
    fn test_new_client_strips_trailing_slash() {
        let config = ClientConfig {
            base_url: "http://localhost:5000/api/v1/".to_string(),
            ..ClientConfig::default()
        };
        let client = FetchClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:5000/api/v1");
    }
}
