//! Error types for the dex-api crate.
//!
//! This module provides the [`ApiError`] type for everything that can go
//! wrong between issuing a request and holding a decoded record.
//!
//! # Error Recovery Strategy
//!
//! Nothing here is retried automatically. [`ApiError::is_retryable`] tells a
//! caller whether offering the user a "retry" is worthwhile.

use dex_core::ConfigError;

/// User-facing message shown when a detail page cannot be populated.
pub const DETAIL_FAILURE_MESSAGE: &str = "Failed to load Pokémon details, try again later.";

/// Errors that can occur while talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// The requested URL.
        url: String,
        /// The underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// The requested URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The surrounding fetch was cancelled before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Creates a new [`ApiError::Status`] error.
    #[inline]
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Returns `true` if trying the same request again could succeed.
    ///
    /// Network failures, rate limiting and server errors qualify; a missing
    /// resource or a malformed body does not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_timeout() || source.is_connect() || source.is_request(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::NotFound(_) | Self::Decode { .. } | Self::Cancelled | Self::Client(_) | Self::Config(_) => false,
        }
    }

    /// Returns the URL involved in this error, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => Some(url),
            Self::NotFound(url) => Some(url),
            Self::Cancelled | Self::Client(_) | Self::Config(_) => None,
        }
    }

    /// Message suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "That Pokémon could not be found.".to_owned(),
            Self::Cancelled => "Loading was cancelled.".to_owned(),
            Self::Config(err) => format!("Configuration problem: {err}"),
            _ => DETAIL_FAILURE_MESSAGE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> ApiError {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        ApiError::Decode {
            url: "https://pokeapi.co/api/v2/type/10/".to_owned(),
            source,
        }
    }

    #[test]
    fn test_status_retryable() {
        assert!(ApiError::status(503, "u").is_retryable());
        assert!(ApiError::status(429, "u").is_retryable());
        assert!(!ApiError::status(400, "u").is_retryable());
    }

    #[test]
    fn test_not_retryable() {
        assert!(!ApiError::NotFound("u".to_owned()).is_retryable());
        assert!(!ApiError::Cancelled.is_retryable());
        assert!(!decode_error().is_retryable());
    }

    #[test]
    fn test_url_accessor() {
        assert_eq!(ApiError::status(500, "https://x/").url(), Some("https://x/"));
        assert_eq!(
            decode_error().url(),
            Some("https://pokeapi.co/api/v2/type/10/")
        );
        assert_eq!(ApiError::Cancelled.url(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::status(502, "https://pokeapi.co/api/v2/pokemon/1/").to_string(),
            "https://pokeapi.co/api/v2/pokemon/1/ returned HTTP 502"
        );
        assert_eq!(ApiError::Cancelled.to_string(), "request cancelled");
    }

    #[test]
    fn test_user_message() {
        assert_eq!(ApiError::status(500, "u").user_message(), DETAIL_FAILURE_MESSAGE);
        assert!(ApiError::NotFound("u".to_owned())
            .user_message()
            .contains("could not be found"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = ApiError::from(ConfigError::invalid_option("api.timeout_secs", "must be greater than zero"));
        assert!(err.to_string().starts_with("invalid configuration option"));
    }
}
