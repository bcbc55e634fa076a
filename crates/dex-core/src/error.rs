//! Error types for the dex-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration-related
//! errors. The effectiveness calculator itself has no error type: it cannot
//! fail.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use dex_core::ConfigError;
///
/// let error = ConfigError::InvalidUrl {
///     url: "ftp://example.com".to_owned(),
///     reason: "scheme must be http or https".to_owned(),
/// };
/// assert!(error.to_string().contains("ftp://example.com"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured URL is unusable.
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Explanation of why the URL is invalid.
        reason: String,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// The file that was being read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}
