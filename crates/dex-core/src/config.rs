//! Configuration structures for the pokedex toolkit.
//!
//! This module provides configuration types for all components:
//!
//! - [`ApiConfig`] - PokeAPI endpoint, timeout, and page sizes
//! - [`DefenseConfig`] - Type-defense fetch policy and caching
//! - [`SpriteConfig`] - Base URLs for artwork and type badges
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] and deserialize with
//! `#[serde(default)]`, so a config file only needs the keys it overrides.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How type-relation lookup failures are handled while computing defenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    /// Any failed lookup aborts the whole defenses step.
    #[default]
    AbortOnError,
    /// Failed lookups are left out of the fold and reported as missing.
    BestEffort,
}

impl FetchPolicy {
    /// Returns a human-readable label for this policy.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AbortOnError => "abort on error",
            Self::BestEffort => "best effort",
        }
    }
}

/// Configuration for the PokeAPI client.
///
/// # Examples
///
/// ```
/// use dex_core::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
/// assert_eq!(config.timeout_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// `User-Agent` header sent with each request.
    pub user_agent: String,

    /// Page size used when listing every Pokemon.
    pub list_limit: u32,

    /// Page size used when listing damage types.
    pub type_list_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_owned(),
            timeout_secs: 30,
            user_agent: concat!("pokedex/", env!("CARGO_PKG_VERSION")).to_owned(),
            list_limit: 2000,
            type_list_limit: 100,
        }
    }
}

/// Configuration for the type-defenses step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseConfig {
    /// What to do when one of the type lookups fails.
    pub policy: FetchPolicy,

    /// Whether type-relation records are cached for the process lifetime.
    pub cache: bool,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            policy: FetchPolicy::AbortOnError,
            cache: true,
        }
    }
}

/// Base URLs for sprite images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    /// Directory holding official artwork, keyed by Pokemon id.
    pub artwork_base: String,

    /// Directory holding type badges, keyed by type id.
    pub type_badge_base: String,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            artwork_base: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork".to_owned(),
            type_badge_base: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/types/generation-ix/scarlet-violet".to_owned(),
        }
    }
}

/// Root configuration for the pokedex toolkit.
///
/// # Examples
///
/// ```
/// use dex_core::{Config, FetchPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.defenses.policy, FetchPolicy::AbortOnError);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API client configuration.
    pub api: ApiConfig,

    /// Type-defenses configuration.
    pub defenses: DefenseConfig,

    /// Sprite URL configuration.
    pub sprites: SpriteConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing keys fall back to their defaults. The loaded configuration is
    /// validated before it is returned.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url(&self.api.base_url)?;
        validate_http_url(&self.sprites.artwork_base)?;
        validate_http_url(&self.sprites.type_badge_base)?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::invalid_option(
                "api.timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.api.list_limit == 0 {
            return Err(ConfigError::invalid_option(
                "api.list_limit",
                "must be greater than zero",
            ));
        }
        if self.api.type_list_limit == 0 {
            return Err(ConfigError::invalid_option(
                "api.type_list_limit",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn validate_http_url(url: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        Some(_) => Err(ConfigError::InvalidUrl {
            url: url.to_owned(),
            reason: "missing host".to_owned(),
        }),
        None => Err(ConfigError::InvalidUrl {
            url: url.to_owned(),
            reason: "scheme must be http or https".to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.list_limit, 2000);
        assert_eq!(config.type_list_limit, 100);
        assert!(config.user_agent.starts_with("pokedex/"));
    }

    #[test]
    fn test_defense_config_defaults() {
        let config = DefenseConfig::default();
        assert_eq!(config.policy, FetchPolicy::AbortOnError);
        assert!(config.cache);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"defenses": {"policy": "best_effort"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.defenses.policy, FetchPolicy::BestEffort);
        assert!(config.defenses.cache);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_fetch_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&FetchPolicy::AbortOnError).unwrap(),
            r#""abort_on_error""#
        );
        assert_eq!(
            serde_json::to_string(&FetchPolicy::BestEffort).unwrap(),
            r#""best_effort""#
        );
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.api.base_url = "ftp://pokeapi.co".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { .. })
        ));

        config.api.base_url = "https://".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api": {{"base_url": "http://localhost:8080/api/v2"}}}}"#).unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();

        let config = Config::load(path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Utf8Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();
        assert!(matches!(Config::load(path), Err(ConfigError::Parse(_))));
    }
}
