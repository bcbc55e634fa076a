//! HTTP client for the PokeAPI v2 resources.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use dex_core::Config;

use crate::error::ApiError;
use crate::wire::{NamedPage, Pokemon, Species, TypeDetail};

/// Client for the PokeAPI.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Builds a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the configuration is invalid and
    /// [`ApiError::Client`] when the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL requests are issued against.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a single resource, e.g. `{base}/type/10/`.
    #[must_use]
    pub fn resource_url(&self, resource: &str, key: &str) -> String {
        format!("{}/{resource}/{}/", self.base_url, key.trim().to_lowercase())
    }

    /// URL of one page of a list endpoint.
    #[must_use]
    pub fn page_url(&self, resource: &str, limit: u32, offset: u32) -> String {
        format!("{}/{resource}?limit={limit}&offset={offset}", self.base_url)
    }

    /// `GET pokemon/{key}/`.
    pub async fn get_pokemon(&self, key: &str) -> Result<Pokemon, ApiError> {
        self.get_json(&self.resource_url("pokemon", key)).await
    }

    /// `GET pokemon-species/{key}/`.
    pub async fn get_species(&self, key: &str) -> Result<Species, ApiError> {
        self.get_json(&self.resource_url("pokemon-species", key)).await
    }

    /// `GET type/{key}/`.
    pub async fn get_type(&self, key: &str) -> Result<TypeDetail, ApiError> {
        self.get_json(&self.resource_url("type", key)).await
    }

    /// `GET pokemon?limit&offset`.
    pub async fn get_pokemon_page(&self, limit: u32, offset: u32) -> Result<NamedPage, ApiError> {
        self.get_json(&self.page_url("pokemon", limit, offset)).await
    }

    /// `GET type?limit&offset`.
    pub async fn get_type_page(&self, limit: u32, offset: u32) -> Result<NamedPage, ApiError> {
        self.get_json(&self.page_url("type", limit, offset)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_owned()));
        }
        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), url));
        }

        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_owned(),
            source,
        })?;
        debug!(url, bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_owned(),
            source,
        })
    }
}
