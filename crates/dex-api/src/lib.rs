//! PokeAPI client and fetch orchestration for the pokedex toolkit.
//!
//! This crate owns every network call the toolkit makes:
//!
//! - [`PokeApiClient`] - a thin `reqwest` client over the PokeAPI v2 resources
//! - [`TypeDataProvider`] / [`PokemonSource`] / [`PokemonCatalog`] - the seams
//!   the orchestration code talks to, so tests can substitute in-memory providers
//! - [`CachedProvider`] - a process-lifetime cache of type-relation records
//! - [`fetch_type_defenses`] - concurrent relation lookups feeding the
//!   calculator in `dex-core`
//! - [`fetch_pokemon_detail`] - the enriched detail record
//! - [`find_pokemon`] and the other listing helpers in [`listing`]
//!
//! # Example
//!
//! ```no_run
//! use dex_api::{PokeApiClient, fetch_pokemon_defenses};
//! use dex_core::{Config, FetchPolicy};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), dex_api::ApiError> {
//! let client = PokeApiClient::from_config(&Config::default())?;
//! let cancel = CancellationToken::new();
//! let defenses =
//!     fetch_pokemon_defenses(&client, &client, "charizard", FetchPolicy::AbortOnError, &cancel)
//!         .await?;
//! assert!(defenses.report.missing.is_empty());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod client;
pub mod defenses;
pub mod detail;
pub mod error;
pub mod listing;
pub mod provider;
pub mod wire;

pub use client::PokeApiClient;
pub use defenses::{DefenseReport, PokemonDefenses, fetch_pokemon_defenses, fetch_type_defenses};
pub use detail::fetch_pokemon_detail;
pub use error::{ApiError, DETAIL_FAILURE_MESSAGE};
pub use listing::{PokemonQuery, find_pokemon, list_pokemon, list_types, pokemon_of_type};
pub use provider::{CachedProvider, PokemonCatalog, PokemonSource, TypeDataProvider};
