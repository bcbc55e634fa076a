//! Core types, errors, and utilities for the pokedex toolkit.
//!
//! This crate provides the foundational pieces used across the workspace:
//!
//! - The type-effectiveness calculator ([`compute_effectiveness`])
//! - Domain types (`TypeRef`, `TypeRelations`, `PokemonDetail`, ...)
//! - Configuration structures and the [`ConfigError`] type
//! - Resource URL helpers (`extract_id`, sprite URLs)
//! - List search filtering
//! - Type aliases for `FxHashMap`/`FxHashSet`
//!
//! Nothing in this crate performs I/O other than [`Config::load`].

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod effectiveness;
pub mod error;
pub mod hash;
pub mod resource;
pub mod search;
pub mod types;

pub use config::{ApiConfig, Config, DefenseConfig, FetchPolicy, SpriteConfig};
pub use effectiveness::compute_effectiveness;
pub use error::ConfigError;
pub use hash::{FxHashMap, FxHashSet, fx_hash_map};
pub use resource::{extract_id, pokemon_sprite_url, type_badge_url};
pub use search::filter_items;
pub use types::{
    DefenseCategory, EffectivenessResult, GenderRatio, Matchup, PokemonAbility, PokemonDetail,
    PokemonListItem, PokemonStat, PokemonSummary, TargetTypeSet, TypeRef, TypeRelations,
};
