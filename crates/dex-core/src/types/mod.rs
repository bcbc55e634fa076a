//! Domain types for the pokedex toolkit.
//!
//! # Module Organization
//!
//! - [`type_ref`] - Damage types and their relation records
//! - [`defenses`] - Calculator output: buckets and matchups
//! - [`pokemon`] - Pokemon list items and detail records
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use dex_core::{TypeRef, TypeRelations, EffectivenessResult};
//! ```

mod defenses;
mod pokemon;
mod type_ref;

pub use defenses::{DefenseCategory, EffectivenessResult, Matchup};
pub use pokemon::{
    GenderRatio, PokemonAbility, PokemonDetail, PokemonListItem, PokemonStat, PokemonSummary,
    capitalize,
};
pub use type_ref::{TargetTypeSet, TypeRef, TypeRelations};
