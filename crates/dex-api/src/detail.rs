//! Building the enriched detail record for one Pokemon.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use dex_core::{FetchPolicy, GenderRatio, PokemonDetail, SpriteConfig, pokemon_sprite_url};

use crate::defenses::{cancellable, fetch_type_defenses};
use crate::error::ApiError;
use crate::provider::{PokemonSource, TypeDataProvider};

/// Fetches a Pokemon by id or name and fills in its detail record.
///
/// The Pokemon record is required. The species record is optional: when it
/// cannot be fetched the description, colour and gender stay empty. Type
/// defenses follow `policy`; under [`FetchPolicy::BestEffort`] the defenses
/// are left out entirely only when no type lookup succeeded.
///
/// The species and type lookups run concurrently.
///
/// # Errors
///
/// Fails if the Pokemon cannot be fetched, if `cancel` fires, or if a type
/// lookup fails under [`FetchPolicy::AbortOnError`]. Use
/// [`ApiError::user_message`] for the text to show.
pub async fn fetch_pokemon_detail<S, P>(
    source: &S,
    provider: &P,
    key: &str,
    sprites: &SpriteConfig,
    policy: FetchPolicy,
    cancel: &CancellationToken,
) -> Result<PokemonDetail, ApiError>
where
    S: PokemonSource + ?Sized,
    P: TypeDataProvider + ?Sized,
{
    let pokemon = cancellable(cancel, source.pokemon(key)).await??;
    debug!(id = pokemon.id, name = %pokemon.name, "pokemon loaded");

    let species_key = pokemon.id.to_string();
    let targets = pokemon.target_types();
    let (species, defenses) = tokio::join!(
        cancellable(cancel, source.species(&species_key)),
        fetch_type_defenses(provider, &targets, policy, cancel),
    );

    let mut detail = PokemonDetail::new(
        pokemon.id,
        &pokemon.name,
        pokemon_sprite_url(&sprites.artwork_base, pokemon.id),
        pokemon.height.unwrap_or_default(),
        pokemon.weight.unwrap_or_default(),
    );
    detail.abilities = pokemon.abilities();
    detail.stats = pokemon.stats();

    match species? {
        Ok(species) => {
            detail.description = species.english_description().unwrap_or_default();
            detail.gender = species.gender_rate.and_then(GenderRatio::from_rate);
            detail.color = species.color.map(|color| color.name);
        }
        Err(err) => {
            warn!(id = pokemon.id, error = %err, "species lookup failed, continuing without it");
        }
    }

    let report = defenses?;
    if report.missing.len() == targets.len() && !targets.is_empty() {
        warn!(id = pokemon.id, "no type relations available, omitting defenses");
    } else {
        if !report.is_complete() {
            warn!(id = pokemon.id, missing = report.missing.len(), "defenses computed from partial type data");
        }
        detail.type_defenses = Some(report.effectiveness);
    }
    detail.types = targets;

    Ok(detail)
}
