//! Concurrent type-relation lookups feeding the effectiveness calculator.
//!
//! One lookup is issued per target type, the lookups run concurrently, and
//! the calculator only runs once every lookup has settled. What happens to a
//! failed lookup depends on the [`FetchPolicy`].

use std::future::Future;

use futures_util::future::{join_all, try_join_all};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use dex_core::{EffectivenessResult, FetchPolicy, TargetTypeSet, TypeRef, compute_effectiveness, types::capitalize};

use crate::error::ApiError;
use crate::provider::{PokemonSource, TypeDataProvider};

/// Outcome of a defenses fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefenseReport {
    /// The classified matchups.
    pub effectiveness: EffectivenessResult,
    /// Target types whose relations could not be fetched.
    ///
    /// Always empty under [`FetchPolicy::AbortOnError`].
    pub missing: Vec<TypeRef>,
}

impl DefenseReport {
    /// Returns `true` when every target type contributed to the result.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// A Pokemon together with its defensive matchups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonDefenses {
    /// National dex id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Types in slot order.
    pub types: TargetTypeSet,
    /// The defenses themselves.
    #[serde(flatten)]
    pub report: DefenseReport,
}

/// Fetches the relations of every target type and computes its defenses.
///
/// An empty `targets` slice yields an empty report without any lookups.
///
/// # Errors
///
/// Returns [`ApiError::Cancelled`] if `cancel` fires before the lookups have
/// settled; partial results are discarded. Under
/// [`FetchPolicy::AbortOnError`] the first failed lookup is returned as the
/// error.
pub async fn fetch_type_defenses<P>(
    provider: &P,
    targets: &[TypeRef],
    policy: FetchPolicy,
    cancel: &CancellationToken,
) -> Result<DefenseReport, ApiError>
where
    P: TypeDataProvider + ?Sized,
{
    if targets.is_empty() {
        return Ok(DefenseReport::default());
    }

    debug!(targets = targets.len(), policy = policy.label(), "fetching type relations");
    let lookups = targets.iter().map(|target| provider.type_relations(target));

    match policy {
        FetchPolicy::AbortOnError => {
            let relations = cancellable(cancel, try_join_all(lookups)).await??;
            Ok(DefenseReport {
                effectiveness: compute_effectiveness(targets, &relations),
                missing: Vec::new(),
            })
        }
        FetchPolicy::BestEffort => {
            let outcomes = cancellable(cancel, join_all(lookups)).await?;

            let mut relations = Vec::with_capacity(outcomes.len());
            let mut missing = Vec::new();
            for (target, outcome) in targets.iter().zip(outcomes) {
                match outcome {
                    Ok(record) => relations.push(record),
                    Err(err) => {
                        warn!(type_name = %target.name, error = %err, "type lookup failed, leaving it out");
                        missing.push(target.clone());
                    }
                }
            }

            Ok(DefenseReport {
                effectiveness: compute_effectiveness(targets, &relations),
                missing,
            })
        }
    }
}

/// Fetches a Pokemon by id or name and computes its defenses.
///
/// # Errors
///
/// Fails if the Pokemon itself cannot be fetched, or as
/// [`fetch_type_defenses`] does.
pub async fn fetch_pokemon_defenses<S, P>(
    source: &S,
    provider: &P,
    key: &str,
    policy: FetchPolicy,
    cancel: &CancellationToken,
) -> Result<PokemonDefenses, ApiError>
where
    S: PokemonSource + ?Sized,
    P: TypeDataProvider + ?Sized,
{
    let pokemon = cancellable(cancel, source.pokemon(key)).await??;
    let types = pokemon.target_types();
    let report = fetch_type_defenses(provider, &types, policy, cancel).await?;

    Ok(PokemonDefenses {
        id: pokemon.id,
        name: capitalize(&pokemon.name),
        types,
        report,
    })
}

/// Runs `fut` unless `cancel` fires first.
pub(crate) async fn cancellable<F: Future>(cancel: &CancellationToken, fut: F) -> Result<F::Output, ApiError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ApiError::Cancelled),
        output = fut => Ok(output),
    }
}
