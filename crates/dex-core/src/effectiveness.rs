//! Type-effectiveness calculator.
//!
//! Given the damage-relation records of a defender's one or two types, this
//! module works out which attacking types hit it for 2x or more, which are
//! resisted, and which have no effect.
//!
//! # Algorithm
//!
//! 1. Collect candidate attacking types: every type named in any of the six
//!    relation lists of any record, plus the defender's own types.
//! 2. For each candidate, multiply together the factor each defending record
//!    applies (`double_damage_from` 2x, `half_damage_from` 0.5x,
//!    `no_damage_from` 0x, otherwise 1x).
//! 3. Bucket by the product: `>= 2` weak, `0` immune, `(0, 0.5]` resistant.
//!    Anything else is neutral and left out.
//!
//! Dual typing stacks naturally: an Ice attack on a Flying/Dragon defender is
//! 2x * 2x = 4x, and Grass on a type pair that is weak to it once and resists
//! it once cancels back to 1x.
//!
//! # Examples
//!
//! ```
//! use dex_core::{compute_effectiveness, DefenseCategory, TypeRef, TypeRelations};
//!
//! let electric = TypeRef::new(13, "electric");
//! let relations = TypeRelations::new(electric.clone())
//!     .with_double_damage_from([TypeRef::new(5, "ground")])
//!     .with_half_damage_from([TypeRef::new(3, "flying"), TypeRef::new(9, "steel")]);
//!
//! let result = compute_effectiveness(&[electric], &[relations]);
//! assert_eq!(result.category_of("ground"), Some(DefenseCategory::Weak));
//! assert_eq!(result.category_of("steel"), Some(DefenseCategory::Resistant));
//! assert!(result.immune_to.is_empty());
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::warn;

use crate::types::{DefenseCategory, EffectivenessResult, Matchup, TypeRef, TypeRelations};

/// Classifies every attacking type that appears in `relations` (or in
/// `targets`) by its combined multiplier against the defender.
///
/// `relations` should hold one record per entry of `targets`. The fold runs
/// over whatever records are supplied, so a caller that lost a lookup can
/// still pass the rest. Empty input yields an empty result.
///
/// Buckets are ordered by type name. The function is pure and never fails.
#[must_use]
pub fn compute_effectiveness(targets: &[TypeRef], relations: &[TypeRelations]) -> EffectivenessResult {
    let candidates = collect_candidates(targets, relations);

    let mut result = EffectivenessResult::default();
    for (name, id) in candidates {
        let multiplier = relations
            .iter()
            .fold(1.0, |product, defender| product * defender.factor_from(&name));

        if let Some(category) = DefenseCategory::classify(multiplier) {
            result.push(category, Matchup::new(TypeRef { id, name }, multiplier));
        }
    }
    result
}

/// Builds the ordered `name -> id` candidate map.
///
/// A known id is never replaced by a missing one. When two different ids are
/// reported for the same name, the later one wins and a warning is logged.
fn collect_candidates(targets: &[TypeRef], relations: &[TypeRelations]) -> BTreeMap<String, Option<u32>> {
    let mut candidates = BTreeMap::new();

    let mentioned = relations
        .iter()
        .flat_map(|r| std::iter::once(&r.type_ref).chain(r.referenced_types()));

    for type_ref in mentioned.chain(targets) {
        if type_ref.is_blank() {
            continue;
        }
        match candidates.entry(type_ref.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(type_ref.id);
            }
            Entry::Occupied(mut slot) => match (*slot.get(), type_ref.id) {
                (_, None) => {}
                (Some(previous), Some(id)) if previous != id => {
                    warn!(
                        name = %type_ref.name,
                        previous,
                        id,
                        "conflicting ids for type, keeping the later one"
                    );
                    slot.insert(Some(id));
                }
                (_, Some(id)) => {
                    slot.insert(Some(id));
                }
            },
        }
    }
    candidates
}
