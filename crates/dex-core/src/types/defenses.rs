//! Calculator output types.

use serde::{Deserialize, Serialize};

use super::TypeRef;

/// One of the three defensive buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseCategory {
    /// Combined multiplier of 2x or more.
    Weak,
    /// Combined multiplier above 0x and at most 0.5x.
    Resistant,
    /// Combined multiplier of exactly 0x.
    Immune,
}

impl DefenseCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Weak, Self::Resistant, Self::Immune];

    /// Classifies a combined multiplier, or returns `None` when the
    /// multiplier is not reported in any bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use dex_core::DefenseCategory;
    ///
    /// assert_eq!(DefenseCategory::classify(4.0), Some(DefenseCategory::Weak));
    /// assert_eq!(DefenseCategory::classify(0.25), Some(DefenseCategory::Resistant));
    /// assert_eq!(DefenseCategory::classify(0.0), Some(DefenseCategory::Immune));
    /// assert_eq!(DefenseCategory::classify(1.0), None);
    /// ```
    #[must_use]
    #[allow(clippy::float_cmp)] // products of 2, 0.5 and 0 are exact
    pub fn classify(multiplier: f64) -> Option<Self> {
        if multiplier >= 2.0 {
            Some(Self::Weak)
        } else if multiplier == 0.0 {
            Some(Self::Immune)
        } else if multiplier > 0.0 && multiplier <= 0.5 {
            Some(Self::Resistant)
        } else {
            None
        }
    }

    /// Short label for a badge group heading.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak Against",
            Self::Resistant => "Resistant To",
            Self::Immune => "Immune To",
        }
    }

    /// Longer description of what the bucket means.
    #[inline]
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Weak => "Takes 2x or more damage from",
            Self::Resistant => "Takes 0.5x or less damage from",
            Self::Immune => "Takes 0x damage from",
        }
    }
}

/// An attacking type together with its combined multiplier against the
/// defender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    /// The attacking type.
    pub type_ref: TypeRef,
    /// Product of the per-type factors.
    pub multiplier: f64,
}

impl Matchup {
    /// Creates a matchup entry.
    #[must_use]
    pub const fn new(type_ref: TypeRef, multiplier: f64) -> Self {
        Self {
            type_ref,
            multiplier,
        }
    }
}

/// The weak / resistant / immune partition of attacking types.
///
/// Types with a neutral multiplier appear in no bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessResult {
    /// Attacking types with a multiplier of 2x or more.
    pub weak_against: Vec<Matchup>,
    /// Attacking types with a multiplier in `(0, 0.5]`.
    pub resistant_to: Vec<Matchup>,
    /// Attacking types with a multiplier of 0x.
    pub immune_to: Vec<Matchup>,
}

impl EffectivenessResult {
    /// Returns `true` when all three buckets are empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weak_against.is_empty() && self.resistant_to.is_empty() && self.immune_to.is_empty()
    }

    /// Total number of classified attacking types.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.weak_against.len() + self.resistant_to.len() + self.immune_to.len()
    }

    /// Returns the bucket for `category`.
    #[must_use]
    pub fn bucket(&self, category: DefenseCategory) -> &[Matchup] {
        match category {
            DefenseCategory::Weak => &self.weak_against,
            DefenseCategory::Resistant => &self.resistant_to,
            DefenseCategory::Immune => &self.immune_to,
        }
    }

    pub(crate) fn push(&mut self, category: DefenseCategory, matchup: Matchup) {
        match category {
            DefenseCategory::Weak => self.weak_against.push(matchup),
            DefenseCategory::Resistant => self.resistant_to.push(matchup),
            DefenseCategory::Immune => self.immune_to.push(matchup),
        }
    }

    /// Finds the bucket entry for an attacking type name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<(DefenseCategory, &Matchup)> {
        DefenseCategory::ALL.into_iter().find_map(|category| {
            self.bucket(category)
                .iter()
                .find(|m| m.type_ref.name == name)
                .map(|m| (category, m))
        })
    }

    /// Returns the bucket an attacking type was placed in, if any.
    #[must_use]
    pub fn category_of(&self, name: &str) -> Option<DefenseCategory> {
        self.find(name).map(|(category, _)| category)
    }

    /// Returns the combined multiplier of a classified attacking type.
    ///
    /// Neutral types are not stored, so this returns `None` for them.
    #[must_use]
    pub fn multiplier_for(&self, name: &str) -> Option<f64> {
        self.find(name).map(|(_, m)| m.multiplier)
    }

    /// Iterates over the names in one bucket.
    pub fn names(&self, category: DefenseCategory) -> impl Iterator<Item = &str> {
        self.bucket(category).iter().map(|m| m.type_ref.name.as_str())
    }
}
