//! Pokemon list items and detail records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{EffectivenessResult, TargetTypeSet};
use crate::resource::extract_id;

/// A named link to a Pokemon resource, as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonSummary {
    /// API name, lowercase.
    pub name: String,
    /// Resource URL; the id is its last path segment.
    pub url: String,
}

impl PokemonSummary {
    /// Creates a summary.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The numeric id parsed from the URL, if any.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        extract_id(&self.url)
    }
}

/// A row in a Pokemon list.
///
/// # Examples
///
/// ```
/// use dex_core::{PokemonListItem, PokemonSummary};
///
/// let summary = PokemonSummary::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25/");
/// let item = PokemonListItem::from_summary(&summary, "https://sprites.example/artwork");
/// assert_eq!(item.id, 25);
/// assert_eq!(item.name, "Pikachu");
/// assert_eq!(item.sprite_url.as_deref(), Some("https://sprites.example/artwork/25.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonListItem {
    /// National dex id, `0` when the URL carried none.
    pub id: u32,
    /// Display name, capitalized.
    pub name: String,
    /// Official artwork URL, absent when the id is unknown.
    pub sprite_url: Option<String>,
}

impl PokemonListItem {
    /// Builds a list row from a summary.
    #[must_use]
    pub fn from_summary(summary: &PokemonSummary, artwork_base: &str) -> Self {
        let id = summary.id();
        Self {
            id: id.unwrap_or(0),
            name: capitalize(&summary.name),
            sprite_url: id.map(|id| crate::resource::pokemon_sprite_url(artwork_base, id)),
        }
    }
}

/// An ability a Pokemon can have.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonAbility {
    /// API name of the ability.
    pub name: String,
    /// Whether this is the hidden ability.
    pub is_hidden: bool,
}

/// A base stat entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonStat {
    /// API name of the stat (`"special-attack"`).
    pub name: String,
    /// Base value.
    pub base_stat: u32,
    /// Effort values yielded when defeated.
    pub effort: u32,
}

impl PokemonStat {
    /// Abbreviated stat name for compact display.
    ///
    /// # Examples
    ///
    /// ```
    /// use dex_core::PokemonStat;
    ///
    /// let stat = PokemonStat { name: "special-defense".to_owned(), base_stat: 65, effort: 0 };
    /// assert_eq!(stat.short_name(), "SpD");
    /// ```
    #[must_use]
    pub fn short_name(&self) -> String {
        match self.name.to_lowercase().as_str() {
            "hp" => "HP".to_owned(),
            "attack" => "ATK".to_owned(),
            "defense" => "DEF".to_owned(),
            "special-attack" => "SpA".to_owned(),
            "special-defense" => "SpD".to_owned(),
            "speed" => "SPD".to_owned(),
            other => other.chars().take(3).collect::<String>().to_uppercase(),
        }
    }
}

/// Gender distribution derived from the species `gender_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GenderRatio {
    /// The species has no gender.
    Genderless,
    /// Chance of being female, in eighths (0..=8).
    FemaleEighths {
        /// Number of eighths.
        eighths: u8,
    },
}

impl GenderRatio {
    /// Interprets a raw `gender_rate`; `-1` means genderless.
    ///
    /// Returns `None` for values outside `-1..=8`.
    #[must_use]
    pub fn from_rate(rate: i32) -> Option<Self> {
        match rate {
            -1 => Some(Self::Genderless),
            0..=8 => u8::try_from(rate)
                .ok()
                .map(|eighths| Self::FemaleEighths { eighths }),
            _ => None,
        }
    }

    /// Percentage of females, or `None` when genderless.
    #[must_use]
    pub fn female_percent(self) -> Option<f64> {
        match self {
            Self::Genderless => None,
            Self::FemaleEighths { eighths } => Some(f64::from(eighths) / 8.0 * 100.0),
        }
    }
}

/// Everything shown on a Pokemon's detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    /// National dex id.
    pub id: u32,
    /// Display name, capitalized.
    pub name: String,
    /// Official artwork URL.
    pub sprite_url: String,
    /// Height in metres.
    pub height_m: f64,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Types in slot order.
    pub types: TargetTypeSet,
    /// Abilities in slot order.
    pub abilities: SmallVec<[PokemonAbility; 3]>,
    /// Base stats.
    pub stats: Vec<PokemonStat>,
    /// English flavour text; empty when the species lookup failed.
    pub description: String,
    /// Gender distribution, when known.
    pub gender: Option<GenderRatio>,
    /// Species colour name (`"green"`), when known.
    pub color: Option<String>,
    /// Defensive matchups; `None` when they could not be computed.
    pub type_defenses: Option<EffectivenessResult>,
}

impl PokemonDetail {
    /// Creates a detail record from raw API units (decimetres, hectograms).
    #[must_use]
    pub fn new(id: u32, name: &str, sprite_url: String, height_dm: u32, weight_hg: u32) -> Self {
        Self {
            id,
            name: capitalize(name),
            sprite_url,
            height_m: f64::from(height_dm) / 10.0,
            weight_kg: f64::from(weight_hg) / 10.0,
            types: TargetTypeSet::new(),
            abilities: SmallVec::new(),
            stats: Vec::new(),
            description: String::new(),
            gender: None,
            color: None,
            type_defenses: None,
        }
    }
}

/// Upper-cases the first letter of each hyphen- or space-separated word.
///
/// # Examples
///
/// ```
/// use dex_core::types::capitalize;
///
/// assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
/// assert_eq!(capitalize("mr-mime"), "Mr-Mime");
/// ```
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch == '-' || ch.is_whitespace();
    }
    out
}
