//! PokeAPI response shapes.
//!
//! Only the fields this crate reads are modelled; serde ignores the rest.
//! Lists that the API may omit default to empty.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use dex_core::{
    PokemonAbility, PokemonStat, PokemonSummary, TargetTypeSet, TypeRef, TypeRelations, extract_id,
};

/// A `{ name, url }` link to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// API name.
    pub name: String,
    /// Resource URL.
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Converts a type link into a [`TypeRef`], normalizing the name to
    /// lowercase and recovering the id from the URL when possible.
    #[must_use]
    pub fn to_type_ref(&self) -> TypeRef {
        TypeRef {
            id: extract_id(&self.url),
            name: self.name.to_lowercase(),
        }
    }

    /// Converts a Pokemon link into a [`PokemonSummary`].
    #[must_use]
    pub fn to_summary(&self) -> PokemonSummary {
        PokemonSummary::new(self.name.clone(), self.url.clone())
    }
}

/// A page of a list endpoint (`/pokemon`, `/type`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamedPage {
    /// Total number of resources available.
    #[serde(default)]
    pub count: u32,
    /// URL of the next page.
    pub next: Option<String>,
    /// URL of the previous page.
    pub previous: Option<String>,
    /// Links on this page.
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// The `damage_relations` object of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DamageRelations {
    /// Types this type deals no damage to.
    pub no_damage_to: Vec<NamedResource>,
    /// Types this type deals half damage to.
    pub half_damage_to: Vec<NamedResource>,
    /// Types this type deals double damage to.
    pub double_damage_to: Vec<NamedResource>,
    /// Types this type takes no damage from.
    pub no_damage_from: Vec<NamedResource>,
    /// Types this type takes half damage from.
    pub half_damage_from: Vec<NamedResource>,
    /// Types this type takes double damage from.
    pub double_damage_from: Vec<NamedResource>,
}

/// A Pokemon that has a given type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeMember {
    /// Which type slot this type occupies.
    pub slot: u8,
    /// The Pokemon.
    pub pokemon: NamedResource,
}

/// `GET /type/{id or name}/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeDetail {
    /// Type id.
    pub id: u32,
    /// Type name.
    pub name: String,
    /// Damage relations.
    #[serde(default)]
    pub damage_relations: DamageRelations,
    /// Pokemon with this type.
    #[serde(default)]
    pub pokemon: Vec<TypeMember>,
}

impl TypeDetail {
    /// Converts the damage relations into the calculator's input record.
    #[must_use]
    pub fn to_relations(&self) -> TypeRelations {
        let refs = |list: &[NamedResource]| list.iter().map(NamedResource::to_type_ref).collect::<Vec<_>>();
        let relations = &self.damage_relations;

        TypeRelations {
            type_ref: TypeRef::new(self.id, self.name.to_lowercase()),
            no_damage_to: refs(&relations.no_damage_to),
            half_damage_to: refs(&relations.half_damage_to),
            double_damage_to: refs(&relations.double_damage_to),
            no_damage_from: refs(&relations.no_damage_from),
            half_damage_from: refs(&relations.half_damage_from),
            double_damage_from: refs(&relations.double_damage_from),
        }
    }
}

/// One entry of a Pokemon's `types` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonTypeSlot {
    /// Slot number (1 or 2).
    pub slot: u8,
    /// The type.
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

/// One entry of a Pokemon's `abilities` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilitySlot {
    /// The ability.
    pub ability: NamedResource,
    /// Whether this is the hidden ability.
    #[serde(default)]
    pub is_hidden: bool,
    /// Slot number.
    pub slot: u8,
}

/// One entry of a Pokemon's `stats` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatEntry {
    /// Base value.
    pub base_stat: u32,
    /// Effort values yielded.
    #[serde(default)]
    pub effort: u32,
    /// The stat.
    pub stat: NamedResource,
}

/// `GET /pokemon/{id or name}/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pokemon {
    /// National dex id.
    pub id: u32,
    /// API name.
    pub name: String,
    /// Height in decimetres.
    pub height: Option<u32>,
    /// Weight in hectograms.
    pub weight: Option<u32>,
    /// Types.
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
    /// Abilities.
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    /// Base stats.
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

impl Pokemon {
    /// The Pokemon's types in slot order.
    #[must_use]
    pub fn target_types(&self) -> TargetTypeSet {
        let mut slots: SmallVec<[&PokemonTypeSlot; 2]> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.into_iter().map(|slot| slot.type_.to_type_ref()).collect()
    }

    /// The Pokemon's abilities in slot order.
    #[must_use]
    pub fn abilities(&self) -> SmallVec<[PokemonAbility; 3]> {
        let mut slots: SmallVec<[&AbilitySlot; 3]> = self.abilities.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots
            .into_iter()
            .map(|slot| PokemonAbility {
                name: slot.ability.name.clone(),
                is_hidden: slot.is_hidden,
            })
            .collect()
    }

    /// The Pokemon's base stats, in API order.
    #[must_use]
    pub fn stats(&self) -> Vec<PokemonStat> {
        self.stats
            .iter()
            .map(|entry| PokemonStat {
                name: entry.stat.name.clone(),
                base_stat: entry.base_stat,
                effort: entry.effort,
            })
            .collect()
    }
}

/// A localized flavour text entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlavorText {
    /// The text, which may contain form feeds and hard line breaks.
    pub flavor_text: String,
    /// Language of the text.
    pub language: NamedResource,
}

/// `GET /pokemon-species/{id or name}/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Species {
    /// Species id.
    pub id: u32,
    /// Species name.
    pub name: String,
    /// Chance of being female in eighths, `-1` for genderless.
    pub gender_rate: Option<i32>,
    /// Pokedex colour.
    pub color: Option<NamedResource>,
    /// Flavour text in every available language and game.
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
}

impl Species {
    /// The first English flavour text, with line breaks collapsed.
    #[must_use]
    pub fn english_description(&self) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| entry.flavor_text.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ELECTRIC_JSON: &str = r#"{
        "id": 13,
        "name": "electric",
        "damage_relations": {
            "no_damage_to": [{"name": "ground", "url": "https://pokeapi.co/api/v2/type/5/"}],
            "half_damage_to": [
                {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"},
                {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"},
                {"name": "dragon", "url": "https://pokeapi.co/api/v2/type/16/"}
            ],
            "double_damage_to": [
                {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"},
                {"name": "water", "url": "https://pokeapi.co/api/v2/type/11/"}
            ],
            "no_damage_from": [],
            "half_damage_from": [
                {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"},
                {"name": "steel", "url": "https://pokeapi.co/api/v2/type/9/"},
                {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}
            ],
            "double_damage_from": [{"name": "ground", "url": "https://pokeapi.co/api/v2/type/5/"}]
        },
        "past_damage_relations": [],
        "pokemon": [
            {"slot": 1, "pokemon": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon/25/"}}
        ]
    }"#;

    #[test]
    fn test_type_detail_to_relations() {
        let detail: TypeDetail = serde_json::from_str(ELECTRIC_JSON).unwrap();
        let relations = detail.to_relations();

        assert_eq!(relations.type_ref, TypeRef::new(13, "electric"));
        assert_eq!(relations.double_damage_from, [TypeRef::new(5, "ground")]);
        assert_eq!(relations.half_damage_from.len(), 3);
        assert!(relations.no_damage_from.is_empty());
        assert_eq!(relations.no_damage_to, [TypeRef::new(5, "ground")]);
        assert_eq!(detail.pokemon[0].pokemon.name, "pikachu");
    }

    #[test]
    fn test_type_detail_missing_lists_default_empty() {
        let detail: TypeDetail =
            serde_json::from_str(r#"{"id": 1, "name": "Normal", "damage_relations": {}}"#).unwrap();
        let relations = detail.to_relations();
        assert_eq!(relations.type_ref.name, "normal");
        assert_eq!(relations.referenced_types().count(), 0);
        assert!(detail.pokemon.is_empty());
    }

    #[test]
    fn test_empty_url_gives_unresolved_type() {
        let link = NamedResource {
            name: "Ground".to_owned(),
            url: String::new(),
        };
        assert_eq!(link.to_type_ref(), TypeRef::unresolved("ground"));
    }

    #[test]
    fn test_pokemon_types_sorted_by_slot() {
        let json = r#"{
            "id": 6,
            "name": "charizard",
            "height": 17,
            "weight": 905,
            "types": [
                {"slot": 2, "type": {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"}},
                {"slot": 1, "type": {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"}}
            ],
            "abilities": [
                {"ability": {"name": "solar-power", "url": ""}, "is_hidden": true, "slot": 3},
                {"ability": {"name": "blaze", "url": ""}, "is_hidden": false, "slot": 1}
            ],
            "stats": [
                {"base_stat": 78, "effort": 0, "stat": {"name": "hp", "url": ""}},
                {"base_stat": 109, "effort": 3, "stat": {"name": "special-attack", "url": ""}}
            ]
        }"#;
        let pokemon: Pokemon = serde_json::from_str(json).unwrap();

        let types = pokemon.target_types();
        assert_eq!(types.as_slice(), [TypeRef::new(10, "fire"), TypeRef::new(3, "flying")]);

        let abilities = pokemon.abilities();
        assert_eq!(abilities[0].name, "blaze");
        assert!(abilities[1].is_hidden);

        let stats = pokemon.stats();
        assert_eq!(stats[1].short_name(), "SpA");
        assert_eq!(stats[1].effort, 3);
    }

    #[test]
    fn test_species_english_description() {
        let json = r#"{
            "id": 1,
            "name": "bulbasaur",
            "gender_rate": 1,
            "color": {"name": "green", "url": ""},
            "flavor_text_entries": [
                {"flavor_text": "Une graine", "language": {"name": "fr", "url": ""}},
                {"flavor_text": "A strange seed was\nplanted on its\fback at birth.", "language": {"name": "en", "url": ""}}
            ]
        }"#;
        let species: Species = serde_json::from_str(json).unwrap();
        assert_eq!(
            species.english_description().as_deref(),
            Some("A strange seed was planted on its back at birth.")
        );
        assert_eq!(species.gender_rate, Some(1));
    }

    #[test]
    fn test_named_page() {
        let json = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=2&limit=2",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;
        let page: NamedPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1302);
        assert!(page.previous.is_none());
        assert_eq!(page.results[1].to_summary().id(), Some(2));
    }
}
