//! Pokemon and type listings.
//!
//! The fetching functions go through [`PokemonCatalog`]; the page
//! conversions are plain functions so they can be tested without a server.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use dex_core::{Config, PokemonListItem, TypeRef, filter_items};

use crate::defenses::cancellable;
use crate::error::ApiError;
use crate::provider::PokemonCatalog;
use crate::wire::{NamedPage, NamedResource, TypeDetail};

/// Narrows a Pokemon listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PokemonQuery<'a> {
    /// Only list Pokemon that have this type.
    pub type_name: Option<&'a str>,
    /// Name or id fragment; empty matches everything.
    pub search: &'a str,
    /// Keep at most this many rows.
    pub limit: Option<usize>,
}

/// Lists Pokemon in dex order.
pub async fn list_pokemon<C: PokemonCatalog + ?Sized>(
    catalog: &C,
    limit: u32,
    offset: u32,
    artwork_base: &str,
    cancel: &CancellationToken,
) -> Result<Vec<PokemonListItem>, ApiError> {
    let page = cancellable(cancel, catalog.pokemon_page(limit, offset)).await??;
    debug!(count = page.count, returned = page.results.len(), "pokemon page loaded");
    Ok(items_from_page(&page, artwork_base))
}

/// Lists the damage types.
///
/// Entries whose id cannot be read from their URL are dropped.
pub async fn list_types<C: PokemonCatalog + ?Sized>(
    catalog: &C,
    limit: u32,
    offset: u32,
    cancel: &CancellationToken,
) -> Result<Vec<TypeRef>, ApiError> {
    let page = cancellable(cancel, catalog.type_page(limit, offset)).await??;
    Ok(types_from_page(&page))
}

/// Lists the Pokemon that have the type `name`.
pub async fn pokemon_of_type<C: PokemonCatalog + ?Sized>(
    catalog: &C,
    name: &str,
    artwork_base: &str,
    cancel: &CancellationToken,
) -> Result<Vec<PokemonListItem>, ApiError> {
    let detail = cancellable(cancel, catalog.type_detail(name)).await??;
    debug!(type_name = %detail.name, members = detail.pokemon.len(), "type members loaded");
    Ok(members_to_items(&detail, artwork_base))
}

/// Lists the Pokemon matching `query`.
///
/// With a type filter only that type's members are fetched; otherwise the
/// first `api.list_limit` entries of the full list are. The search text and
/// row limit are applied afterwards.
pub async fn find_pokemon<C: PokemonCatalog + ?Sized>(
    catalog: &C,
    query: &PokemonQuery<'_>,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<Vec<PokemonListItem>, ApiError> {
    let artwork_base = &config.sprites.artwork_base;
    let items = match query.type_name {
        Some(name) => pokemon_of_type(catalog, name, artwork_base, cancel).await?,
        None => list_pokemon(catalog, config.api.list_limit, 0, artwork_base, cancel).await?,
    };

    let limit = query.limit.unwrap_or(usize::MAX);
    Ok(filter_items(&items, query.search)
        .into_iter()
        .take(limit)
        .cloned()
        .collect())
}

/// Converts a page of Pokemon links into list rows.
#[must_use]
pub fn items_from_page(page: &NamedPage, artwork_base: &str) -> Vec<PokemonListItem> {
    page.results
        .iter()
        .map(|link| PokemonListItem::from_summary(&link.to_summary(), artwork_base))
        .collect()
}

/// Converts a page of type links into type references with known ids.
#[must_use]
pub fn types_from_page(page: &NamedPage) -> Vec<TypeRef> {
    page.results
        .iter()
        .map(NamedResource::to_type_ref)
        .filter(|ty| ty.id.is_some())
        .collect()
}

/// Converts the member list of a type into list rows, in dex order.
#[must_use]
pub fn members_to_items(detail: &TypeDetail, artwork_base: &str) -> Vec<PokemonListItem> {
    let mut items: Vec<PokemonListItem> = detail
        .pokemon
        .iter()
        .map(|member| PokemonListItem::from_summary(&member.pokemon.to_summary(), artwork_base))
        .collect();
    items.sort_by_key(|item| item.id);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    const ARTWORK: &str = "https://sprites.example/artwork";

    fn page(json: &str) -> NamedPage {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_items_from_page() {
        let page = page(
            r#"{"count": 3, "next": null, "previous": null, "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "mr-mime", "url": "https://pokeapi.co/api/v2/pokemon/122/"},
                {"name": "mystery", "url": ""}
            ]}"#,
        );
        let items = items_from_page(&page, ARTWORK);

        insta::assert_json_snapshot!(items, @r#"
        [
          {
            "id": 1,
            "name": "Bulbasaur",
            "sprite_url": "https://sprites.example/artwork/1.png"
          },
          {
            "id": 122,
            "name": "Mr-Mime",
            "sprite_url": "https://sprites.example/artwork/122.png"
          },
          {
            "id": 0,
            "name": "Mystery",
            "sprite_url": null
          }
        ]
        "#);
    }

    #[test]
    fn test_types_from_page_drops_unknown_ids() {
        let page = page(
            r#"{"count": 3, "next": null, "previous": null, "results": [
                {"name": "normal", "url": "https://pokeapi.co/api/v2/type/1/"},
                {"name": "Fire", "url": "https://pokeapi.co/api/v2/type/10/"},
                {"name": "shadow", "url": ""}
            ]}"#,
        );
        assert_eq!(
            types_from_page(&page),
            [TypeRef::new(1, "normal"), TypeRef::new(10, "fire")]
        );
    }

    #[test]
    fn test_members_sorted_by_id() {
        let detail: TypeDetail = serde_json::from_str(
            r#"{"id": 13, "name": "electric", "damage_relations": {}, "pokemon": [
                {"slot": 1, "pokemon": {"name": "raichu", "url": "https://pokeapi.co/api/v2/pokemon/26/"}},
                {"slot": 1, "pokemon": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon/25/"}},
                {"slot": 2, "pokemon": {"name": "magnemite", "url": "https://pokeapi.co/api/v2/pokemon/81/"}}
            ]}"#,
        )
        .unwrap();
        let items = members_to_items(&detail, ARTWORK);

        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Pikachu", "Raichu", "Magnemite"]);

        let hits: Vec<_> = filter_items(&items, "chu").into_iter().map(|i| i.id).collect();
        assert_eq!(hits, [25, 26]);
    }

    #[derive(Default)]
    struct MockCatalog {
        /// Every call, in order.
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PokemonCatalog for MockCatalog {
        async fn pokemon_page(&self, limit: u32, offset: u32) -> Result<NamedPage, ApiError> {
            self.calls.lock().push(format!("pokemon_page {limit} {offset}"));
            Ok(page(
                r#"{"count": 1302, "next": null, "previous": null, "results": [
                    {"name": "pichu", "url": "https://pokeapi.co/api/v2/pokemon/172/"},
                    {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon/25/"},
                    {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"},
                    {"name": "raichu", "url": "https://pokeapi.co/api/v2/pokemon/26/"}
                ]}"#,
            ))
        }

        async fn type_page(&self, limit: u32, offset: u32) -> Result<NamedPage, ApiError> {
            self.calls.lock().push(format!("type_page {limit} {offset}"));
            Ok(page(r#"{"count": 0, "next": null, "previous": null, "results": []}"#))
        }

        async fn type_detail(&self, name: &str) -> Result<TypeDetail, ApiError> {
            self.calls.lock().push(format!("type_detail {name}"));
            if name != "electric" {
                return Err(ApiError::NotFound(format!("mock://type/{name}")));
            }
            Ok(serde_json::from_str(
                r#"{"id": 13, "name": "electric", "damage_relations": {}, "pokemon": [
                    {"slot": 1, "pokemon": {"name": "raichu", "url": "https://pokeapi.co/api/v2/pokemon/26/"}},
                    {"slot": 1, "pokemon": {"name": "magnemite", "url": "https://pokeapi.co/api/v2/pokemon/81/"}},
                    {"slot": 1, "pokemon": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon/25/"}},
                    {"slot": 1, "pokemon": {"name": "pichu", "url": "https://pokeapi.co/api/v2/pokemon/172/"}}
                ]}"#,
            )
            .unwrap())
        }
    }

    fn ids(items: &[PokemonListItem]) -> Vec<u32> {
        items.iter().map(|item| item.id).collect()
    }

    #[tokio::test]
    async fn test_find_by_type_and_search() {
        let catalog = MockCatalog::default();
        let query = PokemonQuery {
            type_name: Some("electric"),
            search: "CHU",
            limit: None,
        };

        let items = find_pokemon(&catalog, &query, &Config::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(ids(&items), [25, 26, 172]);
        assert_eq!(items[0].name, "Pikachu");
        assert_eq!(*catalog.calls.lock(), ["type_detail electric"]);
    }

    #[tokio::test]
    async fn test_find_by_type_search_and_limit() {
        let catalog = MockCatalog::default();
        let query = PokemonQuery {
            type_name: Some("electric"),
            search: "chu",
            limit: Some(2),
        };

        let items = find_pokemon(&catalog, &query, &Config::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(ids(&items), [25, 26]);
    }

    #[tokio::test]
    async fn test_find_without_type_uses_full_list() {
        let catalog = MockCatalog::default();
        let mut config = Config::default();
        config.api.list_limit = 151;
        let query = PokemonQuery {
            search: "chu",
            ..PokemonQuery::default()
        };

        let items = find_pokemon(&catalog, &query, &config, &CancellationToken::new())
            .await
            .unwrap();

        // Full-list order is kept.
        assert_eq!(ids(&items), [172, 25, 26]);
        assert_eq!(*catalog.calls.lock(), ["pokemon_page 151 0"]);
    }

    #[tokio::test]
    async fn test_find_unknown_type() {
        let catalog = MockCatalog::default();
        let query = PokemonQuery {
            type_name: Some("shadow"),
            ..PokemonQuery::default()
        };

        let err = find_pokemon(&catalog, &query, &Config::default(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cancelled_listing_skips_fetch() {
        let catalog = MockCatalog::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = list_types(&catalog, 100, 0, &cancel).await.unwrap_err();

        assert!(matches!(err, ApiError::Cancelled));
        assert!(catalog.calls.lock().is_empty());
    }
}
