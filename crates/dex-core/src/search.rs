//! Pokemon list search.
//!
//! A query matches an item when the item's name contains it
//! (case-insensitively) or when the item's dex number contains it as a
//! decimal substring, so `"25"` finds Pikachu and `"pika"` does too.

use crate::types::PokemonListItem;

/// Returns the items matching `query`, in their original order.
///
/// A blank query matches everything. Items whose id is unknown (`0`) can
/// only match by name.
///
/// # Examples
///
/// ```
/// use dex_core::{filter_items, PokemonListItem};
///
/// let items = vec![
///     PokemonListItem { id: 1, name: "Bulbasaur".to_owned(), sprite_url: None },
///     PokemonListItem { id: 25, name: "Pikachu".to_owned(), sprite_url: None },
/// ];
///
/// let hits = filter_items(&items, "PIKA");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 25);
///
/// assert_eq!(filter_items(&items, "2").len(), 1);
/// assert_eq!(filter_items(&items, "").len(), 2);
/// ```
#[must_use]
pub fn filter_items<'a>(items: &'a [PokemonListItem], query: &str) -> Vec<&'a PokemonListItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| matches(item, &query))
        .collect()
}

fn matches(item: &PokemonListItem, lowercase_query: &str) -> bool {
    if item.name.to_lowercase().contains(lowercase_query) {
        return true;
    }
    item.id != 0 && item.id.to_string().contains(lowercase_query)
}
