//! Resource URL helpers.
//!
//! PokeAPI links resources by URL (`https://pokeapi.co/api/v2/type/10/`)
//! rather than by id, so ids are recovered from the last path segment.

/// Extracts the numeric id from a resource URL.
///
/// The query string and fragment are ignored, as are trailing slashes.
/// Returns `None` when the last path segment is not a number.
///
/// # Examples
///
/// ```
/// use dex_core::extract_id;
///
/// assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/1/"), Some(1));
/// assert_eq!(extract_id("/api/v2/type/10/"), Some(10));
/// assert_eq!(extract_id("https://pokeapi.co/api/v2/type/fire/"), None);
/// assert_eq!(extract_id(""), None);
/// ```
#[must_use]
pub fn extract_id(url: &str) -> Option<u32> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .and_then(|segment| segment.parse().ok())
}

/// Official artwork URL for a Pokemon id.
///
/// # Examples
///
/// ```
/// use dex_core::pokemon_sprite_url;
///
/// assert_eq!(
///     pokemon_sprite_url("https://sprites.example/artwork/", 6),
///     "https://sprites.example/artwork/6.png"
/// );
/// ```
#[must_use]
pub fn pokemon_sprite_url(artwork_base: &str, id: u32) -> String {
    format!("{}/{id}.png", artwork_base.trim_end_matches('/'))
}

/// Type badge URL for a type id (not a Pokemon id).
#[must_use]
pub fn type_badge_url(type_badge_base: &str, type_id: u32) -> String {
    format!("{}/{type_id}.png", type_badge_base.trim_end_matches('/'))
}
