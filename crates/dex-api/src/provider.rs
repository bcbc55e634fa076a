//! Data-source traits and their PokeAPI-backed implementations.
//!
//! The orchestration code never talks to [`PokeApiClient`] directly; it goes
//! through [`TypeDataProvider`], [`PokemonSource`] and [`PokemonCatalog`] so
//! that tests can substitute in-memory sources.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use dex_core::{FxHashMap, TypeRef, TypeRelations, fx_hash_map};

use crate::client::PokeApiClient;
use crate::error::ApiError;
use crate::wire::{NamedPage, Pokemon, Species, TypeDetail};

/// Supplies the damage relations of a single type.
#[async_trait]
pub trait TypeDataProvider: Send + Sync {
    /// Fetches the relation record for `ty`.
    async fn type_relations(&self, ty: &TypeRef) -> Result<TypeRelations, ApiError>;
}

/// Supplies Pokemon and species records.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// Fetches a Pokemon by id or name.
    async fn pokemon(&self, key: &str) -> Result<Pokemon, ApiError>;

    /// Fetches a species by id or name.
    async fn species(&self, key: &str) -> Result<Species, ApiError>;
}

/// Supplies the list pages and type membership used for browsing.
#[async_trait]
pub trait PokemonCatalog: Send + Sync {
    /// Fetches one page of the Pokemon list.
    async fn pokemon_page(&self, limit: u32, offset: u32) -> Result<NamedPage, ApiError>;

    /// Fetches one page of the type list.
    async fn type_page(&self, limit: u32, offset: u32) -> Result<NamedPage, ApiError>;

    /// Fetches a type record, including the Pokemon that have it.
    async fn type_detail(&self, name: &str) -> Result<TypeDetail, ApiError>;
}

#[async_trait]
impl TypeDataProvider for PokeApiClient {
    async fn type_relations(&self, ty: &TypeRef) -> Result<TypeRelations, ApiError> {
        let detail = self.get_type(&ty.lookup_key()).await?;
        Ok(detail.to_relations())
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn pokemon(&self, key: &str) -> Result<Pokemon, ApiError> {
        self.get_pokemon(key).await
    }

    async fn species(&self, key: &str) -> Result<Species, ApiError> {
        self.get_species(key).await
    }
}

#[async_trait]
impl PokemonCatalog for PokeApiClient {
    async fn pokemon_page(&self, limit: u32, offset: u32) -> Result<NamedPage, ApiError> {
        self.get_pokemon_page(limit, offset).await
    }

    async fn type_page(&self, limit: u32, offset: u32) -> Result<NamedPage, ApiError> {
        self.get_type_page(limit, offset).await
    }

    async fn type_detail(&self, name: &str) -> Result<TypeDetail, ApiError> {
        self.get_type(name).await
    }
}

/// Caches the relation records returned by an inner provider.
///
/// Records are keyed by type name and live as long as the provider. Failed
/// lookups are not cached, so a later call retries them.
#[derive(Debug, Default)]
pub struct CachedProvider<P> {
    inner: P,
    cache: RwLock<FxHashMap<String, TypeRelations>>,
}

impl<P> CachedProvider<P> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(fx_hash_map()),
        }
    }

    /// Returns the wrapped provider.
    #[inline]
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Drops every cached record.
    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

#[async_trait]
impl<P: TypeDataProvider> TypeDataProvider for CachedProvider<P> {
    async fn type_relations(&self, ty: &TypeRef) -> Result<TypeRelations, ApiError> {
        let cached = self.cache.read().get(&ty.name).cloned();
        if let Some(relations) = cached {
            debug!(type_name = %ty.name, "type relations cache hit");
            return Ok(relations);
        }

        let relations = self.inner.type_relations(ty).await?;
        self.cache.write().insert(ty.name.clone(), relations.clone());
        Ok(relations)
    }
}

#[async_trait]
impl<P: PokemonSource> PokemonSource for CachedProvider<P> {
    async fn pokemon(&self, key: &str) -> Result<Pokemon, ApiError> {
        self.inner.pokemon(key).await
    }

    async fn species(&self, key: &str) -> Result<Species, ApiError> {
        self.inner.species(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TypeDataProvider for CountingProvider {
        async fn type_relations(&self, ty: &TypeRef) -> Result<TypeRelations, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::status(503, format!("mock://type/{}", ty.name)));
            }
            Ok(TypeRelations::new(ty.clone()).with_double_damage_from([TypeRef::new(5, "ground")]))
        }
    }

    #[tokio::test]
    async fn test_cache_hit_skips_inner() {
        let provider = CachedProvider::new(CountingProvider::default());
        let electric = TypeRef::new(13, "electric");

        let first = provider.type_relations(&electric).await.unwrap();
        let second = provider.type_relations(&electric).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_keyed_by_name() {
        let provider = CachedProvider::new(CountingProvider::default());

        provider.type_relations(&TypeRef::new(13, "electric")).await.unwrap();
        provider.type_relations(&TypeRef::unresolved("electric")).await.unwrap();
        provider.type_relations(&TypeRef::new(11, "water")).await.unwrap();

        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = CachedProvider::new(CountingProvider {
            fail: true,
            ..CountingProvider::default()
        });
        let fire = TypeRef::new(10, "fire");

        assert!(provider.type_relations(&fire).await.is_err());
        assert!(provider.type_relations(&fire).await.is_err());

        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
        assert!(provider.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let provider = CachedProvider::new(CountingProvider::default());
        provider.type_relations(&TypeRef::new(10, "fire")).await.unwrap();
        provider.clear();
        assert!(provider.is_empty());

        provider.type_relations(&TypeRef::new(10, "fire")).await.unwrap();
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
    }
}
