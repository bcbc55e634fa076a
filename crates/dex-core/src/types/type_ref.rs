//! Damage types and their relation records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The ordered types of a single creature.
///
/// A creature has one or two types, so the set never spills to the heap.
/// Order is preserved for display; the calculator does not depend on it.
pub type TargetTypeSet = SmallVec<[TypeRef; 2]>;

/// A reference to one damage type.
///
/// Names are lowercase canonical API names (`"electric"`). The identifier is
/// `None` when the data source did not expose one.
///
/// # Examples
///
/// ```
/// use dex_core::TypeRef;
///
/// let fire = TypeRef::new(10, "fire");
/// assert_eq!(fire.lookup_key(), "10");
///
/// let unknown = TypeRef::unresolved("shadow");
/// assert_eq!(unknown.lookup_key(), "shadow");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef {
    /// Stable numeric identifier, if known.
    pub id: Option<u32>,
    /// Lowercase canonical type name.
    pub name: String,
}

impl TypeRef {
    /// Creates a type reference with a known identifier.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Creates a type reference whose identifier is unknown.
    #[must_use]
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Returns the path segment used to look this type up: the id when
    /// known, otherwise the name.
    #[must_use]
    pub fn lookup_key(&self) -> String {
        self.id
            .map_or_else(|| self.name.clone(), |id| id.to_string())
    }

    /// Returns `true` if the name is empty or whitespace only.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The damage relations of a single type.
///
/// The three `*_to` lists describe this type attacking; the three `*_from`
/// lists describe this type defending. A name normally appears in at most one
/// list of each direction.
///
/// # Examples
///
/// ```
/// use dex_core::{TypeRef, TypeRelations};
///
/// let flying = TypeRelations::new(TypeRef::new(3, "flying"))
///     .with_double_damage_from([TypeRef::new(13, "electric")])
///     .with_no_damage_from([TypeRef::new(5, "ground")]);
///
/// assert!((flying.factor_from("electric") - 2.0).abs() < f64::EPSILON);
/// assert!(flying.factor_from("ground").abs() < f64::EPSILON);
/// assert!((flying.factor_from("water") - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRelations {
    /// The type these relations belong to.
    pub type_ref: TypeRef,
    /// Types this type deals no damage to.
    pub no_damage_to: Vec<TypeRef>,
    /// Types this type deals half damage to.
    pub half_damage_to: Vec<TypeRef>,
    /// Types this type deals double damage to.
    pub double_damage_to: Vec<TypeRef>,
    /// Types this type takes no damage from.
    pub no_damage_from: Vec<TypeRef>,
    /// Types this type takes half damage from.
    pub half_damage_from: Vec<TypeRef>,
    /// Types this type takes double damage from.
    pub double_damage_from: Vec<TypeRef>,
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::unresolved(String::new())
    }
}

impl TypeRelations {
    /// Creates a relations record with every list empty.
    #[must_use]
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            ..Self::default()
        }
    }

    /// Sets the `no_damage_to` list.
    #[must_use]
    pub fn with_no_damage_to(mut self, types: impl IntoIterator<Item = TypeRef>) -> Self {
        self.no_damage_to = types.into_iter().collect();
        self
    }

    /// Sets the `half_damage_to` list.
    #[must_use]
    pub fn with_half_damage_to(mut self, types: impl IntoIterator<Item = TypeRef>) -> Self {
        self.half_damage_to = types.into_iter().collect();
        self
    }

    /// Sets the `double_damage_to` list.
    #[must_use]
    pub fn with_double_damage_to(mut self, types: impl IntoIterator<Item = TypeRef>) -> Self {
        self.double_damage_to = types.into_iter().collect();
        self
    }

    /// Sets the `no_damage_from` list.
    #[must_use]
    pub fn with_no_damage_from(mut self, types: impl IntoIterator<Item = TypeRef>) -> Self {
        self.no_damage_from = types.into_iter().collect();
        self
    }

    /// Sets the `half_damage_from` list.
    #[must_use]
    pub fn with_half_damage_from(mut self, types: impl IntoIterator<Item = TypeRef>) -> Self {
        self.half_damage_from = types.into_iter().collect();
        self
    }

    /// Sets the `double_damage_from` list.
    #[must_use]
    pub fn with_double_damage_from(mut self, types: impl IntoIterator<Item = TypeRef>) -> Self {
        self.double_damage_from = types.into_iter().collect();
        self
    }

    /// Iterates over every type mentioned in any of the six lists.
    pub fn referenced_types(&self) -> impl Iterator<Item = &TypeRef> {
        self.no_damage_to
            .iter()
            .chain(&self.half_damage_to)
            .chain(&self.double_damage_to)
            .chain(&self.no_damage_from)
            .chain(&self.half_damage_from)
            .chain(&self.double_damage_from)
    }

    /// Returns the factor an attack of type `attacker` is multiplied by when
    /// it hits this type.
    ///
    /// Every `*_from` list containing the name contributes, so contradictory
    /// records still produce a finite product.
    #[must_use]
    pub fn factor_from(&self, attacker: &str) -> f64 {
        let mentions = |list: &[TypeRef]| list.iter().any(|t| t.name == attacker);

        let mut factor = 1.0;
        if mentions(&self.double_damage_from) {
            factor *= 2.0;
        }
        if mentions(&self.half_damage_from) {
            factor *= 0.5;
        }
        if mentions(&self.no_damage_from) {
            factor *= 0.0;
        }
        factor
    }
}
