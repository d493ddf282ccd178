//! Product domain model

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::ValidationError;
use super::id::{CategoryId, ProductId};

/// Attribute values for a product, keyed by attribute name
///
/// Values are opaque strings. Keys are kept sorted so serialized output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Creates an empty attribute map
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Gets a value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Sets a value, returning the previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns true if a value exists for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrites every key present in `other`, leaving the rest untouched
    pub fn merge(&mut self, other: Attributes) {
        self.0.extend(other.0);
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Attributes {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self.0.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, "{}", pairs.join(", "))
    }
}

/// A product filed under one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,

    /// Display name (not required to be unique)
    pub name: String,

    /// Owning category, fixed at creation
    pub category_id: CategoryId,

    /// Attribute values
    pub attributes: Attributes,
}

impl Product {
    /// Creates a new product with a fresh ID
    pub fn new(
        name: impl Into<String>,
        category_id: CategoryId,
        attributes: Attributes,
    ) -> Result<Self, ValidationError> {
        Self::with_id(ProductId::generate(), name, category_id, attributes)
    }

    /// Creates a product with a specific ID (for loading)
    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        category_id: CategoryId,
        attributes: Attributes,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyProductName);
        }

        Ok(Self {
            id,
            name,
            category_id,
            attributes,
        })
    }
}
