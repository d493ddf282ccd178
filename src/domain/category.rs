//! Category domain model
//!
//! A category is a named template: every product filed under it must supply
//! a value for each of its required attribute names.

use std::collections::BTreeSet;

use serde::Serialize;

use super::error::ValidationError;
use super::id::CategoryId;
use super::product::Attributes;

/// A product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name, unique across the catalog ignoring case
    pub name: String,

    /// Required attribute names (serialized sorted)
    pub attributes: BTreeSet<String>,
}

impl Category {
    /// Creates a new category with a fresh ID
    ///
    /// Duplicate attribute names collapse into one.
    pub fn new<I, S>(name: impl Into<String>, attributes: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_id(CategoryId::generate(), name, attributes)
    }

    /// Creates a category with a specific ID (for loading)
    pub fn with_id<I, S>(
        id: CategoryId,
        name: impl Into<String>,
        attributes: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }

        let attributes: BTreeSet<String> = attributes.into_iter().map(Into::into).collect();
        if attributes.iter().any(String::is_empty) {
            return Err(ValidationError::EmptyAttributeName);
        }

        Ok(Self {
            id,
            name,
            attributes,
        })
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Returns true if `attribute` is one of the required names
    pub fn requires(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

    /// Required names absent from `attributes`, sorted
    pub fn missing_from(&self, attributes: &Attributes) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|name| !attributes.contains(name))
            .cloned()
            .collect()
    }

    /// Names in `attributes` this category does not require, sorted
    pub fn extras_in(&self, attributes: &Attributes) -> Vec<String> {
        attributes
            .keys()
            .filter(|name| !self.requires(name))
            .cloned()
            .collect()
    }
}
