//! Catalog errors
//!
//! Every failing operation returns a [`CatalogError`]. Callers that only need
//! to decide how to react (show the message, alert, abort) can match on
//! [`CatalogError::kind`].

use std::path::PathBuf;

use thiserror::Error;

use super::id::{CategoryId, ProductId};

/// Broad classification of a catalog error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; nothing was changed
    Validation,
    /// A referenced category or product does not exist; nothing was changed
    NotFound,
    /// Stored data violates the catalog's own invariants
    InternalConsistency,
    /// Reading or writing the data file failed
    Persistence,
}

/// Input rejected before any mutation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    #[error("All attribute names must be non-empty")]
    EmptyAttributeName,

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Product name cannot be empty")]
    EmptyProductName,

    #[error("Missing required attributes for category '{category}': {}", .missing.join(", "))]
    MissingAttributes {
        category: String,
        missing: Vec<String>,
    },

    #[error("Attribute '{attribute}' is not a valid attribute for category '{category}'")]
    UnknownAttribute { category: String, attribute: String },
}

/// Failure reading or writing the data file
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed catalog data in {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Category '{0}' does not exist. Please define it first.")]
    CategoryNotFound(String),

    #[error("Product with ID '{0}' not found")]
    ProductNotFound(ProductId),

    #[error("Category {category_id} for product '{product}' not found")]
    DanglingCategory {
        product: String,
        category_id: CategoryId,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::CategoryNotFound(_) | CatalogError::ProductNotFound(_) => {
                ErrorKind::NotFound
            }
            CatalogError::DanglingCategory { .. } => ErrorKind::InternalConsistency,
            CatalogError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    /// Returns true if the caller can fix the problem by changing its input
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::NotFound)
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
