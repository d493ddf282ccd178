//! Non-fatal notices returned alongside operation results

use std::fmt;

use serde::Serialize;

/// Something the caller should know about, but that did not stop the operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A product was created with attributes its category does not require
    ExtraAttributes {
        product: String,
        category: String,
        attributes: Vec<String>,
    },

    /// A product listing was filtered by an unknown category, so every product
    /// was returned instead
    UnknownCategoryFilter { category: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ExtraAttributes {
                product,
                category,
                attributes,
            } => write!(
                f,
                "Product '{}' has extra attributes not defined in category '{}': {}",
                product,
                category,
                attributes.join(", ")
            ),
            Diagnostic::UnknownCategoryFilter { category } => write!(
                f,
                "No category found with name '{}'. Listing all products instead.",
                category
            ),
        }
    }
}

/// A result value together with the diagnostics produced while computing it
#[derive(Debug, Clone, PartialEq)]
pub struct Reported<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Reported<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn with(value: T, diagnostic: Diagnostic) -> Self {
        Self {
            value,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
