//! Catalog CLI - A local-first product catalog manager
//!
//! Categories declare which attribute names their products must supply;
//! products carry the values. The whole catalog lives in memory and is
//! saved to a single JSON file.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Catalog, CatalogError, Category, CategoryId, Diagnostic, Product, ProductId};
pub use storage::{LoadOutcome, LoadPolicy};
