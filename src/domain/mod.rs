//! Domain models for the catalog
//!
//! Contains the core business logic without any I/O concerns.

mod id;
mod error;
mod diagnostic;
mod category;
mod product;
mod catalog;

pub use id::{CategoryId, ProductId, IdError};
pub use error::{CatalogError, ErrorKind, PersistenceError, Result, ValidationError};
pub use diagnostic::{Diagnostic, Reported};
pub use category::Category;
pub use product::{Attributes, Product};
pub use catalog::Catalog;
