//! # Storage Layer
//!
//! Persistence for the catalog and the CLI configuration.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Catalog | Pretty-printed JSON | `catalog_data.json` (configurable) |
//! | Config | TOML | `./catalog.toml`, `~/.config/catalog/catalog.toml` |
//!
//! ## Write Safety
//!
//! Saves go to a temp file that is renamed over the target. There is no
//! locking; one process is expected to own a data file at a time.
//!
//! ## Key Types
//!
//! - [`CatalogFile`] - Read/write a catalog data file
//! - [`LoadPolicy`] / [`LoadOutcome`] - How loading degrades and what happened
//! - [`Config`] - Layered configuration

mod snapshot;
mod config;

pub use snapshot::{
    decode, encode, CatalogFile, DecodeError, LoadOutcome, LoadPolicy, DEFAULT_DATA_FILE,
};
pub use config::{Config, ConfigError, ConfigFile, OutputFormat, CONFIG_FILE};
