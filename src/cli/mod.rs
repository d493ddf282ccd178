//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Category | Category definitions | `category define`, `category list`, `category show` |
//! | Product | Product lifecycle | `product create`, `product update`, `product list` |
//! | Data | Import/export | `save`, `load` |
//!
//! Every command loads the working data file first; commands that change
//! the catalog write it back before returning.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! Warnings (extra attributes, unknown category filters, unusable data files)
//! go to stderr in both formats.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! catalog --verbose product list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod logging;
mod workspace;
mod category;
mod product;
mod data;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use workspace::Workspace;
