//! The working catalog for one CLI invocation
//!
//! Loads the data file on open and writes it back on [`Workspace::save`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::Catalog;
use crate::storage::{LoadOutcome, LoadPolicy};

pub struct Workspace {
    data_file: PathBuf,
    catalog: Catalog,
}

impl Workspace {
    /// Loads the catalog from `data_file`
    ///
    /// A missing file starts an empty catalog. Under the lenient policy a
    /// broken file does too, with a warning.
    pub fn open(data_file: impl Into<PathBuf>, policy: LoadPolicy, output: &Output) -> Result<Self> {
        let data_file = data_file.into();
        let mut catalog = Catalog::new();

        let outcome = catalog
            .load_data_with(&data_file, policy)
            .with_context(|| format!("Failed to load catalog: {}", data_file.display()))?;

        match &outcome {
            LoadOutcome::Loaded { .. } | LoadOutcome::Missing => {
                output.verbose_ctx("load", &format!("{}: {}", data_file.display(), outcome));
            }
            LoadOutcome::Malformed(_) | LoadOutcome::Unreadable(_) => {
                output.warn(&format!("{}: {}", data_file.display(), outcome));
            }
        }

        Ok(Self { data_file, catalog })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Replaces the working catalog wholesale
    pub fn replace(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Writes the catalog back to the data file
    pub fn save(&self) -> Result<()> {
        self.catalog
            .save_data(&self.data_file)
            .with_context(|| format!("Failed to save catalog: {}", self.data_file.display()))
    }
}
