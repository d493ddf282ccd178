//! Save and load commands

use std::path::Path;

use anyhow::{bail, Context, Result};

use super::output::Output;
use super::workspace::Workspace;
use crate::domain::Catalog;
use crate::storage::{LoadOutcome, LoadPolicy};

/// Writes a copy of the working catalog to `path`
pub fn save(workspace: &Workspace, output: &Output, path: &Path) -> Result<()> {
    let catalog = workspace.catalog();
    catalog
        .save_data(path)
        .with_context(|| format!("Failed to save catalog to {}", path.display()))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "saved": path.display().to_string(),
            "categories": catalog.category_count(),
            "products": catalog.product_count(),
        }));
    } else {
        output.success(&format!("Catalog data saved to {}", path.display()));
    }

    Ok(())
}

/// Replaces the working catalog with the contents of `path`
///
/// The working data file is only rewritten when `path` held a usable catalog.
pub fn load(workspace: &mut Workspace, output: &Output, path: &Path, policy: LoadPolicy) -> Result<()> {
    let mut imported = Catalog::new();
    let outcome = imported
        .load_data_with(path, policy)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;

    let (categories, products) = match outcome {
        LoadOutcome::Loaded {
            categories,
            products,
        } => (categories, products),
        other => bail!(
            "Nothing loaded from {}: {}. {} was left unchanged.",
            path.display(),
            other,
            workspace.data_file().display()
        ),
    };

    workspace.replace(imported);
    workspace.save()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "loaded": path.display().to_string(),
            "categories": categories,
            "products": products,
        }));
    } else {
        output.success(&format!(
            "Catalog data loaded from {} ({} categories, {} products)",
            path.display(),
            categories,
            products
        ));
    }

    Ok(())
}
