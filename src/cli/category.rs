//! Category CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::workspace::Workspace;
use crate::domain::{Category, CategoryId};

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Define a new category
    ///
    /// Examples:
    ///   catalog category define Phones OS RAM
    ///   catalog category define Watches "Strap, Battery Size"
    Define {
        /// Category name (unique, case-insensitive)
        name: String,

        /// Required attribute names (space or comma separated)
        #[arg(value_delimiter = ',')]
        attributes: Vec<String>,
    },

    /// List all categories
    List,

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
}

pub fn run(cmd: CategoryCommands, workspace: &mut Workspace, output: &Output) -> Result<()> {
    match cmd {
        CategoryCommands::Define { name, attributes } => {
            define_category(workspace, output, &name, &attributes)
        }
        CategoryCommands::List => list_categories(workspace, output),
        CategoryCommands::Show { category } => show_category(workspace, output, &category),
    }
}

fn define_category(
    workspace: &mut Workspace,
    output: &Output,
    name: &str,
    attributes: &[String],
) -> Result<()> {
    let name = name.trim();
    let attributes: Vec<&str> = attributes
        .iter()
        .map(|attr| attr.trim())
        .filter(|attr| !attr.is_empty())
        .collect();

    output.verbose_ctx(
        "category",
        &format!("Defining '{}' with attributes {:?}", name, attributes),
    );

    let category = workspace.catalog_mut().define_category(name, attributes)?;
    workspace.save()?;

    if output.is_json() {
        output.data(&category);
    } else {
        output.success(&format!(
            "Category '{}' defined with attributes: {}",
            category.name,
            join(&category)
        ));
        println!("ID: {}", category.id);
    }

    Ok(())
}

fn list_categories(workspace: &Workspace, output: &Output) -> Result<()> {
    let categories = workspace.catalog().list_categories();

    if output.is_json() {
        output.data(&categories);
    } else if categories.is_empty() {
        println!("No categories defined yet.");
    } else {
        println!("{:<38} {:<20} ATTRIBUTES", "ID", "NAME");
        println!("{}", "-".repeat(80));
        for category in categories {
            println!("{:<38} {:<20} {}", category.id, category.name, join(category));
        }
    }

    Ok(())
}

fn show_category(workspace: &Workspace, output: &Output, key: &str) -> Result<()> {
    let catalog = workspace.catalog();
    let key = key.trim();

    let category = catalog
        .get_category_by_name(key)
        .or_else(|| {
            key.parse::<CategoryId>()
                .ok()
                .and_then(|id| catalog.get_category_by_id(&id))
        })
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", key))?;

    let products = catalog.list_products(Some(category.name.as_str())).into_value();

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": category.id,
            "name": category.name,
            "attributes": category.attributes,
            "products": products.iter().map(|p| serde_json::json!({
                "id": p.id,
                "name": p.name,
            })).collect::<Vec<_>>(),
        }));
    } else {
        println!("Category: {}", category.name);
        println!("ID: {}", category.id);
        println!("Attributes: {}", join(category));

        if products.is_empty() {
            println!("\nNo products in this category.");
        } else {
            println!("\nProducts ({}):", products.len());
            for product in products {
                println!("  {} {}", product.id, product.name);
            }
        }
    }

    Ok(())
}

fn join(category: &Category) -> String {
    if category.attributes.is_empty() {
        return "(none)".to_string();
    }
    category
        .attributes
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
