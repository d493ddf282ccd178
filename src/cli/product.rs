//! Product CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::workspace::Workspace;
use crate::domain::{Attributes, Catalog, Product, ProductId};

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Create a product in a category
    ///
    /// Examples:
    ///   catalog product create Pixel --category Phones -a OS=Android -a RAM=8GB
    Create {
        /// Product name
        name: String,

        /// Category name (case-insensitive)
        #[arg(long, short)]
        category: String,

        /// Attribute value, repeatable
        #[arg(long = "attr", short = 'a', value_name = "KEY=VALUE", value_parser = parse_pair)]
        attributes: Vec<(String, String)>,
    },

    /// Update attribute values of a product
    ///
    /// Only attributes required by the product's category can be updated.
    Update {
        /// Product ID
        id: String,

        /// New attribute value, repeatable
        #[arg(long = "attr", short = 'a', value_name = "KEY=VALUE", value_parser = parse_pair, required = true)]
        attributes: Vec<(String, String)>,
    },

    /// Show product details
    Show {
        /// Product ID
        id: String,
    },

    /// List products, optionally for one category
    List {
        /// Category name (unknown names list every product)
        #[arg(long, short)]
        category: Option<String>,
    },
}

pub fn run(cmd: ProductCommands, workspace: &mut Workspace, output: &Output) -> Result<()> {
    match cmd {
        ProductCommands::Create {
            name,
            category,
            attributes,
        } => create_product(workspace, output, &name, &category, attributes),
        ProductCommands::Update { id, attributes } => {
            update_product(workspace, output, &id, attributes)
        }
        ProductCommands::Show { id } => show_product(workspace, output, &id),
        ProductCommands::List { category } => list_products(workspace, output, category.as_deref()),
    }
}

/// Parses a `KEY=VALUE` pair, splitting on the first `=`
fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("attribute name is empty in '{}'", s));
    }

    Ok((key.to_string(), value.trim().to_string()))
}

fn create_product(
    workspace: &mut Workspace,
    output: &Output,
    name: &str,
    category: &str,
    attributes: Vec<(String, String)>,
) -> Result<()> {
    let attributes: Attributes = attributes.into_iter().collect();
    output.verbose_ctx(
        "product",
        &format!("Creating '{}' in '{}' with {}", name, category, attributes),
    );

    let reported = workspace
        .catalog_mut()
        .create_product(name.trim(), category.trim(), attributes)?;
    workspace.save()?;

    output.diagnostics(&reported.diagnostics);
    let product = reported.value;

    if output.is_json() {
        output.data(&product);
    } else {
        let category_name = category_name(workspace.catalog(), &product);
        output.success(&format!(
            "Product '{}' created in category '{}'.",
            product.name, category_name
        ));
        println!("ID: {}", product.id);
    }

    Ok(())
}

fn update_product(
    workspace: &mut Workspace,
    output: &Output,
    id: &str,
    attributes: Vec<(String, String)>,
) -> Result<()> {
    let id: ProductId = id.parse()?;
    let attributes: Attributes = attributes.into_iter().collect();
    output.verbose_ctx("product", &format!("Updating {} with {}", id, attributes));

    let product = workspace.catalog_mut().update_product(&id, attributes)?;
    workspace.save()?;

    if output.is_json() {
        output.data(&product);
    } else {
        output.success(&format!(
            "Product '{}' (ID: {}) updated.",
            product.name, product.id
        ));
    }

    Ok(())
}

fn show_product(workspace: &Workspace, output: &Output, id: &str) -> Result<()> {
    let id: ProductId = id.parse()?;
    let catalog = workspace.catalog();
    let product = catalog
        .get_product_by_id(&id)
        .ok_or_else(|| anyhow::anyhow!("Product not found: {}", id))?;

    if output.is_json() {
        output.data(product);
    } else {
        println!("Product: {}", product.name);
        println!("ID: {}", product.id);
        println!("Category: {}", category_name(catalog, product));

        if product.attributes.is_empty() {
            println!("\nNo attributes.");
        } else {
            println!("\nAttributes:");
            for (key, value) in product.attributes.iter() {
                println!("  {}: {}", key, value);
            }
        }
    }

    Ok(())
}

fn list_products(workspace: &Workspace, output: &Output, category: Option<&str>) -> Result<()> {
    let catalog = workspace.catalog();
    let reported = catalog.list_products(category.map(str::trim));
    output.diagnostics(&reported.diagnostics);

    let products = reported.value;
    output.verbose_ctx("product", &format!("Found {} products", products.len()));

    if output.is_json() {
        output.data(&products);
    } else if products.is_empty() {
        match category {
            Some(name) => println!("No products found for category '{}'.", name.trim()),
            None => println!("No products created yet."),
        }
    } else {
        println!("{:<38} {:<20} {:<15} ATTRIBUTES", "ID", "NAME", "CATEGORY");
        println!("{}", "-".repeat(90));
        for product in products {
            println!(
                "{:<38} {:<20} {:<15} {}",
                product.id,
                product.name,
                category_name(catalog, product),
                product.attributes
            );
        }
    }

    Ok(())
}

fn category_name<'a>(catalog: &'a Catalog, product: &Product) -> &'a str {
    catalog
        .category_of(product)
        .map(|category| category.name.as_str())
        .unwrap_or("Unknown Category")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_splits_on_first_equals() {
        assert_eq!(
            parse_pair("Resolution=1920x1080=FHD"),
            Ok(("Resolution".to_string(), "1920x1080=FHD".to_string()))
        );
    }

    #[test]
    fn parse_pair_trims() {
        assert_eq!(
            parse_pair(" RAM = 8GB "),
            Ok(("RAM".to_string(), "8GB".to_string()))
        );
    }

    #[test]
    fn parse_pair_allows_empty_value() {
        assert_eq!(parse_pair("Notes="), Ok(("Notes".to_string(), String::new())));
    }

    #[test]
    fn parse_pair_rejects_bad_input() {
        assert!(parse_pair("RAM").is_err());
        assert!(parse_pair("=8GB").is_err());
    }
}
