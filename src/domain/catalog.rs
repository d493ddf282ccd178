//! The catalog aggregate
//!
//! Owns every category and product. All validation happens here, before any
//! map is touched, so a failed operation never leaves partial changes behind.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::category::Category;
use super::diagnostic::{Diagnostic, Reported};
use super::error::{CatalogError, Result, ValidationError};
use super::id::{CategoryId, ProductId};
use super::product::{Attributes, Product};

/// In-memory catalog of categories and products
///
/// Listings come back in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: HashMap<CategoryId, Category>,
    category_order: Vec<CategoryId>,
    products: HashMap<ProductId, Product>,
    product_order: Vec<ProductId>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.products.is_empty()
    }

    // --- Categories ---

    /// Defines a new category
    ///
    /// Fails if the name is empty, an attribute name is empty, or another
    /// category already uses the name (ignoring case).
    pub fn define_category<I, S>(&mut self, name: &str, attributes: I) -> Result<Category>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let category = Category::new(name, attributes)?;

        if self.get_category_by_name(name).is_some() {
            return Err(ValidationError::DuplicateCategory(name.to_string()).into());
        }

        debug!(
            id = %category.id,
            name = %category.name,
            attributes = ?category.attributes,
            "category defined"
        );

        self.insert_category(category.clone());
        Ok(category)
    }

    pub fn get_category_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Finds a category by name, ignoring case
    pub fn get_category_by_name(&self, name: &str) -> Option<&Category> {
        self.list_categories()
            .into_iter()
            .find(|category| category.has_name(name))
    }

    pub fn list_categories(&self) -> Vec<&Category> {
        self.category_order
            .iter()
            .filter_map(|id| self.categories.get(id))
            .collect()
    }

    // --- Products ---

    /// Creates a product in the named category
    ///
    /// Every required attribute of the category must be present. Attributes
    /// the category does not require are kept and reported as a diagnostic.
    pub fn create_product(
        &mut self,
        name: &str,
        category_name: &str,
        attributes: Attributes,
    ) -> Result<Reported<Product>> {
        if name.is_empty() {
            return Err(ValidationError::EmptyProductName.into());
        }

        let category = self
            .get_category_by_name(category_name)
            .ok_or_else(|| CatalogError::CategoryNotFound(category_name.to_string()))?;

        let missing = category.missing_from(&attributes);
        if !missing.is_empty() {
            return Err(ValidationError::MissingAttributes {
                category: category.name.clone(),
                missing,
            }
            .into());
        }

        let extra = category.extras_in(&attributes);
        let category_name = category.name.clone();
        let product = Product::new(name, category.id.clone(), attributes)?;

        debug!(
            id = %product.id,
            name = %product.name,
            category = %category_name,
            "product created"
        );

        let reported = if extra.is_empty() {
            Reported::clean(product.clone())
        } else {
            let diagnostic = Diagnostic::ExtraAttributes {
                product: product.name.clone(),
                category: category_name,
                attributes: extra,
            };
            warn!("{}", diagnostic);
            Reported::with(product.clone(), diagnostic)
        };

        self.insert_product(product);
        Ok(reported)
    }

    /// Merges new attribute values into an existing product
    ///
    /// Only attributes required by the product's category may be updated,
    /// including for products that were created with extra attributes.
    pub fn update_product(
        &mut self,
        product_id: &ProductId,
        new_attributes: Attributes,
    ) -> Result<Product> {
        let product = self
            .products
            .get(product_id)
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.clone()))?;

        let category = self.categories.get(&product.category_id).ok_or_else(|| {
            CatalogError::DanglingCategory {
                product: product.name.clone(),
                category_id: product.category_id.clone(),
            }
        })?;

        if let Some(unknown) = new_attributes.keys().find(|name| !category.requires(name)) {
            return Err(ValidationError::UnknownAttribute {
                category: category.name.clone(),
                attribute: unknown.clone(),
            }
            .into());
        }

        let product = self
            .products
            .get_mut(product_id)
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.clone()))?;
        product.attributes.merge(new_attributes);

        debug!(id = %product.id, name = %product.name, "product updated");
        Ok(product.clone())
    }

    pub fn get_product_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Returns the category a product belongs to
    pub fn category_of(&self, product: &Product) -> Option<&Category> {
        self.categories.get(&product.category_id)
    }

    /// Lists products, optionally restricted to one category
    ///
    /// An unknown category name does not fail: every product is returned and
    /// an [`Diagnostic::UnknownCategoryFilter`] is attached.
    pub fn list_products(&self, category_name: Option<&str>) -> Reported<Vec<&Product>> {
        let all = || {
            self.product_order
                .iter()
                .filter_map(|id| self.products.get(id))
                .collect::<Vec<_>>()
        };

        let Some(name) = category_name.filter(|name| !name.is_empty()) else {
            return Reported::clean(all());
        };

        match self.get_category_by_name(name) {
            Some(category) => Reported::clean(
                all()
                    .into_iter()
                    .filter(|product| product.category_id == category.id)
                    .collect(),
            ),
            None => {
                let diagnostic = Diagnostic::UnknownCategoryFilter {
                    category: name.to_string(),
                };
                warn!("{}", diagnostic);
                Reported::with(all(), diagnostic)
            }
        }
    }

    // --- Bulk access for persistence ---

    /// Inserts a category as-is. Returns false if the ID is already taken.
    pub(crate) fn insert_category(&mut self, category: Category) -> bool {
        if self.categories.contains_key(&category.id) {
            return false;
        }
        self.category_order.push(category.id.clone());
        self.categories.insert(category.id.clone(), category);
        true
    }

    /// Inserts a product as-is. Returns false if the ID is already taken.
    pub(crate) fn insert_product(&mut self, product: Product) -> bool {
        if self.products.contains_key(&product.id) {
            return false;
        }
        self.product_order.push(product.id.clone());
        self.products.insert(product.id.clone(), product);
        true
    }

    /// Replaces the whole catalog contents
    pub(crate) fn replace_with(&mut self, other: Catalog) {
        *self = other;
    }

    /// Removes everything
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
