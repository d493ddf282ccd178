//! JSON snapshot of the whole catalog
//!
//! The catalog is stored as a single pretty-printed JSON document:
//!
//! ```text
//! {
//!     "categories": [ { "id", "name", "attributes": [sorted names] } ],
//!     "products":   [ { "id", "name", "category_id", "attributes": { name: value } } ]
//! }
//! ```
//!
//! Saving rewrites the whole file (temp file + rename). Loading replaces the
//! whole catalog.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    Attributes, Catalog, CatalogError, Category, CategoryId, PersistenceError, Product, ProductId,
    ValidationError,
};

/// Default data file name
pub const DEFAULT_DATA_FILE: &str = "catalog_data.json";

/// How [`Catalog::load_data_with`] treats a file that exists but cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Fall back to an empty catalog and report the problem in the outcome
    #[default]
    Lenient,
    /// Return an error and leave the catalog untouched
    Strict,
}

/// What happened during a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read and replaced the catalog
    Loaded { categories: usize, products: usize },
    /// No file at the path; the catalog is now empty
    Missing,
    /// The file is not a valid catalog; the catalog is now empty
    Malformed(String),
    /// The file could not be read; the catalog is now empty
    Unreadable(String),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

impl std::fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadOutcome::Loaded {
                categories,
                products,
            } => write!(f, "loaded {} categories and {} products", categories, products),
            LoadOutcome::Missing => write!(f, "file not found, starting with an empty catalog"),
            LoadOutcome::Malformed(reason) => write!(
                f,
                "malformed catalog data ({}), starting with an empty catalog",
                reason
            ),
            LoadOutcome::Unreadable(reason) => write!(
                f,
                "could not read catalog data ({}), starting with an empty catalog",
                reason
            ),
        }
    }
}

/// Why a data file's content is not a usable catalog
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("duplicate category id '{0}'")]
    DuplicateCategory(CategoryId),

    #[error("duplicate product id '{0}'")]
    DuplicateProduct(ProductId),
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    categories: Vec<&'a Category>,
    products: Vec<&'a Product>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    categories: Vec<RawCategory>,
    #[serde(default)]
    products: Vec<RawProduct>,
}

#[derive(Deserialize)]
struct RawCategory {
    id: CategoryId,
    name: String,
    attributes: Vec<String>,
}

#[derive(Deserialize)]
struct RawProduct {
    id: ProductId,
    name: String,
    category_id: CategoryId,
    #[serde(deserialize_with = "scalar_attributes")]
    attributes: Attributes,
}

/// Reads attribute values, accepting any JSON scalar in its string form
fn scalar_attributes<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(name, value)| match value {
            Value::String(text) => Ok((name, text)),
            Value::Number(_) | Value::Bool(_) | Value::Null => Ok((name, value.to_string())),
            Value::Array(_) | Value::Object(_) => Err(de::Error::custom(format!(
                "attribute '{}' must be a scalar value, found {}",
                name,
                json_kind(&value)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serializes a catalog to its on-disk JSON form (four-space indent)
pub fn encode(catalog: &Catalog) -> Result<String, serde_json::Error> {
    let snapshot = SnapshotRef {
        categories: catalog.list_categories(),
        products: catalog.list_products(None).into_value(),
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    snapshot.serialize(&mut serializer)?;
    buf.push(b'\n');

    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

/// Parses catalog JSON, re-validating every record
pub fn decode(content: &str) -> Result<Catalog, DecodeError> {
    let value: Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject(json_kind(&value)));
    }

    let raw = RawSnapshot::deserialize(value)?;
    let mut catalog = Catalog::new();

    for record in raw.categories {
        let category = Category::with_id(record.id, record.name, record.attributes)?;
        let id = category.id.clone();
        if !catalog.insert_category(category) {
            return Err(DecodeError::DuplicateCategory(id));
        }
    }

    for record in raw.products {
        let product =
            Product::with_id(record.id, record.name, record.category_id, record.attributes)?;
        let id = product.id.clone();
        if !catalog.insert_product(product) {
            return Err(DecodeError::DuplicateProduct(id));
        }
    }

    Ok(catalog)
}

/// A catalog data file on disk
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Reads the catalog; `Ok(None)` if the file does not exist
    pub fn read(&self) -> Result<Option<Catalog>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        decode(&content)
            .map(Some)
            .map_err(|e| PersistenceError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    /// Writes the whole catalog, replacing any existing file
    pub fn write(&self, catalog: &Catalog) -> Result<(), PersistenceError> {
        let content = encode(catalog)?;
        let write_err = |source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Write to a sibling temp file, then atomic rename
        let temp_path = self.temp_path();
        let result = write_temp(&temp_path, content.as_bytes())
            .and_then(|()| fs::rename(&temp_path, &self.path));

        if let Err(source) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(source));
        }

        Ok(())
    }
}

fn write_temp(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    file.flush()
}

impl Catalog {
    /// Saves the catalog to `path`, overwriting it
    pub fn save_data(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let file = CatalogFile::new(path.as_ref());
        file.write(self)?;
        debug!(
            path = %file.path().display(),
            categories = self.category_count(),
            products = self.product_count(),
            "catalog saved"
        );
        Ok(())
    }

    /// Replaces the catalog with the contents of `path`
    ///
    /// Never fails: a missing, malformed or unreadable file leaves an empty
    /// catalog and is described by the returned outcome.
    pub fn load_data(&mut self, path: impl AsRef<Path>) -> LoadOutcome {
        let file = CatalogFile::new(path.as_ref());
        let outcome = match file.read() {
            Ok(Some(loaded)) => {
                let outcome = LoadOutcome::Loaded {
                    categories: loaded.category_count(),
                    products: loaded.product_count(),
                };
                self.replace_with(loaded);
                outcome
            }
            Ok(None) => {
                self.clear();
                LoadOutcome::Missing
            }
            Err(PersistenceError::Malformed { reason, .. }) => {
                self.clear();
                LoadOutcome::Malformed(reason)
            }
            Err(e) => {
                self.clear();
                LoadOutcome::Unreadable(e.to_string())
            }
        };

        match &outcome {
            LoadOutcome::Loaded { .. } | LoadOutcome::Missing => {
                debug!(path = %file.path().display(), "{}", outcome)
            }
            _ => warn!(path = %file.path().display(), "{}", outcome),
        }

        outcome
    }

    /// Like [`Catalog::load_data`], but a strict policy turns malformed or
    /// unreadable files into errors
    ///
    /// A missing file is never an error.
    pub fn load_data_with(
        &mut self,
        path: impl AsRef<Path>,
        policy: LoadPolicy,
    ) -> Result<LoadOutcome, CatalogError> {
        match policy {
            LoadPolicy::Lenient => Ok(self.load_data(path)),
            LoadPolicy::Strict => {
                let file = CatalogFile::new(path.as_ref());
                match file.read()? {
                    Some(loaded) => {
                        let outcome = LoadOutcome::Loaded {
                            categories: loaded.category_count(),
                            products: loaded.product_count(),
                        };
                        self.replace_with(loaded);
                        debug!(path = %file.path().display(), "{}", outcome);
                        Ok(outcome)
                    }
                    None => {
                        self.clear();
                        Ok(LoadOutcome::Missing)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.define_category("Phones", ["RAM", "OS"]).unwrap();
        catalog.define_category("Watches", ["Strap"]).unwrap();
        catalog
            .create_product("Pixel", "Phones", attrs(&[("OS", "Android"), ("RAM", "8GB")]))
            .unwrap();
        catalog
            .create_product(
                "Fenix",
                "Watches",
                attrs(&[("Strap", "Silicone"), ("Color", "Slate")]),
            )
            .unwrap();
        catalog
    }

    fn assert_same(a: &Catalog, b: &Catalog) {
        assert_eq!(a.list_categories(), b.list_categories());
        assert_eq!(a.list_products(None).value, b.list_products(None).value);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_DATA_FILE);
        let catalog = sample_catalog();

        catalog.save_data(&path).unwrap();

        let mut loaded = Catalog::new();
        let outcome = loaded.load_data(&path);

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                categories: 2,
                products: 2
            }
        );
        assert_same(&catalog, &loaded);
    }

    #[test]
    fn repeated_save_is_stable() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");

        sample_catalog().save_data(&first).unwrap();

        let mut loaded = Catalog::new();
        assert!(loaded.load_data(&first).is_loaded());
        loaded.save_data(&second).unwrap();

        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            fs::read_to_string(&second).unwrap()
        );
    }

    #[test]
    fn file_layout_matches_format() {
        let catalog = sample_catalog();
        let json: serde_json::Value = serde_json::from_str(&encode(&catalog).unwrap()).unwrap();

        let phones = &json["categories"][0];
        assert_eq!(phones["name"], "Phones");
        assert_eq!(phones["attributes"], serde_json::json!(["OS", "RAM"]));
        assert!(phones["id"].is_string());

        let pixel = &json["products"][0];
        assert_eq!(pixel["name"], "Pixel");
        assert_eq!(pixel["category_id"], phones["id"]);
        assert_eq!(
            pixel["attributes"],
            serde_json::json!({"OS": "Android", "RAM": "8GB"})
        );
    }

    #[test]
    fn output_is_pretty_printed() {
        let content = encode(&sample_catalog()).unwrap();
        assert!(content.starts_with("{\n    \"categories\": ["));
    }

    #[test]
    fn missing_file_gives_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let mut catalog = sample_catalog();

        let outcome = catalog.load_data(dir.path().join("nope.json"));

        assert_eq!(outcome, LoadOutcome::Missing);
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_file_gives_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let mut catalog = sample_catalog();
        let outcome = catalog.load_data(&path);

        assert!(matches!(outcome, LoadOutcome::Malformed(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn invalid_record_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(
            &path,
            r#"{"categories": [{"id": "c1", "name": "", "attributes": []}], "products": []}"#,
        )
        .unwrap();

        let mut catalog = Catalog::new();
        let outcome = catalog.load_data(&path);
        assert_eq!(
            outcome,
            LoadOutcome::Malformed("Category name cannot be empty".to_string())
        );
    }

    #[test]
    fn duplicate_ids_are_malformed() {
        let content = r#"{
            "categories": [
                {"id": "c1", "name": "Phones", "attributes": ["OS"]},
                {"id": "c1", "name": "Tablets", "attributes": ["OS"]}
            ]
        }"#;
        let err = decode(content).unwrap_err();
        assert!(matches!(err, DecodeError::DuplicateCategory(_)));
        assert_eq!(err.to_string(), "duplicate category id 'c1'");
    }

    #[test]
    fn top_level_must_be_an_object() {
        for content in ["[]", "[[], []]", "42", "\"catalog\"", "null"] {
            let err = decode(content).unwrap_err();
            assert!(matches!(err, DecodeError::NotAnObject(_)), "{content}");
        }
    }

    #[test]
    fn top_level_array_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("array.json");
        fs::write(&path, "[]").unwrap();

        let mut catalog = sample_catalog();
        let outcome = catalog.load_data(&path);

        assert_eq!(
            outcome,
            LoadOutcome::Malformed(
                "expected a JSON object at the top level, found an array".to_string()
            )
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn scalar_attribute_values_load_as_text() {
        let content = r#"{
            "categories": [{"id": "c1", "name": "Phones", "attributes": ["RAM", "5G", "Notes"]}],
            "products": [{"id": "p1", "name": "Pixel", "category_id": "c1",
                          "attributes": {"RAM": 8, "5G": true, "Notes": null}}]
        }"#;
        let catalog = decode(content).unwrap();

        let product = catalog.get_product_by_id(&"p1".parse().unwrap()).unwrap();
        assert_eq!(product.attributes.get("RAM"), Some("8"));
        assert_eq!(product.attributes.get("5G"), Some("true"));
        assert_eq!(product.attributes.get("Notes"), Some("null"));
    }

    #[test]
    fn nested_attribute_value_is_malformed() {
        let content = r#"{
            "categories": [{"id": "c1", "name": "Phones", "attributes": ["RAM"]}],
            "products": [{"id": "p1", "name": "Pixel", "category_id": "c1",
                          "attributes": {"RAM": [8, 12]}}]
        }"#;
        let err = decode(content).unwrap_err();
        assert!(err
            .to_string()
            .contains("attribute 'RAM' must be a scalar value, found an array"));
    }

    #[test]
    fn loaded_ids_are_not_trimmed() {
        let content = r#"{
            "categories": [
                {"id": "c1", "name": "Phones", "attributes": []},
                {"id": " c1", "name": "Tablets", "attributes": []}
            ]
        }"#;
        let catalog = decode(content).unwrap();

        let ids: Vec<&str> = catalog
            .list_categories()
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c1", " c1"]);
    }

    #[test]
    fn unreadable_path_gives_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let mut catalog = sample_catalog();

        // A directory exists but cannot be read as a file
        let outcome = catalog.load_data(dir.path());

        assert!(matches!(outcome, LoadOutcome::Unreadable(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn strict_policy_reports_unreadable_path() {
        let dir = TempDir::new().unwrap();
        let mut catalog = sample_catalog();

        let err = catalog
            .load_data_with(dir.path(), LoadPolicy::Strict)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(catalog.category_count(), 2);
        assert_eq!(catalog.product_count(), 2);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let catalog = decode("{}").unwrap();
        assert!(catalog.is_empty());

        let catalog =
            decode(r#"{"categories": [{"id": "c1", "name": "Phones", "attributes": ["OS"]}]}"#)
                .unwrap();
        assert_eq!(catalog.category_count(), 1);
        assert_eq!(catalog.product_count(), 0);
    }

    #[test]
    fn loaded_ids_are_preserved() {
        let content = r#"{
            "categories": [{"id": "c1", "name": "Phones", "attributes": ["RAM", "OS"]}],
            "products": [{"id": "p1", "name": "Pixel", "category_id": "c1",
                          "attributes": {"OS": "Android", "RAM": "8GB"}}]
        }"#;
        let mut catalog = decode(content).unwrap();

        let product_id: ProductId = "p1".parse().unwrap();
        let updated = catalog
            .update_product(&product_id, attrs(&[("RAM", "12GB")]))
            .unwrap();
        assert_eq!(updated.category_id.as_str(), "c1");
        assert_eq!(updated.attributes.get("RAM"), Some("12GB"));
    }

    #[test]
    fn strict_policy_reports_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[]").unwrap();

        let mut catalog = sample_catalog();
        let err = catalog
            .load_data_with(&path, LoadPolicy::Strict)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(catalog.category_count(), 2);
    }

    #[test]
    fn strict_policy_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut catalog = sample_catalog();

        let outcome = catalog
            .load_data_with(dir.path().join("nope.json"), LoadPolicy::Strict)
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Missing);
        assert!(catalog.is_empty());
    }

    #[test]
    fn lenient_policy_matches_load_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let mut catalog = sample_catalog();
        let outcome = catalog.load_data_with(&path, LoadPolicy::Lenient).unwrap();

        assert!(matches!(outcome, LoadOutcome::Malformed(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dir").join("catalog.json");

        sample_catalog().save_data(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let file = CatalogFile::new(dir.path().join(DEFAULT_DATA_FILE));

        file.write(&sample_catalog()).unwrap();

        // Temp file should not exist after write
        assert!(!file.temp_path().exists());
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join(DEFAULT_DATA_FILE);
        // Renaming a file over a non-empty directory fails
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        let file = CatalogFile::new(&target);

        let err = file.write(&sample_catalog()).unwrap_err();

        assert!(matches!(err, PersistenceError::Write { .. }));
        assert!(!file.temp_path().exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_DATA_FILE);

        sample_catalog().save_data(&path).unwrap();
        Catalog::new().save_data(&path).unwrap();

        let mut loaded = sample_catalog();
        assert!(loaded.load_data(&path).is_loaded());
        assert!(loaded.is_empty());
    }

    fn name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9 ]{0,8}"
    }

    proptest! {
        #[test]
        fn roundtrip_preserves_catalog(
            categories in prop::collection::vec(
                (name(), prop::collection::btree_set(name(), 0..4)),
                1..4,
            ),
            products in prop::collection::vec((name(), any::<prop::sample::Index>(), name()), 0..6),
        ) {
            let mut catalog = Catalog::new();
            for (i, (category, required)) in categories.iter().enumerate() {
                // Suffix keeps names unique regardless of case
                let unique = format!("{category}#{i}");
                catalog.define_category(&unique, required.iter().cloned()).unwrap();
            }

            let defined: Vec<Category> = catalog.list_categories().into_iter().cloned().collect();
            for (product, pick, value) in &products {
                let category = pick.get(&defined);
                let values: Attributes = category
                    .attributes
                    .iter()
                    .map(|attr| (attr.clone(), value.clone()))
                    .collect();
                catalog.create_product(product, &category.name, values).unwrap();
            }

            let encoded = encode(&catalog).unwrap();
            let decoded = decode(&encoded).unwrap();

            prop_assert_eq!(catalog.list_categories(), decoded.list_categories());
            prop_assert_eq!(catalog.list_products(None).value, decoded.list_products(None).value);
            prop_assert_eq!(encode(&decoded).unwrap(), encoded);
        }
    }
}
