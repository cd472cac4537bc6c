use crate::models::{AgeRange, Product, ProductCategory};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Catalog bundled with the service, used when no catalog file is configured
const BUILTIN_CATALOG: &str = include_str!("../../catalog/products.json");

/// Errors that can occur while loading the product catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON catalog error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML catalog error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },
}

/// Product fields as stored in a catalog file; the id is the mapping key
#[derive(Debug, Deserialize)]
struct ProductRecord {
    name: String,
    category: ProductCategory,
    price: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(rename = "targetConditions", alias = "target_conditions", default)]
    target_conditions: BTreeSet<String>,
    #[serde(rename = "ageRange", alias = "age_range")]
    age_range: AgeRange,
    #[serde(rename = "usageScenarios", alias = "usage_scenarios", default)]
    usage_scenarios: BTreeSet<String>,
}

impl ProductRecord {
    fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            description: self.description,
            features: self.features,
            target_conditions: self.target_conditions,
            age_range: self.age_range,
            usage_scenarios: self.usage_scenarios,
        }
    }
}

/// Read-only product snapshot
///
/// Iteration order is the order products appear in the source file, which is
/// also the tie-break order for equally scored products.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Arc<Product>>,
}

impl ProductCatalog {
    /// Build a catalog from products, validating each one
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for product in &products {
            validate(product)?;
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::InvalidProduct {
                    id: product.id.clone(),
                    reason: "duplicate id".to_string(),
                });
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
        })
    }

    /// The catalog bundled with the service
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            Some("toml") => Self::from_toml_str(&text)?,
            other => {
                return Err(CatalogError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        tracing::info!("Loaded {} products from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse a JSON object mapping product id to product fields
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let products = entries
            .into_iter()
            .map(|(id, value)| -> Result<Product, CatalogError> {
                let record: ProductRecord = serde_json::from_value(value)?;
                Ok(record.into_product(id))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Self::from_products(products)
    }

    /// Parse a TOML document whose top-level tables are products keyed by id
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let table: toml::Table = toml::from_str(text)?;
        let products = table
            .into_iter()
            .map(|(id, value)| -> Result<Product, CatalogError> {
                let record: ProductRecord = value.try_into()?;
                Ok(record.into_product(id))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Self::from_products(products)
    }

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn validate(product: &Product) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidProduct {
        id: product.id.clone(),
        reason: reason.to_string(),
    };

    if product.id.trim().is_empty() {
        return Err(invalid("empty id"));
    }
    if product.name.trim().is_empty() {
        return Err(invalid("empty name"));
    }
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(invalid("price must be a finite, non-negative number"));
    }
    if product.age_range.min > product.age_range.max {
        return Err(invalid("age range minimum exceeds maximum"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads_in_order() {
        let catalog = ProductCatalog::builtin().unwrap();
        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["prod_001", "prod_002", "prod_003", "prod_004", "prod_005"]);

        let glasses = catalog.get("prod_001").unwrap();
        assert_eq!(glasses.category, ProductCategory::ProtectiveEquipment);
        assert_eq!(glasses.age_range, AgeRange::new(18, 65));
    }

    #[test]
    fn test_toml_catalog() {
        let catalog = ProductCatalog::from_toml_str(
            r#"
            [zeta]
            name = "Warm Compress"
            category = "equipment"
            price = 25.0
            ageRange = { min = 10, max = 90 }

            [alpha]
            name = "Omega-3 Capsules"
            category = "supplements"
            price = 35.5
            targetConditions = ["dry_eye"]
            ageRange = [18, 99]
            "#,
        )
        .unwrap();

        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert!(catalog.get("alpha").unwrap().target_conditions.contains("dry_eye"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = ProductCatalog::from_json_str(
            r#"{"bad": {"name": "Bad", "category": "equipment", "price": -1, "ageRange": [0, 10]}}"#,
        );
        assert!(matches!(result, Err(CatalogError::InvalidProduct { .. })));
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let result = ProductCatalog::from_json_str(
            r#"{"bad": {"name": "Bad", "category": "equipment", "price": 1, "ageRange": [60, 10]}}"#,
        );
        assert!(matches!(result, Err(CatalogError::InvalidProduct { .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ProductCatalog::load("catalog/products.yaml");
        assert!(result.is_err());
    }
}
