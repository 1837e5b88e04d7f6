//! # Catalog
//!
//! The read-only product list a session browses, plus the sources that
//! produce it.
//!
//! ## Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CatalogSource                                   │
//! │                                                                         │
//! │   JsonFileCatalog ── reads a getProducts payload from disk             │
//! │   StaticCatalog   ── wraps products already in memory (tests, demos)   │
//! │                                                                         │
//! │   load() ──► Catalog::new(products)                                    │
//! │               ├── validate_product() per product                       │
//! │               └── warn! per problem; the product is kept               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use storefront_core::validation::validate_product;
use storefront_core::Product;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::wire::decode_products;

// =============================================================================
// Catalog
// =============================================================================

/// Products in backend order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, logging any malformed product data.
    ///
    /// Malformed products are kept: the resolver never matches a broken
    /// variant, so serving them is safe.
    pub fn new(products: Vec<Product>) -> Self {
        let mut problem_count = 0usize;

        for product in &products {
            for problem in validate_product(product) {
                problem_count += 1;
                warn!(product_id = %product.id, %problem, "Malformed catalog data");
            }
        }

        info!(
            products = products.len(),
            problems = problem_count,
            "Catalog loaded"
        );

        Catalog { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn find_by_handle(&self, handle: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Something that can produce a catalog.
///
/// Network-backed sources live outside this workspace and implement this
/// trait over whatever client they use.
pub trait CatalogSource {
    fn load(&self) -> CatalogResult<Catalog>;
}

/// Reads a products payload from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileCatalog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> CatalogResult<Catalog> {
        debug!(path = ?self.path, "Reading catalog file");

        let contents = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(Catalog::new(decode_products(&contents)?))
    }
}

/// Serves products that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        StaticCatalog { products }
    }

    /// Decodes a payload up front; see [`decode_products`].
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Ok(StaticCatalog::new(decode_products(json)?))
    }
}

impl CatalogSource for StaticCatalog {
    fn load(&self) -> CatalogResult<Catalog> {
        Ok(Catalog::new(self.products.clone()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "products": [
            { "id": "p1", "title": "Mug", "handle": "mug",
              "options": [{ "name": "Size", "values": ["S"] }],
              "variants": [
                { "id": "v1", "availableForSale": true,
                  "price": { "amount": "8.00", "currencyCode": "USD" },
                  "selectedOptions": [{ "name": "Size", "value": "S" }] }
              ] },
            { "id": "p2", "title": "Broken", "handle": "broken",
              "options": [{ "name": "Size", "values": ["S"] }],
              "variants": [
                { "id": "v2", "availableForSale": true,
                  "price": { "amount": "??", "currencyCode": "USD" },
                  "selectedOptions": [] }
              ] }
        ]
    }"#;

    #[test]
    fn test_lookups() {
        let catalog = StaticCatalog::from_json(PAYLOAD).unwrap().load().unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("p1").unwrap().title, "Mug");
        assert_eq!(catalog.find_by_handle("broken").unwrap().id, "p2");
        assert!(catalog.find("p3").is_none());
    }

    #[test]
    fn test_malformed_products_are_kept() {
        let catalog = StaticCatalog::from_json(PAYLOAD).unwrap().load().unwrap();
        let broken = catalog.find("p2").unwrap();
        assert_eq!(broken.variants.len(), 1);
    }

    #[test]
    fn test_json_file_catalog() {
        let path = std::env::temp_dir().join(format!(
            "storefront-catalog-test-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, PAYLOAD).unwrap();

        let catalog = JsonFileCatalog::new(&path).load().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.products()[0].id, "p1");
    }

    #[test]
    fn test_json_file_catalog_missing_file() {
        let source = JsonFileCatalog::new("/nonexistent/storefront/catalog.json");
        match source.load() {
            Err(CatalogError::Io { path, .. }) => assert_eq!(path, source.path()),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
