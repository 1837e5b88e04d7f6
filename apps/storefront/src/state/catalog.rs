//! # Catalog State
//!
//! The product catalog, loaded once at startup and read-only afterwards.

use storefront_catalog::{Catalog, CatalogResult, CatalogSource, JsonFileCatalog, StaticCatalog};
use storefront_core::Product;
use tracing::info;

use crate::error::ApiError;
use crate::state::ConfigState;

/// Demo catalog used when no catalog path is configured.
const BUNDLED_CATALOG: &str = include_str!("../../fixtures/catalog.json");

/// Read-only catalog shared by all product and cart commands.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState { catalog }
    }

    /// Loads the catalog named by the config, or the bundled demo catalog.
    pub fn load(config: &ConfigState) -> CatalogResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                info!(?path, "Loading catalog from file");
                JsonFileCatalog::new(path).load()?
            }
            None => {
                info!("No catalog path configured, using bundled catalog");
                StaticCatalog::from_json(BUNDLED_CATALOG)?.load()?
            }
        };

        Ok(CatalogState::new(catalog))
    }

    /// The bundled demo catalog.
    pub fn bundled() -> CatalogResult<Self> {
        Ok(CatalogState::new(StaticCatalog::from_json(BUNDLED_CATALOG)?.load()?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up a product by id, falling back to its handle.
    pub fn product(&self, id_or_handle: &str) -> Result<&Product, ApiError> {
        self.catalog
            .find(id_or_handle)
            .or_else(|| self.catalog.find_by_handle(id_or_handle))
            .ok_or_else(|| ApiError::not_found("Product", id_or_handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_bundled_catalog_is_well_formed() {
        let state = CatalogState::bundled().unwrap();
        assert_eq!(state.catalog().len(), 2);
        for product in state.catalog().products() {
            assert!(storefront_core::validation::validate_product(product).is_empty());
        }
    }

    #[test]
    fn test_product_lookup_by_id_or_handle() {
        let state = CatalogState::bundled().unwrap();

        let by_id = state.product("gid://shopify/Product/1001").unwrap();
        let by_handle = state.product("classic-tee").unwrap();
        assert_eq!(by_id.id, by_handle.id);

        let err = state.product("nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_load_without_path_uses_bundled() {
        let state = CatalogState::load(&ConfigState::default()).unwrap();
        assert!(state.catalog().find_by_handle("enamel-mug").is_some());
    }
}
