//! # storefront-catalog: Catalog Decoding for the Storefront
//!
//! Decodes product payloads shaped like the Storefront API `getProducts`
//! query into [`storefront_core::Product`] values and serves them as a
//! read-only [`Catalog`].
//!
//! ## Modules
//!
//! - [`wire`] - Serde mirrors of the GraphQL response, edge flattening
//! - [`catalog`] - `Catalog`, the `CatalogSource` trait and its sources
//! - [`error`] - Catalog error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_catalog::{CatalogSource, StaticCatalog};
//!
//! let source = StaticCatalog::from_json(r#"{ "products": [
//!     { "id": "p1", "title": "Mug", "handle": "mug" }
//! ] }"#).unwrap();
//!
//! let catalog = source.load().unwrap();
//! assert_eq!(catalog.find_by_handle("mug").unwrap().id, "p1");
//! ```

pub mod catalog;
pub mod error;
pub mod wire;

pub use catalog::{Catalog, CatalogSource, JsonFileCatalog, StaticCatalog};
pub use error::{CatalogError, CatalogResult};
pub use wire::decode_products;
