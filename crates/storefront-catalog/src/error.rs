//! # Catalog Error Types
//!
//! Error types for loading and decoding catalog payloads.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Source      │  │     Decode      │  │       Backend           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  Decode         │  │  Graphql                │ │
//! │  │  (file missing, │  │  (bad JSON,     │  │  (errors array in the   │ │
//! │  │   unreadable)   │  │   wrong shape)  │  │   response envelope)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog loading failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid JSON or does not have the products shape.
    #[error("Failed to decode catalog: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload is a GraphQL response carrying errors instead of data.
    #[error("Catalog backend returned errors: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// The envelope has neither `data.products` nor `products`.
    #[error("Catalog payload has no products")]
    MissingProducts,
}
