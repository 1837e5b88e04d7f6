//! # Wire Format
//!
//! Serde mirrors of the Storefront API `getProducts` response.
//!
//! ## Payload Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  { "data": {                          ◄── envelope (optional)          │
//! │      "products": {                                                      │
//! │        "edges": [ { "node": {                                           │
//! │            "id", "title", "handle", "description",                      │
//! │            "options":  [ { id, name, values } ],                        │
//! │            "variants": { "edges": [ { "node": Variant } ] },           │
//! │            "priceRange": { "minVariantPrice": { amount, currencyCode }},│
//! │            "featuredImage": { url, altText },                           │
//! │            "images":   { "edges": [ { "node": Image } ] }              │
//! │        } } ]                                                            │
//! │      } },                                                               │
//! │    "errors": [ { "message" } ]        ◄── GraphQL failures             │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every connection may also arrive already flattened to a plain array,
//! which is how cached or hand-written fixtures usually look.

use serde::Deserialize;
use storefront_core::{Image, PriceRange, Product, ProductOption, Variant};

use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Connections
// =============================================================================

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Connection<T> {
    #[serde(default)]
    edges: Vec<Edge<T>>,
}

/// A GraphQL connection or an already flattened list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeList<T> {
    Connection(Connection<T>),
    Flat(Vec<T>),
}

impl<T> NodeList<T> {
    fn into_nodes(self) -> Vec<T> {
        match self {
            NodeList::Connection(c) => c.edges.into_iter().map(|e| e.node).collect(),
            NodeList::Flat(nodes) => nodes,
        }
    }
}

fn flatten<T>(list: Option<NodeList<T>>) -> Vec<T> {
    list.map(NodeList::into_nodes).unwrap_or_default()
}

// =============================================================================
// Product Node
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    id: String,
    title: String,
    #[serde(default)]
    handle: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    options: Option<Vec<ProductOption>>,
    #[serde(default)]
    variants: Option<NodeList<Variant>>,
    #[serde(default)]
    price_range: Option<PriceRange>,
    #[serde(default)]
    featured_image: Option<Image>,
    #[serde(default)]
    images: Option<NodeList<Image>>,
}

impl From<ProductNode> for Product {
    fn from(node: ProductNode) -> Self {
        Product {
            id: node.id,
            title: node.title,
            handle: node.handle,
            description: node.description,
            options: node.options.unwrap_or_default(),
            variants: flatten(node.variants),
            price_range: node.price_range,
            featured_image: node.featured_image,
            images: flatten(node.images),
        }
    }
}

// =============================================================================
// Envelope
// =============================================================================

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(default)]
    products: Option<NodeList<ProductNode>>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Data>,
    #[serde(default)]
    products: Option<NodeList<ProductNode>>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

/// Decodes a products payload into core products.
///
/// ## Accepted Inputs
/// - A full GraphQL response: `{ "data": { "products": ... } }`
/// - A bare object: `{ "products": ... }`
///
/// A non-empty `errors` array fails with [`CatalogError::Graphql`] even
/// when partial data is present. Product order is kept.
pub fn decode_products(json: &str) -> CatalogResult<Vec<Product>> {
    let envelope: Envelope = serde_json::from_str(json)?;

    if !envelope.errors.is_empty() {
        return Err(CatalogError::Graphql(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    let products = envelope
        .data
        .and_then(|d| d.products)
        .or(envelope.products)
        .ok_or(CatalogError::MissingProducts)?;

    Ok(products.into_nodes().into_iter().map(Product::from).collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
