//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate holds the two pieces of real logic behind the storefront:
//! resolving a shopper's option choices to a purchasable variant, and
//! aggregating chosen variants into a cart. Everything here is a pure
//! function over caller-supplied data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (presentation)                      │   │
//! │  │    Product Grid ──► Product Modal ──► Cart Dropdown ──► Checkout│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON-lines IPC                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront (commands)                   │   │
//! │  │    list_products, choose_option, add_to_cart, get_cart, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  variant  │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │  Resolver │  │   Cart    │  │  catalog  │  │   │
//! │  │   │  Variant  │  │ Selection │  │ CartLine  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Variant, Price, ...)
//! - [`selection`] - The shopper's partial or complete option choice
//! - [`variant`] - Variant resolution and per-axis availability
//! - [`cart`] - Quantity-merged cart keyed by variant identity
//! - [`money`] - Integer minor-unit arithmetic for cart totals
//! - [`validation`] - Catalog well-formedness checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the resolver holds no state between calls
//! 2. **No I/O**: fetching, rendering and persistence live elsewhere
//! 3. **Integer Money**: totals are summed in cents, never in floats
//! 4. **Outcomes, not errors**: "no match" and "incomplete" are values
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, LineCandidate, Product, Selection};
//!
//! let product: Product = serde_json::from_str(r#"{
//!     "id": "gid://shopify/Product/1",
//!     "title": "Tee",
//!     "options": [{ "name": "Size", "values": ["S", "M"] }],
//!     "variants": [
//!         { "id": "v-s", "availableForSale": true,
//!           "price": { "amount": "10.00", "currencyCode": "USD" },
//!           "selectedOptions": [{ "name": "Size", "value": "S" }] },
//!         { "id": "v-m", "availableForSale": true,
//!           "price": { "amount": "12.50", "currencyCode": "USD" },
//!           "selectedOptions": [{ "name": "Size", "value": "M" }] }
//!     ]
//! }"#).unwrap();
//!
//! let resolver = product.resolver();
//! let choice = resolver.choose("Size", "M", &Selection::new());
//! let variant = choice.resolution.variant().unwrap();
//! assert_eq!(variant.id, "v-m");
//!
//! let mut cart = Cart::new();
//! cart.add_item(LineCandidate::from_variant(&product, variant));
//! cart.add_item(LineCandidate::from_variant(&product, variant));
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total_price(), "25.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod selection;
pub mod types;
pub mod validation;
pub mod variant;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartLine, LineCandidate};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use selection::Selection;
pub use types::*;
pub use variant::{Choice, OptionValueState, Resolution, ResolutionKind, VariantResolver};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency assumed when the catalog does not say otherwise.
pub const DEFAULT_CURRENCY_CODE: &str = "USD";
