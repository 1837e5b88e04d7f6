//! # Cart Commands
//!
//! Cart manipulation for the current session.
//!
//! ## Add-to-Cart Coordination
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    add_to_cart                                          │
//! │                                                                         │
//! │  1. Look up product, resolve variant (id or full selection)            │
//! │  2. Reject if not matched or not availableForSale                      │
//! │  3. Snapshot a LineCandidate                                           │
//! │  4. Await the processing delay  ◄── dropping the future here           │
//! │                                     leaves the cart untouched          │
//! │  5. Cart::add_item, exactly once, as the final synchronous step        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use storefront_core::validation::validate_variant_id;
use storefront_core::{AddOutcome, Cart, CartLine, LineCandidate, Resolution, Selection};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    /// Two-decimal total, e.g. `"25.50"`.
    pub total_price: String,
    /// Total with the configured currency symbol.
    pub formatted_total: String,
    /// Lines are priced in more than one currency.
    pub mixed_currency: bool,
}

impl CartResponse {
    pub fn build(cart: &Cart, config: &ConfigState) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total_price: cart.total_price(),
            formatted_total: config.format_price(&cart.total()),
            mixed_currency: cart.has_mixed_currencies(),
        }
    }
}

/// Response of a successful add.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    pub outcome: AddOutcome,
    pub cart: CartResponse,
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::build(c, config))
}

/// Adds one unit of a resolved variant to the cart.
///
/// ## Arguments
/// * `product_id` - Product id or handle
/// * `variant_id` - Variant to add; when absent, `selection` must resolve
/// * `selection` - Full option selection
///
/// ## Errors
/// - `NOT_FOUND`: unknown product or variant
/// - `VALIDATION_ERROR`: selection still missing options
/// - `UNAVAILABLE`: combination not stocked, or not available for sale
pub async fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    product_id: &str,
    variant_id: Option<&str>,
    selection: &Selection,
) -> Result<AddToCartResponse, ApiError> {
    debug!(
        product_id = %product_id,
        variant_id = ?variant_id,
        "add_to_cart command"
    );

    let product = catalog.product(product_id)?;

    let variant = match variant_id {
        Some(id) => product.require_variant(validate_variant_id(id)?)?,
        None => match product.resolver().resolve(selection) {
            Resolution::Matched(variant) => variant,
            Resolution::Incomplete { missing } => {
                return Err(ApiError::validation(format!(
                    "Select a value for: {}",
                    missing.join(", ")
                )))
            }
            Resolution::NoMatch => {
                return Err(ApiError::unavailable(
                    "This combination is not available",
                ))
            }
        },
    };

    if !variant.available_for_sale {
        return Err(ApiError::unavailable(format!(
            "{} is sold out",
            variant.title.as_deref().unwrap_or(&product.title)
        )));
    }

    let candidate = LineCandidate::from_variant(product, variant);
    if let Err(e) = candidate.price.to_money() {
        warn!(variant_id = %candidate.variant_id, error = %e, "Adding line with unparseable price");
    }

    tokio::time::sleep(config.add_delay()).await;

    // Single synchronous step after the last await point
    let (outcome, response) = cart.with_cart_mut(|c| {
        let outcome = c.add_item(candidate);
        (outcome, CartResponse::build(c, config))
    });

    info!(
        session_id = %cart.session_id(),
        product_id = %product.id,
        variant_id = %variant.id,
        ?outcome,
        item_count = response.item_count,
        "Added to cart"
    );

    Ok(AddToCartResponse {
        outcome,
        cart: response,
    })
}

/// Removes a line from the cart.
///
/// Removing a variant that is not in the cart is not an error.
pub fn remove_from_cart(
    cart: &CartState,
    config: &ConfigState,
    variant_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(variant_id = %variant_id, "remove_from_cart command");
    validate_variant_id(variant_id)?;

    Ok(cart.with_cart_mut(|c| {
        if !c.remove_item(variant_id) {
            debug!(variant_id = %variant_id, "Variant not in cart, nothing removed");
        }
        CartResponse::build(c, config)
    }))
}

/// Clears all lines from the cart.
pub fn clear_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::build(c, config)
    })
}

// =============================================================================
// Argument Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartArgs {
    pub product_id: String,
    #[serde(default)]
    pub variant_id: Option<String>,
    #[serde(default)]
    pub selection: Selection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartArgs {
    pub variant_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::time::Duration;

    const TEE: &str = "classic-tee";
    const RED_M: &str = "gid://shopify/ProductVariant/2002";
    const MUG: &str = "gid://shopify/ProductVariant/3001";

    fn setup() -> (CatalogState, CartState, ConfigState) {
        (
            CatalogState::bundled().unwrap(),
            CartState::new(),
            ConfigState::default(),
        )
    }

    fn select(pairs: &[(&str, &str)]) -> Selection {
        pairs.iter().copied().collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_by_selection_then_merge() {
        let (catalog, cart, config) = setup();
        let selection = select(&[("Color", "Red"), ("Size", "M")]);

        let first = add_to_cart(&catalog, &cart, &config, TEE, None, &selection)
            .await
            .unwrap();
        assert_eq!(first.outcome, AddOutcome::Inserted);

        let second = add_to_cart(&catalog, &cart, &config, TEE, Some(RED_M), &Selection::new())
            .await
            .unwrap();
        assert_eq!(second.outcome, AddOutcome::Incremented { quantity: 2 });
        assert_eq!(second.cart.lines.len(), 1);
        assert_eq!(second.cart.item_count, 2);
        assert_eq!(second.cart.total_price, "20.00");
        assert_eq!(second.cart.formatted_total, "$20.00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_waits_for_delay() {
        let (catalog, cart, config) = setup();
        let started = tokio::time::Instant::now();

        add_to_cart(&catalog, &cart, &config, "enamel-mug", Some(MUG), &Selection::new())
            .await
            .unwrap();

        assert!(started.elapsed() >= config.add_delay());
        assert_eq!(cart.with_cart(|c| c.item_count()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_add_leaves_cart_untouched() {
        let (catalog, cart, config) = setup();
        let empty = Selection::new();

        let add = add_to_cart(&catalog, &cart, &config, "enamel-mug", Some(MUG), &empty);
        let result = tokio::time::timeout(Duration::from_millis(100), add).await;

        assert!(result.is_err());
        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_rejections() {
        let (catalog, cart, config) = setup();

        let incomplete = add_to_cart(&catalog, &cart, &config, TEE, None, &select(&[("Color", "Red")]))
            .await
            .unwrap_err();
        assert_eq!(incomplete.code, ErrorCode::ValidationError);
        assert_eq!(incomplete.message, "Select a value for: Size");

        let no_match = add_to_cart(
            &catalog,
            &cart,
            &config,
            TEE,
            None,
            &select(&[("Color", "Blue"), ("Size", "S")]),
        )
        .await
        .unwrap_err();
        assert_eq!(no_match.code, ErrorCode::Unavailable);

        let sold_out = add_to_cart(
            &catalog,
            &cart,
            &config,
            TEE,
            None,
            &select(&[("Color", "Blue"), ("Size", "M")]),
        )
        .await
        .unwrap_err();
        assert_eq!(sold_out.code, ErrorCode::Unavailable);
        assert_eq!(sold_out.message, "Blue / M is sold out");

        let unknown = add_to_cart(&catalog, &cart, &config, TEE, Some("nope"), &Selection::new())
            .await
            .unwrap_err();
        assert_eq!(unknown.code, ErrorCode::NotFound);

        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_and_clear() {
        let (catalog, cart, config) = setup();
        add_to_cart(&catalog, &cart, &config, TEE, Some(RED_M), &Selection::new())
            .await
            .unwrap();
        add_to_cart(&catalog, &cart, &config, "enamel-mug", Some(MUG), &Selection::new())
            .await
            .unwrap();

        let after_remove = remove_from_cart(&cart, &config, RED_M).unwrap();
        assert_eq!(after_remove.item_count, 1);
        assert_eq!(after_remove.total_price, "5.50");

        // Second removal is a no-op, not an error
        let again = remove_from_cart(&cart, &config, RED_M).unwrap();
        assert_eq!(again.item_count, 1);

        assert_eq!(
            remove_from_cart(&cart, &config, "").unwrap_err().code,
            ErrorCode::ValidationError
        );

        let cleared = clear_cart(&cart, &config);
        assert_eq!(cleared.item_count, 0);
        assert_eq!(cleared.total_price, "0.00");
        assert_eq!(get_cart(&cart, &config).lines.len(), 0);
    }
}
