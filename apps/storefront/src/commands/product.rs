//! # Product Commands
//!
//! Catalog browsing and variant selection.
//!
//! ## Selection Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Modal Flow                                   │
//! │                                                                         │
//! │  list_products ──► grid of summaries                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  get_product ──► options with every value + availability flags         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  choose_option(Color = Red, selection)                                 │
//! │       ├── new selection (previous one untouched)                       │
//! │       ├── resolution: matched | no_match | incomplete                  │
//! │       └── refreshed availability for every option                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  matched + availableForSale ──► "Add to cart" enabled                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use storefront_core::{
    Image, OptionValueState, Price, Product, Resolution, ResolutionKind, Selection, Variant,
    VariantResolver,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;

// =============================================================================
// Response Types
// =============================================================================

/// One card in the product grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub price: Option<Price>,
    pub image: Option<Image>,
    /// At least one variant can be bought.
    pub purchasable: bool,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        ProductSummary {
            id: p.id.clone(),
            handle: p.handle.clone(),
            title: p.title.clone(),
            price: p.display_price(None).cloned(),
            image: p.display_image(None).cloned(),
            purchasable: p.is_purchasable(),
        }
    }
}

/// An option axis with the render state of each value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub name: String,
    pub values: Vec<OptionValueState>,
}

/// Full product for the modal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub product: Product,
    pub options: Vec<OptionView>,
    /// First declared variant; callers may preselect it.
    pub initial_variant_id: Option<String>,
    pub initial_selection: Selection,
}

/// Outcome of a selection change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub selection: Selection,
    pub resolution: ResolutionKind,
    pub variant: Option<Variant>,
    /// Options still without a value, in declaration order.
    pub missing: Vec<String>,
    /// The matched variant's price, else the product's fallback price.
    pub price: Option<Price>,
    pub image: Option<Image>,
    /// Matched and purchasable.
    pub can_add_to_cart: bool,
    pub options: Vec<OptionView>,
}

impl SelectionView {
    fn build(product: &Product, selection: Selection, resolution: Resolution<'_>) -> Self {
        let variant = resolution.variant();
        let missing = match &resolution {
            Resolution::Incomplete { missing } => missing.clone(),
            _ => Vec::new(),
        };

        SelectionView {
            options: option_views(product.resolver(), &selection),
            resolution: resolution.kind(),
            price: product.display_price(variant).cloned(),
            image: product.display_image(variant).cloned(),
            can_add_to_cart: variant.is_some_and(|v| v.available_for_sale),
            variant: variant.cloned(),
            missing,
            selection,
        }
    }
}

fn option_views(resolver: VariantResolver<'_>, selection: &Selection) -> Vec<OptionView> {
    resolver
        .options()
        .iter()
        .map(|option| OptionView {
            name: option.name.clone(),
            values: resolver.option_states(&option.name, selection),
        })
        .collect()
}

// =============================================================================
// Commands
// =============================================================================

/// Lists every product in catalog order.
pub fn list_products(catalog: &CatalogState) -> Vec<ProductSummary> {
    debug!("list_products command");
    catalog
        .catalog()
        .products()
        .iter()
        .map(ProductSummary::from)
        .collect()
}

/// Gets one product by id or handle.
///
/// Nothing is preselected: every value is listed with its availability
/// against an empty selection.
pub fn get_product(catalog: &CatalogState, product_id: &str) -> Result<ProductView, ApiError> {
    debug!(product_id = %product_id, "get_product command");

    let product = catalog.product(product_id)?;
    let resolver = product.resolver();

    Ok(ProductView {
        options: option_views(resolver, &Selection::new()),
        initial_variant_id: resolver.initial_variant().map(|v| v.id.clone()),
        initial_selection: resolver.initial_selection(),
        product: product.clone(),
    })
}

/// Lists the values of one option with availability under `selection`.
pub fn option_values(
    catalog: &CatalogState,
    product_id: &str,
    option_name: &str,
    selection: &Selection,
) -> Result<Vec<OptionValueState>, ApiError> {
    debug!(product_id = %product_id, option = %option_name, "option_values command");

    let product = catalog.product(product_id)?;
    if product.option(option_name).is_none() {
        return Err(ApiError::not_found("Option", option_name));
    }

    Ok(product.resolver().option_states(option_name, selection))
}

/// Sets one option value and re-resolves.
///
/// Other axes keep their values even when the new combination is not
/// stocked; the response then reports `no_match`.
pub fn choose_option(
    catalog: &CatalogState,
    product_id: &str,
    option_name: &str,
    value: &str,
    selection: &Selection,
) -> Result<SelectionView, ApiError> {
    debug!(
        product_id = %product_id,
        option = %option_name,
        value = %value,
        "choose_option command"
    );

    let product = catalog.product(product_id)?;
    let resolver = product.resolver();
    resolver.check_choice(option_name, value)?;

    let choice = resolver.choose(option_name, value, selection);
    Ok(SelectionView::build(product, choice.selection, choice.resolution))
}

/// Resolves a selection without changing it.
pub fn resolve_selection(
    catalog: &CatalogState,
    product_id: &str,
    selection: &Selection,
) -> Result<SelectionView, ApiError> {
    debug!(product_id = %product_id, "resolve_selection command");

    let product = catalog.product(product_id)?;
    let resolution = product.resolver().resolve(selection);
    Ok(SelectionView::build(product, selection.clone(), resolution))
}

// =============================================================================
// Argument Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductArgs {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionValuesArgs {
    pub product_id: String,
    pub option_name: String,
    #[serde(default)]
    pub selection: Selection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooseOptionArgs {
    pub product_id: String,
    pub option_name: String,
    pub value: String,
    #[serde(default)]
    pub selection: Selection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionArgs {
    pub product_id: String,
    #[serde(default)]
    pub selection: Selection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const TEE: &str = "classic-tee";

    fn catalog() -> CatalogState {
        CatalogState::bundled().unwrap()
    }

    fn select(pairs: &[(&str, &str)]) -> Selection {
        pairs.iter().copied().collect()
    }

    fn values(view: &[OptionView], option: &str) -> Vec<(String, bool)> {
        view.iter()
            .find(|o| o.name == option)
            .unwrap()
            .values
            .iter()
            .map(|v| (v.value.clone(), v.available))
            .collect()
    }

    #[test]
    fn test_list_products() {
        let products = list_products(&catalog());
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].handle, "classic-tee");
        assert_eq!(products[0].price.as_ref().unwrap().amount, "10.0");
        assert!(products[0].purchasable);
    }

    #[test]
    fn test_get_product_lists_all_values() {
        let view = get_product(&catalog(), TEE).unwrap();

        assert_eq!(
            values(&view.options, "Size"),
            vec![("S".to_string(), true), ("M".to_string(), true)]
        );
        assert_eq!(
            view.initial_variant_id.as_deref(),
            Some("gid://shopify/ProductVariant/2001")
        );
        assert_eq!(view.initial_selection.get("Color"), Some("Red"));
    }

    #[test]
    fn test_option_values_under_selection() {
        // Blue exists only in M
        let states = option_values(&catalog(), TEE, "Size", &select(&[("Color", "Blue")])).unwrap();
        let available: Vec<&str> = states
            .iter()
            .filter(|s| s.available)
            .map(|s| s.value.as_str())
            .collect();
        assert_eq!(available, vec!["M"]);

        let err = option_values(&catalog(), TEE, "Fit", &Selection::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_choose_option_to_match() {
        let catalog = catalog();
        let first = choose_option(&catalog, TEE, "Color", "Red", &Selection::new()).unwrap();
        assert_eq!(first.resolution, ResolutionKind::Incomplete);
        assert_eq!(first.missing, vec!["Size"]);
        assert!(!first.can_add_to_cart);

        let second = choose_option(&catalog, TEE, "Size", "M", &first.selection).unwrap();
        assert_eq!(second.resolution, ResolutionKind::Matched);
        assert_eq!(
            second.variant.as_ref().unwrap().id,
            "gid://shopify/ProductVariant/2002"
        );
        assert_eq!(second.price.as_ref().unwrap().amount, "10.0");
        assert!(second.can_add_to_cart);
    }

    #[test]
    fn test_choose_option_keeps_other_axes() {
        let catalog = catalog();
        let previous = select(&[("Color", "Blue"), ("Size", "M")]);

        let view = choose_option(&catalog, TEE, "Size", "S", &previous).unwrap();

        assert_eq!(view.resolution, ResolutionKind::NoMatch);
        assert_eq!(view.selection.get("Color"), Some("Blue"));
        assert_eq!(previous.get("Size"), Some("M"));
        // No variant: fall back to the product's price and featured image
        assert_eq!(view.price.as_ref().unwrap().amount, "10.0");
        assert_eq!(view.image.unwrap().url, "https://cdn.example.com/tee.png");
    }

    #[test]
    fn test_matched_but_sold_out() {
        let view =
            resolve_selection(&catalog(), TEE, &select(&[("Color", "Blue"), ("Size", "M")])).unwrap();
        assert_eq!(view.resolution, ResolutionKind::Matched);
        assert!(!view.can_add_to_cart);
        assert_eq!(view.price.as_ref().unwrap().amount, "12.5");
    }

    #[test]
    fn test_choose_undeclared_value() {
        let err = choose_option(&catalog(), TEE, "Size", "XL", &Selection::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = choose_option(&catalog(), "ghost", "Size", "S", &Selection::new()).unwrap_err();
        assert_eq!(err.message, "Product not found: ghost");
    }
}
