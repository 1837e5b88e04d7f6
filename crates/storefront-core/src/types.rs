//! # Catalog Types
//!
//! Product data as the storefront receives it from the commerce backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  Product                                                                │
//! │  ├── options: [ProductOption]      Color → [Red, Blue]                 │
//! │  │                                 Size  → [S, M]                      │
//! │  ├── variants: [Variant]           one per stocked combination         │
//! │  │   ├── price: Price              { amount: "10.00", USD }            │
//! │  │   ├── image: Image?                                                 │
//! │  │   └── selectedOptions           [Color=Red, Size=M]                 │
//! │  ├── priceRange.minVariantPrice    fallback display price              │
//! │  └── featuredImage                 fallback display image              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase to match the Storefront API, so a
//! product node can be deserialized directly once its GraphQL connections
//! have been flattened (see the `storefront-catalog` crate).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::selection::Selection;
use crate::variant::VariantResolver;

// =============================================================================
// Price
// =============================================================================

/// A price as the catalog sends it: a decimal string plus a currency code.
///
/// Kept as text for display; converted to [`Money`] only for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Decimal amount, e.g. `"19.99"`.
    pub amount: String,
    /// ISO 4217 code, e.g. `"USD"`.
    pub currency_code: String,
}

impl Price {
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Price {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Parses the amount into cents.
    pub fn to_money(&self) -> CoreResult<Money> {
        Money::parse_amount(&self.amount)
    }
}

/// Lowest and highest variant price of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Price,
    #[serde(default)]
    pub max_variant_price: Option<Price>,
}

// =============================================================================
// Image
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

// =============================================================================
// Options
// =============================================================================

/// One selectable axis of a product, e.g. Color → [Red, Blue].
///
/// Value order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl ProductOption {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProductOption {
            id: None,
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks whether this option declares `value`.
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// One (option name, value) pair carried by a variant or a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

impl SelectedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        SelectedOption {
            name: name.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A purchasable unit: exactly one value per product option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Unique within the product.
    pub id: String,

    /// Backend-supplied label such as `"Red / M"`.
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub available_for_sale: bool,

    pub price: Price,

    #[serde(default)]
    pub image: Option<Image>,

    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

impl Variant {
    /// Returns this variant's value for an option, if it carries one.
    pub fn value_for(&self, option_name: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|o| o.name == option_name)
            .map(|o| o.value.as_str())
    }

    /// Checks whether this variant carries `name = value`.
    pub fn has_option(&self, name: &str, value: &str) -> bool {
        self.selected_options
            .iter()
            .any(|o| o.name == name && o.value == value)
    }

    /// The variant's option tuple as a selection.
    pub fn to_selection(&self) -> Selection {
        self.selected_options
            .iter()
            .map(|o| (o.name.clone(), o.value.clone()))
            .collect()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product with its option axes and enumerated variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    pub title: String,

    /// URL handle.
    #[serde(default)]
    pub handle: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub options: Vec<ProductOption>,

    /// In backend order; the first one is the default.
    #[serde(default)]
    pub variants: Vec<Variant>,

    #[serde(default)]
    pub price_range: Option<PriceRange>,

    #[serde(default)]
    pub featured_image: Option<Image>,

    #[serde(default)]
    pub images: Vec<Image>,
}

impl Product {
    /// Returns a resolver over this product's options and variants.
    #[inline]
    pub fn resolver(&self) -> VariantResolver<'_> {
        VariantResolver::for_product(self)
    }

    /// The variant shown when the product is first opened.
    ///
    /// First in declared order; never re-sorted by price or availability.
    pub fn initial_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    pub fn option(&self, name: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Like [`Product::variant`], but an unknown id is an error.
    pub fn require_variant(&self, variant_id: &str) -> CoreResult<&Variant> {
        self.variant(variant_id)
            .ok_or_else(|| CoreError::UnknownVariant(variant_id.to_string()))
    }

    /// Price to show for the product.
    ///
    /// ## Fallback Order
    /// 1. The selected variant's price
    /// 2. `priceRange.minVariantPrice`
    /// 3. The initial variant's price
    pub fn display_price<'a>(&'a self, selected: Option<&'a Variant>) -> Option<&'a Price> {
        selected
            .map(|v| &v.price)
            .or_else(|| self.price_range.as_ref().map(|r| &r.min_variant_price))
            .or_else(|| self.initial_variant().map(|v| &v.price))
    }

    /// Image to show for the product.
    ///
    /// ## Fallback Order
    /// 1. The selected variant's image
    /// 2. `featuredImage`
    /// 3. The first gallery image
    pub fn display_image<'a>(&'a self, selected: Option<&'a Variant>) -> Option<&'a Image> {
        selected
            .and_then(|v| v.image.as_ref())
            .or(self.featured_image.as_ref())
            .or_else(|| self.images.first())
    }

    /// True when at least one variant can be bought.
    pub fn is_purchasable(&self) -> bool {
        self.variants.iter().any(|v| v.available_for_sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: &str, amount: &str, options: &[(&str, &str)]) -> Variant {
        Variant {
            id: id.to_string(),
            title: None,
            available_for_sale: true,
            price: Price::new(amount, "USD"),
            image: None,
            selected_options: options
                .iter()
                .map(|(n, v)| SelectedOption::new(*n, *v))
                .collect(),
        }
    }

    fn image(url: &str) -> Image {
        Image {
            url: url.to_string(),
            alt_text: None,
            width: None,
            height: None,
        }
    }

    #[test]
    fn test_deserialize_storefront_shape() {
        let json = r#"{
            "id": "gid://shopify/Product/7",
            "title": "Hoodie",
            "options": [{ "id": "o1", "name": "Size", "values": ["S", "M"] }],
            "variants": [{
                "id": "gid://shopify/ProductVariant/1",
                "title": "S",
                "availableForSale": true,
                "price": { "amount": "40.0", "currencyCode": "EUR" },
                "image": { "url": "https://cdn/s.png", "altText": null },
                "selectedOptions": [{ "name": "Size", "value": "S" }]
            }],
            "priceRange": { "minVariantPrice": { "amount": "40.0", "currencyCode": "EUR" } },
            "featuredImage": { "url": "https://cdn/f.png" }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.handle, "");
        assert_eq!(product.options[0].values, vec!["S", "M"]);
        assert_eq!(product.variants[0].value_for("Size"), Some("S"));
        assert_eq!(product.variants[0].price.currency_code, "EUR");
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_price_to_money() {
        assert_eq!(Price::new("19.99", "USD").to_money().unwrap().cents(), 1999);
        assert!(Price::new("free", "USD").to_money().is_err());
    }

    #[test]
    fn test_variant_lookups() {
        let v = variant("v1", "1.00", &[("Color", "Red"), ("Size", "M")]);
        assert_eq!(v.value_for("Color"), Some("Red"));
        assert_eq!(v.value_for("Material"), None);
        assert!(v.has_option("Size", "M"));
        assert!(!v.has_option("Size", "S"));

        let selection = v.to_selection();
        assert_eq!(selection.get("Size"), Some("M"));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_display_price_fallbacks() {
        let mut product = Product {
            id: "p".to_string(),
            title: "P".to_string(),
            handle: String::new(),
            description: String::new(),
            options: vec![],
            variants: vec![variant("v1", "12.00", &[]), variant("v2", "9.00", &[])],
            price_range: None,
            featured_image: None,
            images: vec![],
        };

        // No range: first variant
        assert_eq!(product.display_price(None).unwrap().amount, "12.00");

        product.price_range = Some(PriceRange {
            min_variant_price: Price::new("9.00", "USD"),
            max_variant_price: None,
        });
        assert_eq!(product.display_price(None).unwrap().amount, "9.00");

        let selected = &product.variants[0];
        assert_eq!(product.display_price(Some(selected)).unwrap().amount, "12.00");
    }

    #[test]
    fn test_display_image_fallbacks() {
        let mut product = Product {
            id: "p".to_string(),
            title: "P".to_string(),
            handle: String::new(),
            description: String::new(),
            options: vec![],
            variants: vec![variant("v1", "1.00", &[])],
            price_range: None,
            featured_image: None,
            images: vec![image("gallery")],
        };
        assert_eq!(product.display_image(None).unwrap().url, "gallery");

        product.featured_image = Some(image("featured"));
        assert_eq!(product.display_image(None).unwrap().url, "featured");

        // Variant without its own image falls through to the featured one
        let plain = product.variants[0].clone();
        assert_eq!(product.display_image(Some(&plain)).unwrap().url, "featured");

        let mut with_image = plain;
        with_image.image = Some(image("variant"));
        assert_eq!(product.display_image(Some(&with_image)).unwrap().url, "variant");
    }

    #[test]
    fn test_require_variant() {
        let product = Product {
            id: "p".to_string(),
            title: "P".to_string(),
            handle: String::new(),
            description: String::new(),
            options: vec![],
            variants: vec![variant("v1", "1.00", &[])],
            price_range: None,
            featured_image: None,
            images: vec![],
        };
        assert!(product.require_variant("v1").is_ok());
        assert!(matches!(
            product.require_variant("nope"),
            Err(CoreError::UnknownVariant(id)) if id == "nope"
        ));
        assert!(product.is_purchasable());
    }
}
