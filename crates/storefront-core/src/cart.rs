//! # Cart
//!
//! Quantity-merged cart lines keyed by variant identity.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add_item(candidate)                                                    │
//! │     ├── variant already in cart? → quantity += 1 (line kept as is)     │
//! │     └── new variant              → push line with quantity 1           │
//! │                                                                         │
//! │  remove_item(variant_id)         → line dropped; absent id is a no-op  │
//! │  clear()                         → no lines                            │
//! │                                                                         │
//! │  item_count()                    → Σ quantity                          │
//! │  total_price()                   → Σ amount × quantity, "0.00" format │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per `variant_id` (adds merge, never duplicate)
//! - Every line has quantity ≥ 1; a line is removed, never left at 0
//! - Lines stay in first-add order
//!
//! The fields are private so these hold for every `Cart` value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Image, Price, Product, SelectedOption, Variant};

// =============================================================================
// Line Types
// =============================================================================

/// Everything a cart line needs except its quantity.
///
/// This is what the coordinating layer hands to [`Cart::add_item`] once a
/// variant has been resolved and confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineCandidate {
    pub product_id: String,
    /// Identity key of the line.
    pub variant_id: String,
    pub product_title: String,
    pub price: Price,
    pub image: Option<Image>,
    pub selected_options: Vec<SelectedOption>,
}

impl LineCandidate {
    /// Snapshots a resolved variant for the cart.
    ///
    /// The image falls back to the product's featured image when the
    /// variant has none.
    pub fn from_variant(product: &Product, variant: &Variant) -> Self {
        LineCandidate {
            product_id: product.id.clone(),
            variant_id: variant.id.clone(),
            product_title: product.title.clone(),
            price: variant.price.clone(),
            image: product.display_image(Some(variant)).cloned(),
            selected_options: variant.selected_options.clone(),
        }
    }
}

/// One aggregated entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub variant_id: String,
    pub product_title: String,
    /// Price captured when the line was first added.
    pub price: Price,
    pub image: Option<Image>,
    pub selected_options: Vec<SelectedOption>,
    pub quantity: u32,
}

impl CartLine {
    fn from_candidate(candidate: LineCandidate) -> Self {
        CartLine {
            product_id: candidate.product_id,
            variant_id: candidate.variant_id,
            product_title: candidate.product_title,
            price: candidate.price,
            image: candidate.image,
            selected_options: candidate.selected_options,
            quantity: 1,
        }
    }

    pub fn unit_price(&self) -> CoreResult<Money> {
        self.price.to_money()
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> CoreResult<Money> {
        Ok(self.unit_price()?.multiply_quantity(self.quantity))
    }

    /// Human-readable options, e.g. `"Color: Red, Size: M"`.
    pub fn options_label(&self) -> String {
        self.selected_options
            .iter()
            .map(|o| format!("{}: {}", o.name, o.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// What [`Cart::add_item`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Inserted,
    /// An existing line's quantity went up by one.
    Incremented { quantity: u32 },
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart of one session.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of a variant.
    ///
    /// ## Behavior
    /// - Variant already in cart: its quantity goes up by one. Price, image
    ///   and title of the existing line are NOT refreshed from `candidate`.
    /// - Otherwise a new line with quantity 1 is appended.
    pub fn add_item(&mut self, candidate: LineCandidate) -> AddOutcome {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.variant_id == candidate.variant_id)
        {
            line.quantity = line.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: line.quantity,
            };
        }

        self.lines.push(CartLine::from_candidate(candidate));
        AddOutcome::Inserted
    }

    /// Removes the line for `variant_id`.
    ///
    /// Returns `false` (and changes nothing) when no such line exists.
    pub fn remove_item(&mut self, variant_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.variant_id != variant_id);
        self.lines.len() != initial_len
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, variant_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.variant_id == variant_id)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of line totals.
    ///
    /// Lines whose amount cannot be parsed contribute nothing; see
    /// [`Cart::unpriced_lines`]. Currency codes are not consulted.
    pub fn total(&self) -> Money {
        self.lines.iter().filter_map(|l| l.line_total().ok()).sum()
    }

    /// [`Cart::total`] as a two-decimal string, e.g. `"25.50"`.
    pub fn total_price(&self) -> String {
        self.total().to_amount_string()
    }

    /// Distinct currency codes in first-seen order.
    pub fn currency_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for line in &self.lines {
            let code = line.price.currency_code.as_str();
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    /// True when lines are priced in more than one currency.
    ///
    /// The total is still a plain sum in that case.
    pub fn has_mixed_currencies(&self) -> bool {
        self.currency_codes().len() > 1
    }

    /// Lines whose price amount does not parse.
    pub fn unpriced_lines(&self) -> Vec<&CartLine> {
        self.lines.iter().filter(|l| l.unit_price().is_err()).collect()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
