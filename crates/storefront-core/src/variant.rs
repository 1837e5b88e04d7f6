//! # Variant Resolver
//!
//! Pure functions over a product's options and variants.
//!
//! ## What It Answers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog: Color ∈ {Red, Blue}, Size ∈ {S, M}                           │
//! │  Stocked: (Red,M) (Blue,S) (Blue,M)          ← no (Red,S)              │
//! │                                                                         │
//! │  available_values_for("Size", {Color: Red})  → [M]                     │
//! │      S stays visible in the UI, rendered disabled                       │
//! │                                                                         │
//! │  resolve({Color: Red})            → Incomplete { missing: [Size] }     │
//! │  resolve({Color: Red, Size: S})   → NoMatch                            │
//! │  resolve({Color: Red, Size: M})   → Matched(variant)                   │
//! │                                                                         │
//! │  choose("Size", "M", {Color: Red})                                      │
//! │      → ({Color: Red, Size: M}, Matched(variant))                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Statelessness
//! The resolver only borrows catalog data. Selection state is threaded
//! through the caller, so the same call with the same arguments always
//! gives the same answer and the resolver can be shared freely between
//! readers.
//!
//! ## Malformed Variants
//! A variant that lacks a value for some declared option never matches a
//! complete selection. Nothing here panics on bad catalog data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::selection::Selection;
use crate::types::{Product, ProductOption, Variant};

// =============================================================================
// Outcomes
// =============================================================================

/// Result of resolving a selection.
///
/// `Incomplete` and `NoMatch` are ordinary outcomes that callers render
/// differently ("choose a size" vs "this combination is not stocked").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Exactly this variant matches the selection.
    Matched(&'a Variant),
    /// The selection covers every option but no variant carries it.
    NoMatch,
    /// Some declared options have no value yet (declaration order).
    Incomplete { missing: Vec<String> },
}

impl<'a> Resolution<'a> {
    /// The matched variant, if any.
    pub fn variant(&self) -> Option<&'a Variant> {
        match self {
            Resolution::Matched(variant) => Some(variant),
            _ => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Resolution::NoMatch)
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, Resolution::Incomplete { .. })
    }

    pub fn kind(&self) -> ResolutionKind {
        match self {
            Resolution::Matched(_) => ResolutionKind::Matched,
            Resolution::NoMatch => ResolutionKind::NoMatch,
            Resolution::Incomplete { .. } => ResolutionKind::Incomplete,
        }
    }
}

/// Serializable tag of a [`Resolution`] for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    Matched,
    NoMatch,
    Incomplete,
}

/// Result of choosing one option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<'a> {
    /// The previous selection with the chosen option set.
    pub selection: Selection,
    /// What that selection resolves to.
    pub resolution: Resolution<'a>,
}

/// How one option value should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionValueState {
    pub value: String,
    /// Some variant carries this value together with the other selected axes.
    pub available: bool,
    /// This is the value currently chosen for the option.
    pub selected: bool,
}

// =============================================================================
// Resolver
// =============================================================================

/// Read-only view over one product's options and variants.
#[derive(Debug, Clone, Copy)]
pub struct VariantResolver<'a> {
    options: &'a [ProductOption],
    variants: &'a [Variant],
}

impl<'a> VariantResolver<'a> {
    pub fn new(options: &'a [ProductOption], variants: &'a [Variant]) -> Self {
        VariantResolver { options, variants }
    }

    pub fn for_product(product: &'a Product) -> Self {
        VariantResolver::new(&product.options, &product.variants)
    }

    pub fn options(&self) -> &'a [ProductOption] {
        self.options
    }

    pub fn variants(&self) -> &'a [Variant] {
        self.variants
    }

    fn option(&self, name: &str) -> Option<&'a ProductOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Values of `option_name` that some variant can still satisfy.
    ///
    /// Only the *other* axes of `selection` constrain the answer; any value
    /// already chosen for `option_name` itself is ignored, so the shopper
    /// can always switch between reachable values on one axis. Declared
    /// order is kept. An unknown option yields an empty list.
    ///
    /// ```rust
    /// use storefront_core::{Price, ProductOption, SelectedOption, Selection, Variant, VariantResolver};
    ///
    /// let options = vec![
    ///     ProductOption::new("Color", ["Red", "Blue"]),
    ///     ProductOption::new("Size", ["S", "M"]),
    /// ];
    /// let stocked = |id: &str, color: &str, size: &str| Variant {
    ///     id: id.to_string(),
    ///     title: None,
    ///     available_for_sale: true,
    ///     price: Price::new("10.00", "USD"),
    ///     image: None,
    ///     selected_options: vec![
    ///         SelectedOption::new("Color", color),
    ///         SelectedOption::new("Size", size),
    ///     ],
    /// };
    /// let variants = vec![stocked("1", "Red", "M"), stocked("2", "Blue", "S")];
    /// let resolver = VariantResolver::new(&options, &variants);
    ///
    /// let red = Selection::new().with("Color", "Red");
    /// assert_eq!(resolver.available_values_for("Size", &red), vec!["M"]);
    /// ```
    pub fn available_values_for(&self, option_name: &str, selection: &Selection) -> Vec<String> {
        let Some(option) = self.option(option_name) else {
            return Vec::new();
        };

        let others: Vec<(&str, &str)> = selection
            .iter()
            .filter(|(name, _)| *name != option_name)
            .collect();

        option
            .values
            .iter()
            .filter(|value| self.is_reachable(option_name, value, &others))
            .cloned()
            .collect()
    }

    /// Every declared value of `option_name` with its render flags.
    ///
    /// Unavailable values are kept so the UI can show them disabled.
    pub fn option_states(&self, option_name: &str, selection: &Selection) -> Vec<OptionValueState> {
        let Some(option) = self.option(option_name) else {
            return Vec::new();
        };

        let available = self.available_values_for(option_name, selection);
        let chosen = selection.get(option_name);

        option
            .values
            .iter()
            .map(|value| OptionValueState {
                value: value.clone(),
                available: available.contains(value),
                selected: chosen == Some(value.as_str()),
            })
            .collect()
    }

    /// Maps a selection to the variant that carries exactly those values.
    ///
    /// Entries for option names the product does not declare are ignored.
    /// Well-formed catalogs have at most one match; if two variants share
    /// a tuple, the first declared one wins.
    pub fn resolve(&self, selection: &Selection) -> Resolution<'a> {
        let missing: Vec<String> = self
            .options
            .iter()
            .filter(|o| !selection.contains(&o.name))
            .map(|o| o.name.clone())
            .collect();

        if !missing.is_empty() {
            return Resolution::Incomplete { missing };
        }

        self.variants
            .iter()
            .find(|variant| {
                self.options
                    .iter()
                    .all(|o| variant.value_for(&o.name) == selection.get(&o.name))
            })
            .map_or(Resolution::NoMatch, Resolution::Matched)
    }

    /// Sets `option_name = value` on a copy of `previous` and resolves it.
    ///
    /// Other axes keep their values even if the new choice makes them
    /// unreachable; the result is then `NoMatch` until the caller changes
    /// them.
    pub fn choose(&self, option_name: &str, value: &str, previous: &Selection) -> Choice<'a> {
        let selection = previous.with(option_name, value);
        let resolution = self.resolve(&selection);
        Choice {
            selection,
            resolution,
        }
    }

    /// Checks that the product declares `option_name` with `value`.
    ///
    /// For callers that accept option choices from outside (the IPC
    /// boundary). [`VariantResolver::choose`] itself accepts anything.
    pub fn check_choice(&self, option_name: &str, value: &str) -> CoreResult<()> {
        let option = self
            .option(option_name)
            .ok_or_else(|| CoreError::UnknownOption(option_name.to_string()))?;

        if !option.has_value(value) {
            return Err(CoreError::UnknownOptionValue {
                option: option_name.to_string(),
                value: value.to_string(),
            });
        }

        Ok(())
    }

    /// The default variant: first in declared order.
    pub fn initial_variant(&self) -> Option<&'a Variant> {
        self.variants.first()
    }

    /// The initial variant's option tuple, or an empty selection.
    pub fn initial_selection(&self) -> Selection {
        self.initial_variant()
            .map(Variant::to_selection)
            .unwrap_or_default()
    }

    fn is_reachable(&self, option_name: &str, value: &str, others: &[(&str, &str)]) -> bool {
        self.variants.iter().any(|variant| {
            variant.has_option(option_name, value)
                && others.iter().all(|(name, val)| variant.has_option(name, val))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
