//! # Validation Module
//!
//! Well-formedness checks for catalog data and command input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (storefront-catalog)                            │
//! │  ├── validate_product() on every decoded product                       │
//! │  └── Problems are LOGGED, the product is still served                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Resolver (variant.rs)                                        │
//! │  └── A malformed variant never matches; nothing panics                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Commands (apps/storefront)                                   │
//! │  └── validate_variant_id() / validate_amount() on request arguments    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_amount, validate_variant_id};
//!
//! assert!(validate_variant_id("gid://shopify/ProductVariant/1").is_ok());
//! assert!(validate_variant_id("  ").is_err());
//! assert!(validate_amount("19.99").is_ok());
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, Variant};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Input Validators
// =============================================================================

/// Validates a variant identity.
///
/// ## Rules
/// - Must not be empty or whitespace
///
/// ## Returns
/// The identity unchanged (ids are opaque, so no trimming).
pub fn validate_variant_id(variant_id: &str) -> ValidationResult<&str> {
    if variant_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "variant id".to_string(),
        });
    }
    Ok(variant_id)
}

/// Validates a decimal amount string such as `"25.50"`.
///
/// ```rust
/// use storefront_core::validation::validate_amount;
///
/// assert_eq!(validate_amount("5.5").unwrap().cents(), 550);
/// assert!(validate_amount("").is_err());
/// assert!(validate_amount("ten").is_err());
/// ```
pub fn validate_amount(amount: &str) -> ValidationResult<Money> {
    if amount.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "amount".to_string(),
        });
    }

    Money::parse_amount(amount).map_err(|e| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Catalog Validation
// =============================================================================

/// Reports every well-formedness problem in a product.
///
/// An empty vec means the product is well formed.
///
/// ## Checks
/// - Product id is present
/// - Option names are distinct; values within an option are distinct
/// - Each variant has an id and a parseable price
/// - Each variant carries exactly one declared value per declared option
///   and nothing else
/// - No two variants share the same option tuple
pub fn validate_product(product: &Product) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    if product.id.trim().is_empty() {
        problems.push(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    check_options(product, &mut problems);

    for variant in &product.variants {
        if let Err(e) = validate_variant_id(&variant.id) {
            problems.push(e);
        }
        if let Err(e) = validate_amount(&variant.price.amount) {
            problems.push(ValidationError::InvalidFormat {
                field: format!("price of variant {}", variant.id),
                reason: e.to_string(),
            });
        }
        check_variant_options(product, variant, &mut problems);
    }

    check_duplicate_tuples(product, &mut problems);

    problems
}

fn check_options(product: &Product, problems: &mut Vec<ValidationError>) {
    let mut names = HashSet::new();
    for option in &product.options {
        if !names.insert(option.name.as_str()) {
            problems.push(ValidationError::DuplicateOption {
                name: option.name.clone(),
            });
        }

        let mut values = HashSet::new();
        for value in &option.values {
            if !values.insert(value.as_str()) {
                problems.push(ValidationError::DuplicateOptionValue {
                    option: option.name.clone(),
                    value: value.clone(),
                });
            }
        }
    }
}

fn check_variant_options(
    product: &Product,
    variant: &Variant,
    problems: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for selected in &variant.selected_options {
        if !seen.insert(selected.name.as_str()) {
            problems.push(ValidationError::RepeatedOption {
                variant_id: variant.id.clone(),
                option: selected.name.clone(),
            });
            continue;
        }

        match product.option(&selected.name) {
            None => problems.push(ValidationError::UndeclaredOption {
                variant_id: variant.id.clone(),
                option: selected.name.clone(),
            }),
            Some(option) if !option.has_value(&selected.value) => {
                problems.push(ValidationError::UndeclaredOptionValue {
                    variant_id: variant.id.clone(),
                    option: selected.name.clone(),
                    value: selected.value.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for option in &product.options {
        if !seen.contains(option.name.as_str()) {
            problems.push(ValidationError::MissingOptionValue {
                variant_id: variant.id.clone(),
                option: option.name.clone(),
            });
        }
    }
}

fn check_duplicate_tuples(product: &Product, problems: &mut Vec<ValidationError>) {
    // Selection keeps pairs sorted by name, so equal tuples give equal keys
    let mut first_by_tuple: HashMap<Vec<(String, String)>, &str> = HashMap::new();

    for variant in &product.variants {
        let tuple: Vec<(String, String)> = variant
            .to_selection()
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();

        match first_by_tuple.get(&tuple) {
            Some(first) => problems.push(ValidationError::DuplicateVariantCombination {
                first: (*first).to_string(),
                second: variant.id.clone(),
            }),
            None => {
                first_by_tuple.insert(tuple, variant.id.as_str());
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductOption, SelectedOption};

    fn variant(id: &str, options: &[(&str, &str)]) -> Variant {
        Variant {
            id: id.to_string(),
            title: None,
            available_for_sale: true,
            price: Price::new("10.00", "USD"),
            image: None,
            selected_options: options
                .iter()
                .map(|(n, v)| SelectedOption::new(*n, *v))
                .collect(),
        }
    }

    fn product(options: Vec<ProductOption>, variants: Vec<Variant>) -> Product {
        Product {
            id: "p1".to_string(),
            title: "Tee".to_string(),
            handle: "tee".to_string(),
            description: String::new(),
            options,
            variants,
            price_range: None,
            featured_image: None,
            images: vec![],
        }
    }

    fn shirt_options() -> Vec<ProductOption> {
        vec![
            ProductOption::new("Color", ["Red", "Blue"]),
            ProductOption::new("Size", ["S", "M"]),
        ]
    }

    #[test]
    fn test_validate_variant_id() {
        assert_eq!(validate_variant_id("v1").unwrap(), "v1");
        assert!(matches!(
            validate_variant_id(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("10").unwrap().cents(), 1000);
        assert!(matches!(
            validate_amount("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_amount("1.2.3"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_well_formed_product() {
        let p = product(
            shirt_options(),
            vec![
                variant("v1", &[("Color", "Red"), ("Size", "S")]),
                variant("v2", &[("Size", "M"), ("Color", "Blue")]),
            ],
        );
        assert!(validate_product(&p).is_empty());
    }

    #[test]
    fn test_missing_and_undeclared_options() {
        let p = product(
            shirt_options(),
            vec![
                variant("v1", &[("Color", "Red")]),
                variant("v2", &[("Color", "Green"), ("Size", "S"), ("Fit", "Slim")]),
            ],
        );

        let problems = validate_product(&p);
        assert!(problems.contains(&ValidationError::MissingOptionValue {
            variant_id: "v1".to_string(),
            option: "Size".to_string(),
        }));
        assert!(problems.contains(&ValidationError::UndeclaredOptionValue {
            variant_id: "v2".to_string(),
            option: "Color".to_string(),
            value: "Green".to_string(),
        }));
        assert!(problems.contains(&ValidationError::UndeclaredOption {
            variant_id: "v2".to_string(),
            option: "Fit".to_string(),
        }));
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn test_repeated_option_on_variant() {
        let p = product(
            vec![ProductOption::new("Size", ["S", "M"])],
            vec![variant("v1", &[("Size", "S"), ("Size", "M")])],
        );

        assert_eq!(
            validate_product(&p),
            vec![ValidationError::RepeatedOption {
                variant_id: "v1".to_string(),
                option: "Size".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_declarations() {
        let p = product(
            vec![
                ProductOption::new("Size", ["S", "S"]),
                ProductOption::new("Size", ["M"]),
            ],
            vec![],
        );

        let problems = validate_product(&p);
        assert!(problems.contains(&ValidationError::DuplicateOption {
            name: "Size".to_string(),
        }));
        assert!(problems.contains(&ValidationError::DuplicateOptionValue {
            option: "Size".to_string(),
            value: "S".to_string(),
        }));
    }

    #[test]
    fn test_duplicate_variant_tuples() {
        let p = product(
            shirt_options(),
            vec![
                variant("first", &[("Color", "Red"), ("Size", "S")]),
                variant("second", &[("Size", "S"), ("Color", "Red")]),
            ],
        );

        assert_eq!(
            validate_product(&p),
            vec![ValidationError::DuplicateVariantCombination {
                first: "first".to_string(),
                second: "second".to_string(),
            }]
        );
    }

    #[test]
    fn test_bad_price_and_missing_ids() {
        let mut bad = variant("", &[("Size", "S")]);
        bad.price = Price::new("free", "USD");
        let mut p = product(vec![ProductOption::new("Size", ["S"])], vec![bad]);
        p.id = String::new();

        let problems = validate_product(&p);
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().all(|e| matches!(
            e,
            ValidationError::Required { .. } | ValidationError::InvalidFormat { .. }
        )));
    }
}
