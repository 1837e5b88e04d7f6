//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Price parsing, unknown ids / options           │
//! │  └── ValidationError  - Malformed catalog data                         │
//! │                                                                         │
//! │  storefront-catalog errors (separate crate)                            │
//! │  └── CatalogError     - Payload decoding, file access                  │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! A selection that matches no variant, an incomplete selection, and
//! removing a variant that is not in the cart are all ordinary outcomes.
//! They are returned as values (see [`crate::variant::Resolution`] and
//! [`crate::cart::Cart::remove_item`]), never as `Err`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A price amount could not be read as a decimal number.
    ///
    /// ## When This Occurs
    /// - The catalog sent an empty or non-numeric `amount`
    /// - The amount does not fit in 64-bit cents
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    /// The product does not declare an option with this name.
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// The option exists but does not declare this value.
    #[error("Option {option} has no value '{value}'")]
    UnknownOptionValue { option: String, value: String },

    /// The product has no variant with this id.
    #[error("Variant not found: {0}")]
    UnknownVariant(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog and input validation errors.
///
/// Catalog problems are reported, not enforced: the resolver treats a
/// malformed variant as simply non-matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., non-numeric amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two options on one product share a name.
    #[error("option '{name}' is declared more than once")]
    DuplicateOption { name: String },

    /// An option lists the same value twice.
    #[error("option '{option}' lists value '{value}' more than once")]
    DuplicateOptionValue { option: String, value: String },

    /// A variant has no value for a declared option.
    #[error("variant {variant_id} has no value for option '{option}'")]
    MissingOptionValue { variant_id: String, option: String },

    /// A variant carries a value for the same option more than once.
    #[error("variant {variant_id} repeats option '{option}'")]
    RepeatedOption { variant_id: String, option: String },

    /// A variant carries an option the product does not declare.
    #[error("variant {variant_id} uses undeclared option '{option}'")]
    UndeclaredOption { variant_id: String, option: String },

    /// A variant uses a value its option does not declare.
    #[error("variant {variant_id} uses undeclared value '{value}' for option '{option}'")]
    UndeclaredOptionValue {
        variant_id: String,
        option: String,
        value: String,
    },

    /// Two variants share the same full option tuple.
    #[error("variants {first} and {second} have the same options")]
    DuplicateVariantCombination { first: String, second: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidAmount {
            amount: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid amount 'abc': not a number");

        let err = CoreError::UnknownOptionValue {
            option: "Size".to_string(),
            value: "XL".to_string(),
        };
        assert_eq!(err.to_string(), "Option Size has no value 'XL'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingOptionValue {
            variant_id: "v1".to_string(),
            option: "Color".to_string(),
        };
        assert_eq!(err.to_string(), "variant v1 has no value for option 'Color'");

        let err = ValidationError::Required {
            field: "variant id".to_string(),
        };
        assert_eq!(err.to_string(), "variant id is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
