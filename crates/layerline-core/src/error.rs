//! # Error Types
//!
//! Domain-specific error types for layerline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  layerline-core errors (this file)                                     │
//! │  ├── CoreError        - Catalog lookups, catalog parsing               │
//! │  └── ValidationError  - Input / catalog validation failures            │
//! │                                                                         │
//! │  layerline-store errors (separate crate)                               │
//! │  └── StoreError       - Storage read/write failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr + exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations never appear here. Add, remove, update and clear are total
//! over their inputs; the only cart-level failure (an unreadable stored
//! record) is absorbed by the store during hydration.

use thiserror::Error;

use crate::types::PurchaseType;

// =============================================================================
// Core Error
// =============================================================================

/// Core storefront errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Material id is not in the catalog's material list.
    #[error("Material not found: {0}")]
    MaterialNotFound(String),

    /// Color id is not in the catalog's color list.
    #[error("Color not found: {0}")]
    ColorNotFound(String),

    /// The product is not sold in the requested form.
    ///
    /// ## When This Occurs
    /// - Adding a `FILE`-only product as `print`
    /// - Quoting a print price for a `FILE`-only product
    #[error("Product {product_id} is not sold as {purchase_type}")]
    PurchaseTypeUnavailable {
        product_id: String,
        purchase_type: PurchaseType,
    },

    /// Catalog JSON could not be decoded.
    #[error("Catalog could not be parsed: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is below its floor.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: String },

    /// A product offers a purchase type without the matching price.
    #[error("Product {product_id} is sold as {purchase_type} but has no {price_field}")]
    MissingPrice {
        product_id: String,
        purchase_type: PurchaseType,
        price_field: String,
    },

    /// A label that does not name any known option.
    #[error("{field} has unknown value '{value}'")]
    UnknownValue { field: String, value: String },

    /// A catalog option exists but this product does not offer it.
    #[error("{field} '{value}' is not available for {product_id}")]
    NotOffered {
        product_id: String,
        field: String,
        value: String,
    },

    /// Duplicate identifier.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
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
        let err = CoreError::PurchaseTypeUnavailable {
            product_id: "dragon-01".to_string(),
            purchase_type: PurchaseType::Print,
        };
        assert_eq!(err.to_string(), "Product dragon-01 is not sold as print");

        let err = CoreError::ProductNotFound("nope".to_string());
        assert_eq!(err.to_string(), "Product not found: nope");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MissingPrice {
            product_id: "vase-02".to_string(),
            purchase_type: PurchaseType::File,
            price_field: "filePrice".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Product vase-02 is sold as file but has no filePrice"
        );

        let err = ValidationError::NotOffered {
            product_id: "miniature-knight".to_string(),
            field: "material".to_string(),
            value: "pla".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "material 'pla' is not available for miniature-knight"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
