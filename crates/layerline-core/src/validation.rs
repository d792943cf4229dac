//! # Validation Module
//!
//! Input validation utilities for Layerline.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Argument parsing (CLI)                                       │
//! │  ├── Enum labels (type, size, material) via FromStr                    │
//! │  └── validate_quantity before building a cart line                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog load                                                 │
//! │  └── validate_catalog: prices, multipliers, unique ids                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart reducer                                                 │
//! │  └── Total by construction: bad quantities are ignored or remove       │
//! │      the line, nothing here is an error                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Material, Product, PurchaseType};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity requested by a user.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// No upper bound: the cart accepts any positive quantity.
///
/// ```rust
/// use layerline_core::validation::validate_quantity;
///
/// assert!(validate_quantity(3).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a listed price.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is a free model
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::TooSmall {
            field: field.to_string(),
            min: "0".to_string(),
        });
    }

    Ok(())
}

/// Validates a material price multiplier: finite and ≥ 0.
pub fn validate_multiplier(multiplier: f64) -> ValidationResult<()> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(ValidationError::TooSmall {
            field: "priceMultiplier".to_string(),
            min: "0".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a catalog product.
///
/// ## Rules
/// - `id` and `name` are non-empty
/// - `FILE`/`BOTH` products carry a `filePrice`
/// - `PRINT`/`BOTH` products carry a `printBasePrice`
/// - Prices are non-negative
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    for (purchase, field) in [
        (PurchaseType::File, "filePrice"),
        (PurchaseType::Print, "printBasePrice"),
    ] {
        match product.listed_price(purchase) {
            Some(price) => validate_price(field, price)?,
            None if product.offers(purchase) => {
                return Err(ValidationError::MissingPrice {
                    product_id: product.id.clone(),
                    purchase_type: purchase,
                    price_field: field.to_string(),
                });
            }
            None => {}
        }
    }

    Ok(())
}

/// Validates a print material.
pub fn validate_material(material: &Material) -> ValidationResult<()> {
    if material.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "material id".to_string(),
        });
    }

    validate_multiplier(material.price_multiplier)
}

/// Validates a whole catalog: every product and material, and unique ids
/// within each list.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for product in &catalog.products {
        validate_product(product)?;
        if !seen.insert(product.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for material in &catalog.materials {
        validate_material(material)?;
        if !seen.insert(material.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "material id".to_string(),
                value: material.id.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for color in &catalog.colors {
        if !seen.insert(color.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "color id".to_string(),
                value: color.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
