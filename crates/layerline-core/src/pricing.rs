//! # Pricing Module
//!
//! Print price calculator.
//!
//! ## Print Quote
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product page, "Print" tab                                              │
//! │                                                                         │
//! │  print_base_price  250.000 ₫                                            │
//! │        ×                                                                │
//! │  material          PETG   → 1.2                                         │
//! │        ×                                                                │
//! │  size              Large  → 1.5                                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  round(250000 × 1.2 × 1.5) = 450.000 ₫                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The quote is what the product page shows. The cart charges the plain
//! listed price per unit (see [`unit_price`]).

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Material, Product, PurchaseType, SizeOption};

/// Multiplier that leaves a price unchanged.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Maps a size option to its price factor.
///
/// | Size   | Factor |
/// |--------|--------|
/// | Small  | 0.7    |
/// | Medium | 1.0    |
/// | Large  | 1.5    |
pub const fn size_multiplier(size: SizeOption) -> f64 {
    match size {
        SizeOption::Small => 0.7,
        SizeOption::Medium => 1.0,
        SizeOption::Large => 1.5,
    }
}

/// Maps a raw size label (`"Small"`, `"Medium"`, `"Large"`) to its factor.
///
/// The match is exact, as stored records spell it. Anything else, including
/// a different case, falls back to [`NEUTRAL_MULTIPLIER`] instead of failing.
///
/// ```rust
/// use layerline_core::pricing::size_multiplier_for_label;
///
/// assert_eq!(size_multiplier_for_label("Large"), 1.5);
/// assert_eq!(size_multiplier_for_label("large"), 1.0);
/// assert_eq!(size_multiplier_for_label("Gigantic"), 1.0);
/// ```
pub fn size_multiplier_for_label(label: &str) -> f64 {
    match label {
        "Small" => size_multiplier(SizeOption::Small),
        "Medium" => size_multiplier(SizeOption::Medium),
        "Large" => size_multiplier(SizeOption::Large),
        _ => NEUTRAL_MULTIPLIER,
    }
}

/// Applies material and size factors to a base price and rounds to the
/// nearest whole currency unit.
///
/// Pass [`NEUTRAL_MULTIPLIER`] for a factor that does not apply. Inputs are
/// not checked for sign; callers supply non-negative values.
///
/// ```rust
/// use layerline_core::pricing::compute_price;
/// use layerline_core::Money;
///
/// assert_eq!(compute_price(Money::from_units(100_000), 1.2, 1.5).units(), 180_000);
/// ```
pub fn compute_price(base_price: Money, material_multiplier: f64, size_multiplier: f64) -> Money {
    let raw = base_price.units() as f64 * material_multiplier * size_multiplier;
    Money::from_units(raw.round() as i64)
}

/// Print price for a product in a given material and size.
///
/// A product without a print base price quotes at zero.
pub fn print_quote(product: &Product, material: &Material, size: SizeOption) -> Money {
    let base = product.print_base_price.unwrap_or_default();
    compute_price(base, material.price_multiplier, size_multiplier(size))
}

/// Like [`print_quote`], but refuses products that are not sold as prints.
pub fn checked_print_quote(
    product: &Product,
    material: &Material,
    size: SizeOption,
) -> CoreResult<Money> {
    if !product.offers(PurchaseType::Print) {
        return Err(CoreError::PurchaseTypeUnavailable {
            product_id: product.id.clone(),
            purchase_type: PurchaseType::Print,
        });
    }
    Ok(print_quote(product, material, size))
}

/// Per-unit price the cart charges for a line.
///
/// `file` lines use the file price and `print` lines the print base price;
/// a missing price counts as zero.
pub fn unit_price(product: &Product, purchase_type: PurchaseType) -> Money {
    product.listed_price(purchase_type).unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MaterialType, ProductType};

    fn material(multiplier: f64) -> Material {
        Material {
            id: "m".to_string(),
            name: MaterialType::Petg,
            price_multiplier: multiplier,
            icon: None,
        }
    }

    fn product(product_type: ProductType, file: Option<i64>, print: Option<i64>) -> Product {
        Product {
            id: "vase-02".to_string(),
            name: "Spiral Vase".to_string(),
            description: String::new(),
            short_description: String::new(),
            images: vec![],
            product_type,
            file_price: file.map(Money::from_units),
            print_base_price: print.map(Money::from_units),
            file_formats: None,
            materials: None,
            license: None,
            rating: 0.0,
            review_count: 0,
            featured: None,
            popular: None,
            category: None,
        }
    }

    #[test]
    fn test_size_multipliers() {
        assert_eq!(size_multiplier(SizeOption::Small), 0.7);
        assert_eq!(size_multiplier(SizeOption::Medium), 1.0);
        assert_eq!(size_multiplier(SizeOption::Large), 1.5);
    }

    #[test]
    fn test_unknown_size_label_is_neutral() {
        assert_eq!(size_multiplier_for_label("Small"), 0.7);
        assert_eq!(size_multiplier_for_label("small"), 1.0);
        assert_eq!(size_multiplier_for_label("LARGE"), 1.0);
        assert_eq!(size_multiplier_for_label("XL"), 1.0);
        assert_eq!(size_multiplier_for_label(""), 1.0);
    }

    #[test]
    fn test_compute_price_reference_example() {
        let price = compute_price(Money::from_units(100_000), 1.2, 1.5);
        assert_eq!(price.units(), 180_000);
    }

    #[test]
    fn test_compute_price_defaults_are_identity() {
        let base = Money::from_units(123_456);
        assert_eq!(compute_price(base, NEUTRAL_MULTIPLIER, NEUTRAL_MULTIPLIER), base);
    }

    #[test]
    fn test_compute_price_rounds_to_nearest_unit() {
        // 99_999 × 0.7 = 69_999.3
        assert_eq!(compute_price(Money::from_units(99_999), 1.0, 0.7).units(), 69_999);
        // 5 × 1.1 × 1.5 = 8.25
        assert_eq!(compute_price(Money::from_units(5), 1.1, 1.5).units(), 8);
        // 3 × 0.5 = 1.5
        assert_eq!(compute_price(Money::from_units(3), 0.5, 1.0).units(), 2);
    }

    #[test]
    fn test_print_quote() {
        let p = product(ProductType::Both, Some(100_000), Some(250_000));
        let quote = print_quote(&p, &material(1.2), SizeOption::Large);
        assert_eq!(quote.units(), 450_000);

        let small = print_quote(&p, &material(1.0), SizeOption::Small);
        assert_eq!(small.units(), 175_000);
    }

    #[test]
    fn test_checked_print_quote_rejects_file_only() {
        let p = product(ProductType::File, Some(100_000), None);
        let err = checked_print_quote(&p, &material(1.0), SizeOption::Medium).unwrap_err();
        assert!(matches!(err, CoreError::PurchaseTypeUnavailable { .. }));
    }

    #[test]
    fn test_unit_price_missing_is_zero() {
        let p = product(ProductType::Print, None, Some(50_000));
        assert_eq!(unit_price(&p, PurchaseType::Print).units(), 50_000);
        assert!(unit_price(&p, PurchaseType::File).is_zero());
    }
}
