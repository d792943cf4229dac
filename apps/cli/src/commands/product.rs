//! # Product Commands
//!
//! Catalog browsing: the listing with its filter tabs, the product page and
//! print quotes. None of these touch the cart.
//!
//! ## Product Page
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Articulated Dragon (articulated-dragon)                                │
//! │  Toys · BOTH · 4.9 (214 reviews)                                        │
//! │                                                                         │
//! │  File   120.000 ₫                                                       │
//! │  Print  from 350.000 ₫                                                  │
//! │    Materials  PLA ×1 ─► 350.000 ₫   PETG ×1.2 ─► 420.000 ₫            │
//! │    Sizes      Small ×0.7 • Medium ×1 • Large ×1.5                       │
//! │    Colors     white, black, ...                                         │
//! │                                                                         │
//! │  Preselected: first supported material, first color, Medium            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use layerline_core::pricing::{checked_print_quote, print_quote, size_multiplier};
use layerline_core::{
    Catalog, Color, CoreError, Material, MaterialType, Money, Product, ProductFilter, ProductType,
    SizeOption, ValidationError,
};
use serde::Serialize;
use tracing::debug;

use crate::error::CliResult;

const SIZES: [SizeOption; 3] = [SizeOption::Small, SizeOption::Medium, SizeOption::Large];

// =============================================================================
// Listing
// =============================================================================

/// One row of the product listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_base_price: Option<Money>,
    pub rating: f64,
    pub review_count: u32,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        ProductSummary {
            id: product.id.clone(),
            name: product.name.clone(),
            product_type: product.product_type,
            file_price: product.file_price,
            print_base_price: product.print_base_price,
            rating: product.rating,
            review_count: product.review_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductSummary>,
}

impl fmt::Display for ProductListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.products.is_empty() {
            return write!(f, "No products match.");
        }

        write!(
            f,
            "{:<20} {:<24} {:<5} {:>12} {:>12}",
            "ID", "NAME", "TYPE", "FILE", "PRINT FROM"
        )?;
        for p in &self.products {
            write!(
                f,
                "\n{:<20} {:<24} {:<5} {:>12} {:>12}",
                p.id,
                p.name,
                p.product_type.to_string(),
                price_or_dash(p.file_price),
                price_or_dash(p.print_base_price),
            )?;
        }
        Ok(())
    }
}

/// Lists products passing `filter`, in catalog order.
pub fn list_products(catalog: &Catalog, filter: &ProductFilter) -> ProductListResponse {
    debug!(?filter, "products command");

    let products = catalog
        .filter(filter)
        .map(ProductSummary::from)
        .collect();

    ProductListResponse { products }
}

// =============================================================================
// Product Page
// =============================================================================

/// A material with the Medium print price it gives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialQuote {
    pub id: String,
    pub name: MaterialType,
    pub price_multiplier: f64,
    pub price: Money,
}

/// A size with the price it gives in the preselected material.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeQuote {
    pub size: SizeOption,
    pub multiplier: f64,
    pub price: Money,
}

/// Choices shown for print purchases.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    pub materials: Vec<MaterialQuote>,
    pub sizes: Vec<SizeQuote>,
    pub colors: Vec<Color>,
    pub default_material: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,
    pub default_size: SizeOption,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_options: Option<PrintOptions>,
}

impl fmt::Display for ProductDetailResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.product;
        writeln!(f, "{} ({})", p.name, p.id)?;

        let mut meta = Vec::new();
        if let Some(category) = &p.category {
            meta.push(category.clone());
        }
        meta.push(p.product_type.to_string());
        meta.push(format!("{:.1} ({} reviews)", p.rating, p.review_count));
        writeln!(f, "{}", meta.join(" · "))?;

        if !p.description.is_empty() {
            writeln!(f, "\n{}", p.description)?;
        }

        if let Some(price) = p.file_price.filter(|_| p.product_type.offers_file()) {
            write!(f, "\nFile   {}", price)?;
            if let Some(formats) = &p.file_formats {
                let formats: Vec<_> = formats.iter().map(ToString::to_string).collect();
                write!(f, "  [{}]", formats.join(", "))?;
            }
            if let Some(license) = &p.license {
                write!(f, "  {}", license)?;
            }
        }

        if let Some(options) = &self.print_options {
            write!(f, "\nPrint  from {}", price_or_dash(p.print_base_price))?;

            write!(f, "\n  Materials")?;
            for m in &options.materials {
                let marker = if m.id == options.default_material { "*" } else { " " };
                write!(
                    f,
                    "\n   {}{:<6} ×{:<4} {:>12}",
                    marker,
                    m.name.to_string(),
                    m.price_multiplier,
                    m.price.to_string()
                )?;
            }

            write!(f, "\n  Sizes")?;
            for s in &options.sizes {
                let marker = if s.size == options.default_size { "*" } else { " " };
                write!(
                    f,
                    "\n   {}{:<6} ×{:<4} {:>12}",
                    marker,
                    s.size.to_string(),
                    s.multiplier,
                    s.price.to_string()
                )?;
            }

            let colors: Vec<_> = options
                .colors
                .iter()
                .map(|c| format!("{} ({})", c.name, c.id))
                .collect();
            write!(f, "\n  Colors  {}", colors.join(", "))?;
        }

        Ok(())
    }
}

/// Product page data: the product and, for printable products, the
/// material, size and color choices with their prices.
pub fn show_product(catalog: &Catalog, product_id: &str) -> CliResult<ProductDetailResponse> {
    debug!(product_id = %product_id, "show command");

    let product = catalog.require_product(product_id)?;

    let print_options = if product.product_type.offers_print() {
        catalog
            .default_material_for(product)
            .map(|default_material| print_options(catalog, product, default_material))
    } else {
        None
    };

    Ok(ProductDetailResponse {
        product: product.clone(),
        print_options,
    })
}

fn print_options(catalog: &Catalog, product: &Product, default_material: &Material) -> PrintOptions {
    let materials = catalog
        .materials_for(product)
        .map(|m| MaterialQuote {
            id: m.id.clone(),
            name: m.name,
            price_multiplier: m.price_multiplier,
            price: print_quote(product, m, SizeOption::Medium),
        })
        .collect();

    let sizes = SIZES
        .iter()
        .map(|&size| SizeQuote {
            size,
            multiplier: size_multiplier(size),
            price: print_quote(product, default_material, size),
        })
        .collect();

    PrintOptions {
        materials,
        sizes,
        colors: catalog.colors.clone(),
        default_material: default_material.id.clone(),
        default_color: catalog.default_color().map(|c| c.id.clone()),
        default_size: SizeOption::default(),
    }
}

// =============================================================================
// Quote
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub product_id: String,
    pub material: String,
    pub material_multiplier: f64,
    pub size: SizeOption,
    pub size_multiplier: f64,
    pub base_price: Money,
    pub price: Money,
}

impl fmt::Display for QuoteResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} × {} ({}) × {} ({}) = {}",
            self.product_id,
            self.base_price,
            self.material_multiplier,
            self.material,
            self.size_multiplier,
            self.size,
            self.price
        )
    }
}

/// Prices a print of `product_id` in a material and size.
pub fn quote(
    catalog: &Catalog,
    product_id: &str,
    material_id: Option<&str>,
    size: SizeOption,
) -> CliResult<QuoteResponse> {
    debug!(product_id = %product_id, material = ?material_id, size = %size, "quote command");

    let product = catalog.require_product(product_id)?;
    let material = resolve_material(catalog, product, material_id)?;
    let price = checked_print_quote(product, material, size)?;

    Ok(QuoteResponse {
        product_id: product.id.clone(),
        material: material.id.clone(),
        material_multiplier: material.price_multiplier,
        size,
        size_multiplier: size_multiplier(size),
        base_price: product.print_base_price.unwrap_or_default(),
        price,
    })
}

/// Looks up a material by id, or preselects the first one the product
/// supports, and checks the product can be printed in it.
pub(crate) fn resolve_material<'a>(
    catalog: &'a Catalog,
    product: &Product,
    material_id: Option<&str>,
) -> CliResult<&'a Material> {
    let material = match material_id {
        Some(id) => catalog.require_material(id)?,
        None => catalog
            .default_material_for(product)
            .ok_or_else(|| CoreError::MaterialNotFound(format!("any material for {}", product.id)))?,
    };

    if !product.supports_material(material.name) {
        return Err(ValidationError::NotOffered {
            product_id: product.id.clone(),
            field: "material".to_string(),
            value: material.id.clone(),
        }
        .into());
    }

    Ok(material)
}

fn price_or_dash(price: Option<Money>) -> String {
    price.map_or_else(|| "-".to_string(), |p| p.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use layerline_core::PurchaseFilter;

    #[test]
    fn test_list_products_with_filter() {
        let catalog = Catalog::demo();
        let filter = ProductFilter::all()
            .purchase(PurchaseFilter::Print)
            .material(MaterialType::Abs);

        let response = list_products(&catalog, &filter);
        let ids: Vec<_> = response.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["spiral-vase", "planter-hex", "phone-stand"]);
        assert!(response.to_string().starts_with("ID"));
    }

    #[test]
    fn test_list_products_highlights() {
        let catalog = Catalog::demo();
        let filter = ProductFilter::all().featured(true).popular(true);
        let response = list_products(&catalog, &filter);
        assert!(response
            .products
            .iter()
            .any(|p| p.id == "articulated-dragon"));
        assert!(!response.products.iter().any(|p| p.id == "spiral-vase"));
    }

    #[test]
    fn test_empty_listing_text() {
        let response = ProductListResponse { products: vec![] };
        assert_eq!(response.to_string(), "No products match.");
    }

    #[test]
    fn test_show_print_product() {
        let catalog = Catalog::demo();
        let response = show_product(&catalog, "spiral-vase").unwrap();
        let options = response.print_options.unwrap();

        assert_eq!(options.default_material, "pla");
        assert_eq!(options.default_color.as_deref(), Some("white"));
        assert_eq!(options.default_size, SizeOption::Medium);
        assert_eq!(options.materials.len(), 4);

        // 180 000 × 1.2 (PETG) at Medium
        let petg = options.materials.iter().find(|m| m.id == "petg").unwrap();
        assert_eq!(petg.price, Money::from_units(216_000));

        // 180 000 × 1.0 (PLA) × 1.5
        let large = options
            .sizes
            .iter()
            .find(|s| s.size == SizeOption::Large)
            .unwrap();
        assert_eq!(large.price, Money::from_units(270_000));
    }

    #[test]
    fn test_show_file_product_has_no_print_options() {
        let catalog = Catalog::demo();
        let response = show_product(&catalog, "cable-organizer").unwrap();
        assert!(response.print_options.is_none());
        assert!(response.to_string().contains("File"));
    }

    #[test]
    fn test_show_unknown_product() {
        let err = show_product(&Catalog::demo(), "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_quote() {
        let catalog = Catalog::demo();

        let q = quote(&catalog, "articulated-dragon", Some("petg"), SizeOption::Large).unwrap();
        // 350 000 × 1.2 × 1.5
        assert_eq!(q.price, Money::from_units(630_000));

        let q = quote(&catalog, "miniature-knight", None, SizeOption::Small).unwrap();
        assert_eq!(q.material, "resin");
        // 90 000 × 1.5 × 0.7
        assert_eq!(q.price, Money::from_units(94_500));
    }

    #[test]
    fn test_quote_rejects_unsupported_material_and_file_only() {
        let catalog = Catalog::demo();

        let err = quote(&catalog, "miniature-knight", Some("pla"), SizeOption::Medium).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = quote(&catalog, "cable-organizer", None, SizeOption::Medium).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = quote(&catalog, "spiral-vase", Some("gold"), SizeOption::Medium).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
