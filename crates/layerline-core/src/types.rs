//! # Domain Types
//!
//! Core domain types used throughout Layerline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Material     │   │     Color       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  type FILE/     │   │  name PLA/ABS/  │   │  name           │       │
//! │  │   PRINT/BOTH    │   │   PETG/Resin    │   │  hex            │       │
//! │  │  file_price     │   │  multiplier     │   └─────────────────┘       │
//! │  │  print_base_    │   └─────────────────┘                             │
//! │  │   price         │                                                    │
//! │  └────────┬────────┘                                                    │
//! │           │ (embedded copy)                                             │
//! │  ┌────────▼──────────────────────────────────────────────┐             │
//! │  │  CartLineItem                                         │             │
//! │  │  product • type file|print • quantity ≥ 1             │             │
//! │  │  selected_options { material?, color?, size? }        │             │
//! │  └───────────────────────────────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names and enum spellings match the JSON the browser storefront keeps
//! in `localStorage` (`filePrice`, `"type": "print"`, `"name": "Resin"`, ...),
//! so a record written by either side round-trips through these types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Type
// =============================================================================

/// How a catalog product is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    /// Digital model download only.
    File,
    /// Printed and shipped only.
    Print,
    /// Either form.
    Both,
}

impl ProductType {
    /// True for `FILE` and `BOTH`.
    #[inline]
    pub const fn offers_file(&self) -> bool {
        matches!(self, ProductType::File | ProductType::Both)
    }

    /// True for `PRINT` and `BOTH`.
    #[inline]
    pub const fn offers_print(&self) -> bool {
        matches!(self, ProductType::Print | ProductType::Both)
    }

    /// Whether a cart line of the given purchase type can be made from this product.
    #[inline]
    pub const fn offers(&self, purchase: PurchaseType) -> bool {
        match purchase {
            PurchaseType::File => self.offers_file(),
            PurchaseType::Print => self.offers_print(),
        }
    }

    /// Wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductType::File => "FILE",
            ProductType::Print => "PRINT",
            ProductType::Both => "BOTH",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Purchase Type
// =============================================================================

/// Which form a cart line represents.
///
/// Together with the product id this is the cart's line key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseType {
    /// Digital file purchase.
    File,
    /// Physical printed product.
    Print,
}

impl PurchaseType {
    /// Wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PurchaseType::File => "file",
            PurchaseType::Print => "print",
        }
    }
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(PurchaseType::File),
            "print" => Ok(PurchaseType::Print),
            _ => Err(ValidationError::UnknownValue {
                field: "purchase type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// File Format
// =============================================================================

/// Downloadable model formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileFormat {
    Stl,
    Obj,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Stl => f.write_str("STL"),
            FileFormat::Obj => f.write_str("OBJ"),
        }
    }
}

// =============================================================================
// Material
// =============================================================================

/// Print material families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MaterialType {
    #[serde(rename = "PLA")]
    Pla,
    #[serde(rename = "ABS")]
    Abs,
    #[serde(rename = "PETG")]
    Petg,
    #[serde(rename = "Resin")]
    Resin,
}

impl MaterialType {
    /// All material families, in display order.
    pub const ALL: [MaterialType; 4] = [
        MaterialType::Pla,
        MaterialType::Abs,
        MaterialType::Petg,
        MaterialType::Resin,
    ];

    /// Wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Pla => "PLA",
            MaterialType::Abs => "ABS",
            MaterialType::Petg => "PETG",
            MaterialType::Resin => "Resin",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialType::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "material".to_string(),
                value: s.to_string(),
            })
    }
}

/// A selectable print material and its price multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: MaterialType,
    /// Factor applied to the print base price (≥ 0, typically 1.0–1.5).
    pub price_multiplier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub icon: Option<String>,
}

// =============================================================================
// Color
// =============================================================================

/// A selectable filament/resin color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Color {
    pub id: String,
    pub name: String,
    /// Display value, e.g. `#1E293B`.
    pub hex: String,
}

// =============================================================================
// Size Option
// =============================================================================

/// Print scale relative to the reference model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SizeOption {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeOption {
    /// Wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SizeOption::Small => "Small",
            SizeOption::Medium => "Medium",
            SizeOption::Large => "Large",
        }
    }
}

impl fmt::Display for SizeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SizeOption::Small),
            "medium" => Ok(SizeOption::Medium),
            "large" => Ok(SizeOption::Large),
            _ => Err(ValidationError::UnknownValue {
                field: "size".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product. Read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub images: Vec<String>,

    /// `FILE`, `PRINT` or `BOTH`.
    #[serde(rename = "type")]
    pub product_type: ProductType,

    /// Price of the downloadable model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub file_price: Option<Money>,

    /// Price of a Medium print in the reference material, before multipliers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub print_base_price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub file_formats: Option<Vec<FileFormat>>,

    /// Materials this model can be printed in. `None` means every material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub materials: Option<Vec<MaterialType>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub license: Option<String>,

    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub popular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<String>,
}

impl Product {
    /// Whether this product can be bought in the given form.
    #[inline]
    pub fn offers(&self, purchase: PurchaseType) -> bool {
        self.product_type.offers(purchase)
    }

    /// The listed price for the given form, if the catalog sets one.
    pub fn listed_price(&self, purchase: PurchaseType) -> Option<Money> {
        match purchase {
            PurchaseType::File => self.file_price,
            PurchaseType::Print => self.print_base_price,
        }
    }

    /// Whether the model can be printed in the given material family.
    pub fn supports_material(&self, material: MaterialType) -> bool {
        self.materials
            .as_ref()
            .map_or(true, |supported| supported.contains(&material))
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    pub fn is_popular(&self) -> bool {
        self.popular.unwrap_or(false)
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// Print options chosen on the product page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub material: Option<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size: Option<SizeOption>,
}

/// One entry in the cart, keyed by (product id, purchase type).
///
/// The product is embedded by value, the same way the browser storefront
/// stores it, so a persisted cart renders without the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product: Product,

    #[serde(rename = "type")]
    pub purchase_type: PurchaseType,

    /// Always ≥ 1 once the line is in a cart.
    pub quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub selected_options: Option<SelectedOptions>,
}

impl CartLineItem {
    /// Creates a line without print options.
    pub fn new(product: Product, purchase_type: PurchaseType, quantity: i64) -> Self {
        CartLineItem {
            product,
            purchase_type,
            quantity,
            selected_options: None,
        }
    }

    /// Attaches print options.
    pub fn with_options(mut self, options: SelectedOptions) -> Self {
        self.selected_options = Some(options);
        self
    }

    /// Whether this line is the one keyed by `(product_id, purchase_type)`.
    #[inline]
    pub fn matches(&self, product_id: &str, purchase_type: PurchaseType) -> bool {
        self.product.id == product_id && self.purchase_type == purchase_type
    }

    /// Price charged per unit: the file price for `file` lines, the print
    /// base price for `print` lines. A missing price counts as zero.
    pub fn unit_price(&self) -> Money {
        crate::pricing::unit_price(&self.product, self.purchase_type)
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// True for `print` lines, which trigger flat shipping.
    #[inline]
    pub fn is_physical(&self) -> bool {
        self.purchase_type == PurchaseType::Print
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product_json() -> &'static str {
        r#"{
            "id": "dragon-01",
            "name": "Articulated Dragon",
            "description": "Print-in-place dragon",
            "shortDescription": "Flexi dragon",
            "images": ["/img/dragon.jpg"],
            "type": "BOTH",
            "filePrice": 100000,
            "printBasePrice": 250000,
            "fileFormats": ["STL", "OBJ"],
            "rating": 4.8,
            "reviewCount": 120,
            "featured": true
        }"#
    }

    #[test]
    fn test_product_deserializes_storefront_shape() {
        let product: Product = serde_json::from_str(product_json()).unwrap();

        assert_eq!(product.product_type, ProductType::Both);
        assert_eq!(product.file_price, Some(Money::from_units(100_000)));
        assert_eq!(product.print_base_price, Some(Money::from_units(250_000)));
        assert_eq!(
            product.file_formats,
            Some(vec![FileFormat::Stl, FileFormat::Obj])
        );
        assert!(product.is_featured());
        assert!(!product.is_popular());
        assert!(product.materials.is_none());
    }

    #[test]
    fn test_product_type_offers() {
        assert!(ProductType::File.offers_file());
        assert!(!ProductType::File.offers_print());
        assert!(ProductType::Print.offers_print());
        assert!(!ProductType::Print.offers_file());
        assert!(ProductType::Both.offers(PurchaseType::File));
        assert!(ProductType::Both.offers(PurchaseType::Print));
    }

    #[test]
    fn test_enum_wire_spellings() {
        assert_eq!(serde_json::to_string(&PurchaseType::Print).unwrap(), "\"print\"");
        assert_eq!(serde_json::to_string(&ProductType::Both).unwrap(), "\"BOTH\"");
        assert_eq!(serde_json::to_string(&MaterialType::Resin).unwrap(), "\"Resin\"");
        assert_eq!(serde_json::to_string(&MaterialType::Petg).unwrap(), "\"PETG\"");
        assert_eq!(serde_json::to_string(&SizeOption::Large).unwrap(), "\"Large\"");
    }

    #[test]
    fn test_parse_labels_case_insensitively() {
        assert_eq!("PRINT".parse::<PurchaseType>().unwrap(), PurchaseType::Print);
        assert_eq!("resin".parse::<MaterialType>().unwrap(), MaterialType::Resin);
        assert_eq!(" large ".parse::<SizeOption>().unwrap(), SizeOption::Large);
        assert!("huge".parse::<SizeOption>().is_err());
        assert!("nylon".parse::<MaterialType>().is_err());
    }

    #[test]
    fn test_supports_material() {
        let mut product: Product = serde_json::from_str(product_json()).unwrap();
        assert!(product.supports_material(MaterialType::Abs));

        product.materials = Some(vec![MaterialType::Pla, MaterialType::Petg]);
        assert!(product.supports_material(MaterialType::Pla));
        assert!(!product.supports_material(MaterialType::Resin));
    }

    #[test]
    fn test_line_item_serializes_type_field() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        let line = CartLineItem::new(product, PurchaseType::File, 2);

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["type"], "file");
        assert_eq!(value["quantity"], 2);
        assert!(value.get("selectedOptions").is_none());
        assert_eq!(line.line_total(), Money::from_units(200_000));
        assert!(!line.is_physical());
    }
}
