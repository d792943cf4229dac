//! # Catalog Module
//!
//! The static product catalog: products, print materials and colors, with
//! lookup and listing filters.
//!
//! ## Listing Filter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Filter tab        Matches product type                                 │
//! │  ──────────        ────────────────────                                 │
//! │  all               FILE, PRINT, BOTH                                    │
//! │  file              FILE, BOTH                                           │
//! │  print             PRINT, BOTH                                          │
//! │                                                                         │
//! │  + material (optional): product.materials contains it,                  │
//! │    or the product does not restrict materials                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is read-only input. Filtering borrows from it and keeps
//! catalog order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{
    Color, FileFormat, Material, MaterialType, Product, ProductType, PurchaseType,
};

// =============================================================================
// Filters
// =============================================================================

/// The purchase-type tab on the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseFilter {
    #[default]
    All,
    File,
    Print,
}

impl PurchaseFilter {
    /// Whether a product type passes this tab.
    pub const fn admits(&self, product_type: ProductType) -> bool {
        match self {
            PurchaseFilter::All => true,
            PurchaseFilter::File => product_type.offers_file(),
            PurchaseFilter::Print => product_type.offers_print(),
        }
    }
}

impl From<PurchaseType> for PurchaseFilter {
    fn from(purchase: PurchaseType) -> Self {
        match purchase {
            PurchaseType::File => PurchaseFilter::File,
            PurchaseType::Print => PurchaseFilter::Print,
        }
    }
}

impl fmt::Display for PurchaseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PurchaseFilter::All => "all",
            PurchaseFilter::File => "file",
            PurchaseFilter::Print => "print",
        })
    }
}

impl FromStr for PurchaseFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PurchaseFilter::All),
            "file" => Ok(PurchaseFilter::File),
            "print" => Ok(PurchaseFilter::Print),
            _ => Err(ValidationError::UnknownValue {
                field: "filter".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Caller-held listing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductFilter {
    pub purchase: PurchaseFilter,
    pub material: Option<MaterialType>,
    /// Keep only products flagged `featured`.
    pub featured: bool,
    /// Keep only products flagged `popular`.
    pub popular: bool,
}

impl ProductFilter {
    /// Filter that admits every product.
    pub fn all() -> Self {
        ProductFilter::default()
    }

    pub fn purchase(mut self, purchase: PurchaseFilter) -> Self {
        self.purchase = purchase;
        self
    }

    pub fn material(mut self, material: MaterialType) -> Self {
        self.material = Some(material);
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn popular(mut self, popular: bool) -> Self {
        self.popular = popular;
        self
    }

    /// Whether a product passes every criterion that is set.
    pub fn matches(&self, product: &Product) -> bool {
        self.purchase.admits(product.product_type)
            && self
                .material
                .map_or(true, |m| product.supports_material(m))
            && (!self.featured || product.is_featured())
            && (!self.popular || product.is_popular())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Static catalog data: products plus the fixed material and color lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub materials: Vec<Material>,
    pub colors: Vec<Color>,
}

impl Catalog {
    /// Parses a catalog from JSON.
    ///
    /// Parsing only checks shape. Run
    /// [`validate_catalog`](crate::validation::validate_catalog) to enforce
    /// prices and unique ids.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a ProductFilter) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`product_by_id`](Self::product_by_id) but with a typed error.
    pub fn require_product(&self, id: &str) -> CoreResult<&Product> {
        self.product_by_id(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    pub fn material_by_id(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn require_material(&self, id: &str) -> CoreResult<&Material> {
        self.material_by_id(id)
            .ok_or_else(|| CoreError::MaterialNotFound(id.to_string()))
    }

    /// First material of the given family.
    pub fn material_by_type(&self, material: MaterialType) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == material)
    }

    pub fn color_by_id(&self, id: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn require_color(&self, id: &str) -> CoreResult<&Color> {
        self.color_by_id(id)
            .ok_or_else(|| CoreError::ColorNotFound(id.to_string()))
    }

    /// Material preselected on the product page (the first one listed).
    pub fn default_material(&self) -> Option<&Material> {
        self.materials.first()
    }

    /// Catalog materials the product can be printed in, in catalog order.
    pub fn materials_for<'a>(&'a self, product: &'a Product) -> impl Iterator<Item = &'a Material> + 'a {
        self.materials
            .iter()
            .filter(move |m| product.supports_material(m.name))
    }

    /// Material preselected for a product: the first one it supports.
    pub fn default_material_for(&self, product: &Product) -> Option<&Material> {
        self.materials
            .iter()
            .find(|m| product.supports_material(m.name))
    }

    /// Color preselected on the product page (the first one listed).
    pub fn default_color(&self) -> Option<&Color> {
        self.colors.first()
    }

    /// Built-in demo catalog.
    pub fn demo() -> Self {
        Catalog {
            products: demo_products(),
            materials: vec![
                demo_material("pla", MaterialType::Pla, 1.0),
                demo_material("abs", MaterialType::Abs, 1.1),
                demo_material("petg", MaterialType::Petg, 1.2),
                demo_material("resin", MaterialType::Resin, 1.5),
            ],
            colors: vec![
                demo_color("white", "Trắng", "#F8FAFC"),
                demo_color("black", "Đen", "#0F172A"),
                demo_color("gray", "Xám", "#64748B"),
                demo_color("red", "Đỏ", "#DC2626"),
                demo_color("blue", "Xanh dương", "#2563EB"),
                demo_color("orange", "Cam", "#F97316"),
            ],
        }
    }
}

// =============================================================================
// Demo Data
// =============================================================================

fn demo_material(id: &str, name: MaterialType, price_multiplier: f64) -> Material {
    Material {
        id: id.to_string(),
        name,
        price_multiplier,
        icon: None,
    }
}

fn demo_color(id: &str, name: &str, hex: &str) -> Color {
    Color {
        id: id.to_string(),
        name: name.to_string(),
        hex: hex.to_string(),
    }
}

struct DemoProduct {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    product_type: ProductType,
    file_price: Option<i64>,
    print_base_price: Option<i64>,
    materials: Option<&'static [MaterialType]>,
    rating: f64,
    review_count: u32,
    featured: bool,
    popular: bool,
}

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        id: "articulated-dragon",
        name: "Articulated Dragon",
        category: "Toys",
        product_type: ProductType::Both,
        file_price: Some(120_000),
        print_base_price: Some(350_000),
        materials: Some(&[MaterialType::Pla, MaterialType::Petg]),
        rating: 4.9,
        review_count: 214,
        featured: true,
        popular: true,
    },
    DemoProduct {
        id: "spiral-vase",
        name: "Spiral Vase",
        category: "Home",
        product_type: ProductType::Both,
        file_price: Some(60_000),
        print_base_price: Some(180_000),
        materials: None,
        rating: 4.6,
        review_count: 88,
        featured: true,
        popular: false,
    },
    DemoProduct {
        id: "cable-organizer",
        name: "Desk Cable Organizer",
        category: "Office",
        product_type: ProductType::File,
        file_price: Some(25_000),
        print_base_price: None,
        materials: None,
        rating: 4.3,
        review_count: 41,
        featured: false,
        popular: true,
    },
    DemoProduct {
        id: "miniature-knight",
        name: "Miniature Knight",
        category: "Tabletop",
        product_type: ProductType::Print,
        file_price: None,
        print_base_price: Some(90_000),
        materials: Some(&[MaterialType::Resin]),
        rating: 4.8,
        review_count: 132,
        featured: true,
        popular: true,
    },
    DemoProduct {
        id: "planter-hex",
        name: "Hexagon Planter",
        category: "Garden",
        product_type: ProductType::Both,
        file_price: Some(45_000),
        print_base_price: Some(150_000),
        materials: Some(&[MaterialType::Pla, MaterialType::Petg, MaterialType::Abs]),
        rating: 4.5,
        review_count: 57,
        featured: false,
        popular: true,
    },
    DemoProduct {
        id: "phone-stand",
        name: "Adjustable Phone Stand",
        category: "Office",
        product_type: ProductType::Print,
        file_price: None,
        print_base_price: Some(80_000),
        materials: Some(&[MaterialType::Pla, MaterialType::Abs, MaterialType::Petg]),
        rating: 4.4,
        review_count: 73,
        featured: false,
        popular: false,
    },
    DemoProduct {
        id: "gear-bearing",
        name: "Planetary Gear Bearing",
        category: "Mechanical",
        product_type: ProductType::File,
        file_price: Some(35_000),
        print_base_price: None,
        materials: None,
        rating: 4.7,
        review_count: 96,
        featured: true,
        popular: false,
    },
    DemoProduct {
        id: "lithophane-lamp",
        name: "Lithophane Moon Lamp",
        category: "Home",
        product_type: ProductType::Both,
        file_price: Some(150_000),
        print_base_price: Some(420_000),
        materials: Some(&[MaterialType::Pla, MaterialType::Resin]),
        rating: 4.9,
        review_count: 167,
        featured: false,
        popular: true,
    },
];

fn demo_products() -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|d| Product {
            id: d.id.to_string(),
            name: d.name.to_string(),
            description: format!("{}. Download the model or order a finished print.", d.name),
            short_description: d.name.to_string(),
            images: vec![format!("/images/products/{}.jpg", d.id)],
            product_type: d.product_type,
            file_price: d.file_price.map(Money::from_units),
            print_base_price: d.print_base_price.map(Money::from_units),
            file_formats: d
                .product_type
                .offers_file()
                .then(|| vec![FileFormat::Stl, FileFormat::Obj]),
            materials: d.materials.map(<[MaterialType]>::to_vec),
            license: d
                .product_type
                .offers_file()
                .then(|| "CC BY-NC 4.0".to_string()),
            rating: d.rating,
            review_count: d.review_count,
            featured: Some(d.featured),
            popular: Some(d.popular),
            category: Some(d.category.to_string()),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
