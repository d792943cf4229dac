//! # layerline-core: Pure Storefront Logic for Layerline
//!
//! This crate is the **heart** of Layerline. It contains the storefront logic
//! as pure functions and plain data, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Layerline Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Views (CLI / web storefront)                 │   │
//! │  │    Product list ──► Product detail ──► Cart page                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  layerline-store (CartStore)                    │   │
//! │  │         hydrate ──► mutate ──► persist after every change       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ layerline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │ pricing  │ │   cart   │ │ catalog  │          │   │
//! │  │   │ Product  │ │  quote   │ │ add/rm/  │ │ filter   │          │   │
//! │  │   │ Material │ │  size ×  │ │ totals   │ │ lookup   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Material, Color, CartLineItem, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Print price calculator
//! - [`cart`] - Cart reducer and derived totals
//! - [`catalog`] - Static catalog lookup and filtering
//! - [`validation`] - Catalog validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use layerline_core::pricing::compute_price;
//! use layerline_core::Money;
//!
//! // PETG (×1.2) at Large (×1.5) on a 100.000 ₫ base
//! let price = compute_price(Money::from_units(100_000), 1.2, 1.5);
//! assert_eq!(price.units(), 180_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use catalog::{Catalog, ProductFilter, PurchaseFilter};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart record lives under.
///
/// The browser storefront uses the same key in `localStorage`, so a record
/// written by either side can be read by the other.
pub const CART_STORAGE_KEY: &str = "cart";

/// Flat shipping charge applied once per cart when any printed item is present.
pub const FLAT_SHIPPING: Money = Money::from_units(30_000);

/// Shown wherever a checkout action would be.
pub const CHECKOUT_NOTICE: &str = "demo UI — checkout not implemented";
