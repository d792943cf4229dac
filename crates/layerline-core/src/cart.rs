//! # Cart Module
//!
//! The shopping cart as a plain reducer over an ordered line list, plus the
//! derived totals.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                     Effect on items                          │
//! │  ─────────                     ───────────────                          │
//! │                                                                         │
//! │  add_item(line)  ── key seen? ─ yes ─► existing.qty += line.qty         │
//! │                        │                (existing options kept)         │
//! │                        no ───────────► items.push(line)                 │
//! │                                                                         │
//! │  update_quantity(id, type, q) ─ q ≤ 0 ─► remove_item(id, type)          │
//! │                        │                                                │
//! │                        q > 0 ─────────► line.qty = q                    │
//! │                                                                         │
//! │  remove_item(id, type) ───────────────► items.retain(!matches)          │
//! │                                                                         │
//! │  clear() ─────────────────────────────► items.clear()                   │
//! │                                                                         │
//! │  totals() ────────────────────────────► (read only, recomputed)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is total: a missing line is a no-op, not an error.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLineItem, PurchaseType};
use crate::FLAT_SHIPPING;

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per `(product id, purchase type)`; adding a matching
///   line increases its quantity
/// - Every line has quantity ≥ 1; dropping a quantity to ≤ 0 removes the line
/// - Lines keep the order in which their key was first added
///
/// Serializes as the bare JSON array of lines. Deserializing goes through
/// [`Cart::from_items`], so a hand-edited record with duplicate keys or
/// zero quantities still yields a cart that upholds the invariants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart by replaying `add_item` over the given lines.
    ///
    /// Lines with quantity ≤ 0 are skipped and repeated keys are merged
    /// into the first occurrence.
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            cart.add_item(item);
        }
        cart
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up the line keyed by `(product_id, purchase_type)`.
    pub fn find(&self, product_id: &str, purchase_type: PurchaseType) -> Option<&CartLineItem> {
        self.items
            .iter()
            .find(|i| i.matches(product_id, purchase_type))
    }

    /// Adds a line or accumulates its quantity into the matching one.
    ///
    /// ## Behavior
    /// - Key already present: quantity becomes old + new, saturating at
    ///   `i64::MAX`. The existing line's selected options are kept and the
    ///   new ones are dropped.
    /// - Key not present: the line is appended.
    /// - Non-positive quantity: ignored, since it could not form a valid line.
    pub fn add_item(&mut self, item: CartLineItem) {
        if item.quantity <= 0 {
            debug!(
                product_id = %item.product.id,
                purchase_type = %item.purchase_type,
                quantity = item.quantity,
                "ignoring add with non-positive quantity"
            );
            return;
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.matches(&item.product.id, item.purchase_type))
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            debug!(
                product_id = %item.product.id,
                purchase_type = %item.purchase_type,
                quantity = existing.quantity,
                "cart line quantity increased"
            );
            return;
        }

        debug!(
            product_id = %item.product.id,
            purchase_type = %item.purchase_type,
            quantity = item.quantity,
            "cart line added"
        );
        self.items.push(item);
    }

    /// Removes the line keyed by `(product_id, purchase_type)`.
    ///
    /// Returns whether a line was removed; absence is not an error.
    pub fn remove_item(&mut self, product_id: &str, purchase_type: PurchaseType) -> bool {
        let before = self.items.len();
        self.items.retain(|i| !i.matches(product_id, purchase_type));
        let removed = self.items.len() != before;
        if removed {
            debug!(product_id, purchase_type = %purchase_type, "cart line removed");
        }
        removed
    }

    /// Sets a line's quantity; `quantity ≤ 0` removes the line.
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        purchase_type: PurchaseType,
        quantity: i64,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id, purchase_type);
        }

        match self
            .items
            .iter_mut()
            .find(|i| i.matches(product_id, purchase_type))
        {
            Some(item) => {
                item.quantity = quantity;
                debug!(product_id, purchase_type = %purchase_type, quantity, "cart line updated");
                true
            }
            None => false,
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Whether any line is a physical print.
    pub fn has_physical_items(&self) -> bool {
        self.items.iter().any(CartLineItem::is_physical)
    }

    /// Flat rate once per cart when a print is present, otherwise zero.
    ///
    /// Independent of how many print lines there are or their quantities.
    pub fn shipping(&self) -> Money {
        if self.has_physical_items() {
            FLAT_SHIPPING
        } else {
            Money::zero()
        }
    }

    /// Subtotal + shipping.
    pub fn total(&self) -> Money {
        self.subtotal() + self.shipping()
    }

    /// All derived figures in one pass-friendly snapshot.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

/// Cart totals summary. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines.
    pub line_count: usize,
    /// Σ quantity.
    pub total_items: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
    pub has_physical_items: bool,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let shipping = cart.shipping();
        CartTotals {
            line_count: cart.len(),
            total_items: cart.total_items(),
            subtotal,
            shipping,
            total: subtotal + shipping,
            has_physical_items: cart.has_physical_items(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
