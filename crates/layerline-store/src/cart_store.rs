//! # Cart Store
//!
//! Owns the shopper's [`Cart`] and keeps it in sync with durable storage.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CartStore Lifecycle                              │
//! │                                                                         │
//! │   new(storage)          hydrate()                  close()              │
//! │   ───────────►  ┌──────────────┐  ──────────►  ┌──────────────┐  ─────► │
//! │                 │  UNHYDRATED  │               │   HYDRATED   │  final  │
//! │                 │ writes off   │               │ persist after│  persist│
//! │                 │ memory only  │               │ every change │         │
//! │                 └──────────────┘               └──────────────┘         │
//! │                                                                         │
//! │   hydrate() outcomes:                                                   │
//! │   ├── no record        → Empty                                          │
//! │   ├── valid JSON array → Restored { lines }                             │
//! │   └── anything else    → Discarded (warn!, cart starts empty)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes stay off until hydration has run so that an empty in-memory cart
//! never overwrites a stored one.

use layerline_core::{Cart, CartLineItem, CartTotals, PurchaseType, CART_STORAGE_KEY};
use tracing::{debug, error, info, warn};

use crate::error::StoreResult;
use crate::storage::Storage;

/// Result of reading the stored cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// A record was found and parsed; `lines` is the line count after
    /// normalization.
    Restored { lines: usize },

    /// No record was stored.
    Empty,

    /// A record was stored but could not be used.
    Discarded,
}

/// Cart bound to a storage backend.
///
/// ## Example
/// ```rust
/// use layerline_core::{Catalog, CartLineItem, PurchaseType};
/// use layerline_store::{CartStore, MemoryStorage};
///
/// let catalog = Catalog::demo();
/// let product = catalog.product_by_id("spiral-vase").unwrap().clone();
///
/// let mut store = CartStore::open(MemoryStorage::new());
/// store.add_item(CartLineItem::new(product, PurchaseType::File, 2));
/// assert_eq!(store.totals().total_items, 2);
///
/// let storage = store.close();
/// let reopened = CartStore::open(storage);
/// assert_eq!(reopened.items().len(), 1);
/// ```
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    storage: S,
    key: String,
    cart: Cart,
    hydrated: bool,
}

impl<S: Storage> CartStore<S> {
    /// Creates an unhydrated store using the default `cart` key.
    pub fn new(storage: S) -> Self {
        CartStore::with_key(storage, CART_STORAGE_KEY)
    }

    /// Creates an unhydrated store reading and writing `key`.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        CartStore {
            storage,
            key: key.into(),
            cart: Cart::new(),
            hydrated: false,
        }
    }

    /// Creates a store and hydrates it immediately.
    pub fn open(storage: S) -> Self {
        let mut store = CartStore::new(storage);
        store.hydrate();
        store
    }

    /// Loads the stored cart, replacing whatever is in memory.
    ///
    /// ## Behavior
    /// - Never fails: unreadable or malformed records leave an empty cart.
    /// - Stored lines are normalized on load (repeated keys merged,
    ///   non-positive quantities dropped).
    /// - Enables persistence for all later mutations.
    pub fn hydrate(&mut self) -> HydrationOutcome {
        let outcome = match self.storage.get(&self.key) {
            Ok(None) => {
                self.cart = Cart::new();
                HydrationOutcome::Empty
            }
            Ok(Some(raw)) => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) => {
                    let lines = cart.len();
                    self.cart = cart;
                    HydrationOutcome::Restored { lines }
                }
                Err(e) => {
                    warn!(key = %self.key, error = %e, "discarding unreadable stored cart");
                    self.cart = Cart::new();
                    HydrationOutcome::Discarded
                }
            },
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read stored cart");
                self.cart = Cart::new();
                HydrationOutcome::Discarded
            }
        };

        self.hydrated = true;
        info!(key = %self.key, outcome = ?outcome, "cart hydrated");
        outcome
    }

    /// Whether [`hydrate`](Self::hydrate) has run.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Writes the current cart under the store's key.
    ///
    /// Runs regardless of hydration state; mutations only call it once
    /// hydrated.
    pub fn persist(&mut self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.cart)?;
        self.storage.set(&self.key, &json)?;
        debug!(key = %self.key, lines = self.cart.len(), "cart persisted");
        Ok(())
    }

    /// Final persist, then hands the storage back.
    pub fn close(mut self) -> S {
        if self.hydrated {
            self.persist_logged();
        }
        self.storage
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// See [`Cart::add_item`].
    pub fn add_item(&mut self, item: CartLineItem) {
        self.cart.add_item(item);
        self.after_mutation();
    }

    /// See [`Cart::remove_item`]. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str, purchase_type: PurchaseType) -> bool {
        let removed = self.cart.remove_item(product_id, purchase_type);
        self.after_mutation();
        removed
    }

    /// See [`Cart::update_quantity`]. Returns whether a line was touched.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        purchase_type: PurchaseType,
        quantity: i64,
    ) -> bool {
        let touched = self.cart.update_quantity(product_id, purchase_type, quantity);
        self.after_mutation();
        touched
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.after_mutation();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn after_mutation(&mut self) {
        if self.hydrated {
            self.persist_logged();
        }
    }

    fn persist_logged(&mut self) {
        if let Err(e) = self.persist() {
            error!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStorage;
    use layerline_core::{Catalog, Money, Product};

    fn product(id: &str) -> Product {
        Catalog::demo().product_by_id(id).unwrap().clone()
    }

    /// Storage whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStorage {
        inner: MemoryStorage,
        write_attempts: usize,
    }

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> StoreResult<()> {
            self.write_attempts += 1;
            Err(StoreError::InvalidKey(key.to_string()))
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_open_without_record_is_empty() {
        let mut store = CartStore::new(MemoryStorage::new());
        assert!(!store.is_hydrated());
        assert_eq!(store.hydrate(), HydrationOutcome::Empty);
        assert!(store.is_hydrated());
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_mutations_persist_after_hydration() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(CartLineItem::new(product("spiral-vase"), PurchaseType::File, 1));

        let raw = store.storage().get("cart").unwrap().unwrap();
        let stored: Cart = serde_json::from_str(&raw).unwrap();
        assert_eq!(&stored, store.cart());

        store.clear_cart();
        let raw = store.storage().get("cart").unwrap().unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_mutations_before_hydration_do_not_overwrite() {
        let mut seed = CartStore::open(MemoryStorage::new());
        seed.add_item(CartLineItem::new(product("planter-hex"), PurchaseType::Print, 2));
        let storage = seed.close();
        let before = storage.get("cart").unwrap();

        let mut store = CartStore::new(storage);
        store.clear_cart();
        store.add_item(CartLineItem::new(product("spiral-vase"), PurchaseType::File, 1));
        assert_eq!(store.storage().get("cart").unwrap(), before);

        let outcome = store.hydrate();
        assert_eq!(outcome, HydrationOutcome::Restored { lines: 1 });
        assert_eq!(store.items()[0].product.id, "planter-hex");
        assert_eq!(store.items()[0].quantity, 2);
    }

    #[test]
    fn test_malformed_record_is_discarded() {
        for raw in ["{not json", "{\"a\":1}", "42", "[{\"quantity\":1}]"] {
            let mut store = CartStore::new(MemoryStorage::with_entry("cart", raw));
            assert_eq!(store.hydrate(), HydrationOutcome::Discarded, "record {raw}");
            assert!(store.items().is_empty());
        }
    }

    #[test]
    fn test_write_failure_does_not_fail_mutation() {
        let mut store = CartStore::open(ReadOnlyStorage::default());
        store.add_item(CartLineItem::new(product("miniature-knight"), PurchaseType::Print, 1));

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.totals().shipping, Money::from_units(30_000));
        assert!(store.persist().is_err());

        let storage = store.close();
        assert_eq!(storage.write_attempts, 3);
    }

    #[test]
    fn test_custom_key() {
        let mut store = CartStore::with_key(MemoryStorage::new(), "cart-b");
        store.hydrate();
        store.add_item(CartLineItem::new(product("spiral-vase"), PurchaseType::File, 1));

        assert_eq!(store.key(), "cart-b");
        assert!(store.storage().get("cart").unwrap().is_none());
        assert!(store.storage().get("cart-b").unwrap().is_some());
    }

    #[test]
    fn test_close_before_hydration_writes_nothing() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.add_item(CartLineItem::new(product("spiral-vase"), PurchaseType::File, 1));
        let storage = store.close();
        assert!(storage.get("cart").unwrap().is_none());
    }
}
