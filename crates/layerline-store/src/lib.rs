//! # layerline-store: Cart Persistence for Layerline
//!
//! Durable storage for the shopper's cart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Layerline Data Flow                              │
//! │                                                                         │
//! │  CLI command (layerline add spiral-vase --type print)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  layerline-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │    Storage    │    │ StoreConfig  │  │   │
//! │  │   │(cart_store.rs)│───►│ (storage.rs)  │    │ (config.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ hydrate       │    │ FileStorage   │    │ data_dir     │  │   │
//! │  │   │ mutate+persist│    │ MemoryStorage │    │ cart_key     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     <data_dir>/cart.json                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`cart_store`] - Cart ownership, hydration, persist-after-mutation
//! - [`storage`] - Key-value storage trait and backends
//! - [`config`] - Data directory and key resolution
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use layerline_store::{open_cart, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = open_cart(&config)?;
//! println!("{} lines", store.items().len());
//! # Ok::<(), layerline_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod config;
pub mod error;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartStore, HydrationOutcome};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Opens file storage for `config` and returns a hydrated cart store.
pub fn open_cart(config: &StoreConfig) -> StoreResult<CartStore<FileStorage>> {
    let storage = config.open_storage()?;
    let mut store = CartStore::with_key(storage, config.cart_key.clone());
    store.hydrate();
    Ok(store)
}
