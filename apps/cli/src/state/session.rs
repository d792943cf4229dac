//! # Session State
//!
//! The catalog and the open cart store for one invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session::open(config)                                                  │
//! │     ├── load catalog (file or demo, validated)                          │
//! │     └── open_cart(store config) ──► CartStore (hydrated)                │
//! │                                                                         │
//! │  command(&mut session, ...)     every mutation persists                 │
//! │                                                                         │
//! │  session.close()                final persist, storage released         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use layerline_core::Catalog;
use layerline_store::{open_cart, CartStore, FileStorage, Storage};

use super::config::AppConfig;
use crate::error::CliResult;

/// Catalog plus cart store.
#[derive(Debug)]
pub struct Session<S: Storage = FileStorage> {
    pub catalog: Catalog,
    pub cart: CartStore<S>,
}

impl Session<FileStorage> {
    /// Loads the catalog and opens the cart record named by `config`.
    pub fn open(config: &AppConfig) -> CliResult<Self> {
        let catalog = config.load_catalog()?;
        let cart = open_cart(&config.store_config()?)?;
        Ok(Session { catalog, cart })
    }
}

impl<S: Storage> Session<S> {
    pub fn new(catalog: Catalog, cart: CartStore<S>) -> Self {
        Session { catalog, cart }
    }

    /// Closes the cart store and returns its storage.
    pub fn close(self) -> S {
        self.cart.close()
    }
}
