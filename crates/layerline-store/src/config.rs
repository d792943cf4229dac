//! # Store Configuration
//!
//! Where the cart record lives and under which key.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Explicit path (StoreConfig::new / --data-dir)                       │
//! │  2. LAYERLINE_DATA_DIR environment variable                             │
//! │  3. Platform data dir: ProjectDirs("com", "layerline", "storefront")    │
//! │       Linux:   ~/.local/share/storefront                                │
//! │       macOS:   ~/Library/Application Support/com.layerline.storefront   │
//! │       Windows: %APPDATA%\layerline\storefront\data                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use layerline_core::CART_STORAGE_KEY;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::storage::FileStorage;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LAYERLINE_DATA_DIR";

/// Storage configuration.
///
/// ## Example
/// ```rust,no_run
/// use layerline_store::StoreConfig;
///
/// let config = StoreConfig::new("/tmp/layerline").cart_key("cart-test");
/// let storage = config.open_storage().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding record files.
    pub data_dir: PathBuf,

    /// Key the cart is stored under (default: `cart`).
    pub cart_key: String,
}

impl StoreConfig {
    /// Creates a configuration rooted at `data_dir` with the default key.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            cart_key: CART_STORAGE_KEY.to_string(),
        }
    }

    /// Builder: sets the cart key.
    pub fn cart_key(mut self, key: impl Into<String>) -> Self {
        self.cart_key = key.into();
        self
    }

    /// Resolves the data directory from the environment, falling back to
    /// the platform data directory.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_env_value(env::var_os(DATA_DIR_ENV))
    }

    /// Resolves from a raw `LAYERLINE_DATA_DIR` value. Empty counts as unset.
    pub fn from_env_value(value: Option<OsString>) -> StoreResult<Self> {
        let data_dir = match value {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };

        debug!(data_dir = %data_dir.display(), "store config resolved");
        Ok(StoreConfig::new(data_dir))
    }

    /// Opens file storage at the configured directory.
    pub fn open_storage(&self) -> StoreResult<FileStorage> {
        FileStorage::open(&self.data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Platform data directory for the storefront.
pub fn default_data_dir() -> StoreResult<PathBuf> {
    ProjectDirs::from("com", "layerline", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StoreError::DataDirUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = StoreConfig::new("/tmp/x");
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.data_dir(), Path::new("/tmp/x"));

        let config = config.cart_key("cart-v2");
        assert_eq!(config.cart_key, "cart-v2");
    }

    #[test]
    fn test_env_value_sets_data_dir() {
        let config = StoreConfig::from_env_value(Some(OsString::from("/srv/layerline"))).unwrap();
        assert_eq!(config.data_dir(), Path::new("/srv/layerline"));
        assert_eq!(config.cart_key, "cart");
    }

    #[test]
    fn test_unset_or_empty_env_falls_back_to_platform_dir() {
        let platform = default_data_dir().ok();

        let unset = StoreConfig::from_env_value(None).ok().map(|c| c.data_dir);
        assert_eq!(unset, platform);

        let empty = StoreConfig::from_env_value(Some(OsString::new()))
            .ok()
            .map(|c| c.data_dir);
        assert_eq!(empty, platform);
    }

    #[test]
    fn test_open_storage_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("a").join("b"));

        let storage = config.open_storage().unwrap();
        assert!(storage.root().is_dir());
    }
}
