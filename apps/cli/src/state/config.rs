//! # Configuration State
//!
//! Where the cart lives and which catalog to load.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`, `--catalog`)
//! 2. Environment variables (`LAYERLINE_DATA_DIR` via
//!    [`StoreConfig::from_env`], `LAYERLINE_CATALOG`)
//! 3. Defaults: platform data directory, built-in demo catalog

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use layerline_core::validation::validate_catalog;
use layerline_core::Catalog;
use layerline_store::StoreConfig;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Environment variable naming a catalog JSON file.
pub const CATALOG_ENV: &str = "LAYERLINE_CATALOG";

/// Application configuration, resolved once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// `--data-dir` override. `None` defers to [`StoreConfig::from_env`].
    pub data_dir: Option<PathBuf>,

    /// Catalog file. `None` uses the built-in demo catalog.
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `LAYERLINE_CATALOG`; an empty value counts as unset. The data
    /// directory is resolved later by [`AppConfig::store_config`].
    pub fn from_env() -> Self {
        AppConfig {
            data_dir: None,
            catalog_path: env_path(CATALOG_ENV),
        }
    }

    /// Applies command-line flags on top of this configuration.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, catalog: Option<PathBuf>) -> Self {
        if data_dir.is_some() {
            self.data_dir = data_dir;
        }
        if catalog.is_some() {
            self.catalog_path = catalog;
        }
        self
    }

    /// Storage configuration for the cart record: the flag if given,
    /// otherwise `LAYERLINE_DATA_DIR`, otherwise the platform directory.
    pub fn store_config(&self) -> CliResult<StoreConfig> {
        match &self.data_dir {
            Some(dir) => Ok(StoreConfig::new(dir)),
            None => Ok(StoreConfig::from_env()?),
        }
    }

    /// Loads and validates the configured catalog.
    pub fn load_catalog(&self) -> CliResult<Catalog> {
        match &self.catalog_path {
            Some(path) => load_catalog_file(path),
            None => {
                debug!("using built-in demo catalog");
                Ok(Catalog::demo())
            }
        }
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn load_catalog_file(path: &Path) -> CliResult<Catalog> {
    let raw = fs::read_to_string(path).map_err(|e| {
        CliError::catalog(format!("Could not read catalog {}: {}", path.display(), e))
    })?;

    let catalog = Catalog::from_json(&raw)?;
    validate_catalog(&catalog)
        .map_err(|e| CliError::catalog(format!("Invalid catalog {}: {}", path.display(), e)))?;

    info!(
        path = %path.display(),
        products = catalog.products.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_overrides_win() {
        let config = AppConfig {
            data_dir: None,
            catalog_path: Some(PathBuf::from("/env/catalog.json")),
        }
        .with_overrides(Some(PathBuf::from("/flag/data")), None);

        assert_eq!(config.data_dir, Some(PathBuf::from("/flag/data")));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/env/catalog.json")));
        assert_eq!(
            config.store_config().unwrap().data_dir(),
            Path::new("/flag/data")
        );
    }

    #[test]
    fn test_default_catalog_is_demo() {
        let catalog = AppConfig::default().load_catalog().unwrap();
        assert_eq!(catalog, Catalog::demo());
    }

    #[test]
    fn test_catalog_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, serde_json::to_string(&Catalog::demo()).unwrap()).unwrap();

        let config = AppConfig::default().with_overrides(None, Some(path));
        let loaded = config.load_catalog().unwrap();

        let ids = |c: &Catalog| c.products.iter().map(|p| p.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&loaded), ids(&Catalog::demo()));
        assert_eq!(loaded.colors, Catalog::demo().colors);
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut catalog = Catalog::demo();
        let dup = catalog.products[0].clone();
        catalog.products.push(dup);
        fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let config = AppConfig::default().with_overrides(None, Some(path));
        assert_eq!(config.load_catalog().unwrap_err().code, ErrorCode::CatalogError);
    }

    #[test]
    fn test_missing_catalog_file() {
        let config =
            AppConfig::default().with_overrides(None, Some(PathBuf::from("/no/such/catalog.json")));
        assert_eq!(config.load_catalog().unwrap_err().code, ErrorCode::CatalogError);
    }
}
