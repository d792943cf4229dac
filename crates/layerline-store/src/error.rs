//! # Store Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path or key involved              │
//! │       │                                                                 │
//! │       ├──► CartStore mutations: logged, never returned                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← Only for explicit persist / open calls            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a record file failed.
    ///
    /// ## When This Occurs
    /// - Data directory is read-only
    /// - Disk full
    /// - Record file replaced by a directory
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cart could not be encoded as JSON.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Keys name files, so they are restricted to `[A-Za-z0-9_-]+`.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// No per-user data directory could be determined.
    ///
    /// ## When This Occurs
    /// - No home directory (some containers and service accounts)
    /// - `LAYERLINE_DATA_DIR` unset on such a system
    #[error("Could not determine a data directory; set LAYERLINE_DATA_DIR")]
    DataDirUnavailable,
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid storage key: '../etc'");

        let err = StoreError::io(
            "/data/cart.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error at /data/cart.json: denied");
    }
}
