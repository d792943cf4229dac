//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  Command Function  ──►  CliResult<T>                                    │
//! │         │                                                               │
//! │         ├── Catalog lookup?  ── CoreError::ProductNotFound ──┐          │
//! │         ├── Bad argument?    ── ValidationError ─────────────┤          │
//! │         ├── Storage?         ── StoreError ──────────────────┤          │
//! │         │                                                    ▼          │
//! │         │                                               CliError        │
//! │         │                                          { code, message }    │
//! │         ▼                                                    │          │
//! │  main.rs: message to stderr (or JSON with --json),           │          │
//! │           exit status from ErrorCode::exit_code ◄────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use layerline_core::{CoreError, ValidationError};
use layerline_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Error returned from a command.
///
/// ## Serialization
/// With `--json`, failures are printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: dragon-99"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, each with its own exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, material or color id not in the catalog
    NotFound,

    /// Argument failed validation
    ValidationError,

    /// The catalog file is unreadable or invalid
    CatalogError,

    /// Reading or writing the cart record failed
    StorageError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code. `2` is left to clap for usage
    /// errors.
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::NotFound => 3,
            ErrorCode::ValidationError => 4,
            ErrorCode::CatalogError => 5,
            ErrorCode::StorageError => 6,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::CatalogError, message)
    }
}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => CliError::not_found("Product", &id),
            CoreError::MaterialNotFound(id) => CliError::not_found("Material", &id),
            CoreError::ColorNotFound(id) => CliError::not_found("Color", &id),
            e @ CoreError::PurchaseTypeUnavailable { .. } => CliError::validation(e.to_string()),
            e @ CoreError::CatalogParse(_) => CliError::catalog(e.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Converts storage errors to CLI errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "storage operation failed");
        CliError::new(ErrorCode::StorageError, err.to_string())
    }
}
