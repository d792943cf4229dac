//! # Commands Module
//!
//! One function per CLI command. Each returns a serializable response that
//! also renders as plain text.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Output)
//! ├── product.rs  ◄─── products, show, quote (catalog only)
//! └── cart.rs     ◄─── add, remove, update, clear, cart (open the store)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lib::run(cli)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commands::cart::add_to_cart(&mut session, request)                     │
//! │       │    -> CliResult<CartResponse>                                   │
//! │       ▼                                                                 │
//! │  Output::from_response(&response)                                       │
//! │       ├── text: Display impl                                            │
//! │       └── json: serde_json::to_string_pretty                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::{CliError, CliResult, ErrorCode};

pub mod cart;
pub mod product;

/// A rendered command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    text: String,
    json: String,
}

impl Output {
    /// Renders a response both ways.
    pub fn from_response<T: Serialize + fmt::Display>(response: &T) -> CliResult<Self> {
        let json = serde_json::to_string_pretty(response)
            .map_err(|e| CliError::new(ErrorCode::Internal, e.to_string()))?;
        Ok(Output {
            text: response.to_string(),
            json,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    /// The form selected by `--json`.
    pub fn render(&self, as_json: bool) -> &str {
        if as_json {
            &self.json
        } else {
            &self.text
        }
    }
}
