//! # State Module
//!
//! Per-invocation state for the CLI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌───────────────────────────────┐   │
//! │  │       AppConfig          │      │          Session              │   │
//! │  │                          │─────►│                               │   │
//! │  │  data_dir (flag/env)     │      │  Catalog (read-only)          │   │
//! │  │  catalog_path (flag/env) │      │  CartStore<FileStorage>       │   │
//! │  └──────────────────────────┘      └───────────────────────────────┘   │
//! │                                                                         │
//! │  Catalog-only commands never open the cart store.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{AppConfig, CATALOG_ENV};
pub use session::Session;
