//! # Layerline CLI Library
//!
//! Argument handling, state setup and command dispatch for the `layerline`
//! binary.
//!
//! ## Module Organization
//! ```text
//! layerline_cli/
//! ├── lib.rs          ◄─── You are here (tracing setup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (flags + env)
//! │   └── session.rs  ◄─── Catalog + CartStore for one run
//! ├── commands/
//! │   ├── mod.rs      ◄─── Output rendering
//! │   ├── product.rs  ◄─── products, show, quote
//! │   └── cart.rs     ◄─── add, remove, update, clear, cart
//! └── error.rs        ◄─── CliError and exit codes
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::fmt;
use std::io::{self, IsTerminal};

use layerline_core::ProductFilter;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::cart::{self, AddRequest};
use commands::product;
use commands::Output;
use error::CliResult;
use state::{AppConfig, Session};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,layerline=info";

/// Runs one parsed command.
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Resolve config ── flags over LAYERLINE_* env over defaults          │
/// │                                                                         │
/// │  2. Catalog commands (products, show, quote)                            │
/// │     • load catalog only                                                 │
/// │                                                                         │
/// │  3. Cart commands (add, remove, update, clear, cart)                    │
/// │     • Session::open: catalog + hydrated CartStore                       │
/// │     • run command (each mutation persists)                              │
/// │     • Session::close: final persist                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> CliResult<Output> {
    let config = AppConfig::from_env().with_overrides(cli.data_dir, cli.catalog);
    debug!(?config, "configuration resolved");

    match cli.command {
        Command::Products {
            purchase,
            material,
            featured,
            popular,
        } => {
            let catalog = config.load_catalog()?;
            let mut filter = ProductFilter::all()
                .purchase(purchase)
                .featured(featured)
                .popular(popular);
            if let Some(material) = material {
                filter = filter.material(material);
            }
            Output::from_response(&product::list_products(&catalog, &filter))
        }

        Command::Show { product_id } => {
            let catalog = config.load_catalog()?;
            Output::from_response(&product::show_product(&catalog, &product_id)?)
        }

        Command::Quote {
            product_id,
            material,
            size,
        } => {
            let catalog = config.load_catalog()?;
            Output::from_response(&product::quote(
                &catalog,
                &product_id,
                material.as_deref(),
                size,
            )?)
        }

        Command::Add {
            product_id,
            purchase_type,
            quantity,
            material,
            color,
            size,
        } => with_session(&config, |session| {
            let request = AddRequest {
                product_id,
                purchase_type,
                quantity,
                material,
                color,
                size,
            };
            cart::add_to_cart(session, request)
        }),

        Command::Remove {
            product_id,
            purchase_type,
        } => with_session(&config, |session| {
            Ok(cart::remove_from_cart(session, &product_id, purchase_type))
        }),

        Command::Update {
            product_id,
            purchase_type,
            quantity,
        } => with_session(&config, |session| {
            Ok(cart::update_cart_item(
                session,
                &product_id,
                purchase_type,
                quantity,
            ))
        }),

        Command::Clear => with_session(&config, |session| Ok(cart::clear_cart(session))),

        Command::Cart => with_session(&config, |session| Ok(cart::get_cart(session))),
    }
}

/// Opens the session, runs `f`, and closes the session whether or not `f`
/// succeeded.
fn with_session<T, F>(config: &AppConfig, f: F) -> CliResult<Output>
where
    T: Serialize + fmt::Display,
    F: FnOnce(&mut Session) -> CliResult<T>,
{
    let mut session = Session::open(config)?;
    let response = f(&mut session);
    session.close();
    Output::from_response(&response?)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays clean for command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=layerline_store=trace` - Trace storage reads and writes
/// - Default: `warn,layerline=info`
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();

    if initialized.is_ok() {
        debug!(version = env!("CARGO_PKG_VERSION"), "layerline starting");
    }
}
