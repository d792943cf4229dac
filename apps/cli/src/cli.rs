//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use layerline_core::{MaterialType, PurchaseFilter, PurchaseType, SizeOption};

#[derive(Debug, Parser)]
#[command(name = "layerline")]
#[command(author, version, about = "Browse 3D models and manage a local cart")]
pub struct Cli {
    /// Directory holding the cart record (env: LAYERLINE_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Catalog JSON file; the built-in demo catalog when unset (env: LAYERLINE_CATALOG)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog products
    Products {
        /// Purchase type tab: all, file or print
        #[arg(long = "type", value_name = "TYPE", default_value_t = PurchaseFilter::All)]
        purchase: PurchaseFilter,

        /// Only products printable in this material (PLA, ABS, PETG, Resin)
        #[arg(long)]
        material: Option<MaterialType>,

        /// Only featured products
        #[arg(long)]
        featured: bool,

        /// Only popular products
        #[arg(long)]
        popular: bool,
    },

    /// Show one product with its print options
    Show {
        product_id: String,
    },

    /// Price a print for a material and size
    Quote {
        product_id: String,

        /// Material id (default: first material the product supports)
        #[arg(long, value_name = "ID")]
        material: Option<String>,

        /// small, medium or large
        #[arg(long, default_value_t = SizeOption::Medium)]
        size: SizeOption,
    },

    /// Add a product to the cart
    Add {
        product_id: String,

        /// file or print
        #[arg(long = "type", value_name = "TYPE")]
        purchase_type: PurchaseType,

        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// Print material id
        #[arg(long, value_name = "ID")]
        material: Option<String>,

        /// Print color id
        #[arg(long, value_name = "ID")]
        color: Option<String>,

        /// Print size
        #[arg(long)]
        size: Option<SizeOption>,
    },

    /// Remove a cart line
    Remove {
        product_id: String,

        #[arg(long = "type", value_name = "TYPE")]
        purchase_type: PurchaseType,
    },

    /// Set a cart line's quantity; zero or less removes it
    Update {
        product_id: String,

        #[arg(long = "type", value_name = "TYPE")]
        purchase_type: PurchaseType,

        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,

    /// Show cart lines and totals
    Cart,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "layerline", "add", "spiral-vase", "--type", "print", "--quantity", "2", "--size",
            "large", "--material", "petg",
        ])
        .unwrap();

        match cli.command {
            Command::Add {
                product_id,
                purchase_type,
                quantity,
                material,
                color,
                size,
            } => {
                assert_eq!(product_id, "spiral-vase");
                assert_eq!(purchase_type, PurchaseType::Print);
                assert_eq!(quantity, 2);
                assert_eq!(material.as_deref(), Some("petg"));
                assert_eq!(color, None);
                assert_eq!(size, Some(SizeOption::Large));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["layerline", "cart", "--json", "--data-dir", "/tmp/x"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_products_defaults_and_filters() {
        let cli = Cli::try_parse_from(["layerline", "products"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Products {
                purchase: PurchaseFilter::All,
                material: None,
                ..
            }
        ));

        let cli =
            Cli::try_parse_from(["layerline", "products", "--type", "print", "--material", "abs"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Products {
                purchase: PurchaseFilter::Print,
                material: Some(MaterialType::Abs),
                ..
            }
        ));
    }

    #[test]
    fn test_update_accepts_negative_quantity() {
        let cli = Cli::try_parse_from([
            "layerline", "update", "spiral-vase", "--type", "file", "--quantity", "-1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Update { quantity: -1, .. }));
    }

    #[test]
    fn test_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["layerline", "add", "x", "--type", "gift"]).is_err());
        assert!(Cli::try_parse_from(["layerline", "add", "x"]).is_err());
    }
}
