// src/cli.rs
// Command line surface standing in for the storefront's web pages

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "healthy-breads",
    version,
    about = "Artisanal bakery storefront and admin panel"
)]
pub struct Cli {
    /// JSON configuration file; environment variables are used when absent
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the product catalog with prices and stock
    Catalog,

    /// Place an order
    Order(OrderArgs),

    /// Administration panel
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Args)]
pub struct OrderArgs {
    /// Item to order as <product-id>=<quantity>; repeatable
    #[arg(long = "item", value_name = "ID=QTY", required = true)]
    pub items: Vec<String>,

    /// Customer name
    #[arg(long)]
    pub name: String,

    /// Contact phone
    #[arg(long)]
    pub phone: String,

    /// Delivery address
    #[arg(long)]
    pub address: String,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Start an admin session
    Login,

    /// End the admin session
    Logout,

    /// List products with their stock levels
    Inventory,

    /// Set one product's stock level
    SetStock {
        /// Product id
        product_id: String,

        /// New stock level
        stock: u32,
    },

    /// List past orders, oldest first
    Orders,

    /// Export the inventory snapshot as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Split an `<id>=<qty>` item argument. The quantity keeps its sign here;
/// the checkout session's clamping is what zeroes negative input.
pub fn parse_item(raw: &str) -> Result<(String, i64), String> {
    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not of the form <product-id>=<quantity>", raw))?;

    if id.is_empty() {
        return Err(format!("'{}' has an empty product id", raw));
    }

    let quantity: i64 = qty
        .trim()
        .parse()
        .map_err(|_| format!("'{}' has a non-numeric quantity", raw))?;

    Ok((id.to_string(), quantity))
}
