//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod products;
pub mod search;
pub mod wishlist;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products, optionally in one category.
    List {
        /// Only this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product.
    Show {
        /// Product ID.
        id: u32,
    },
    /// List featured products.
    Featured,
    /// List categories.
    Categories,
    /// Show available colors, sizes and price range.
    Filters,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text matched against name, description and category.
    #[arg(default_value = "")]
    pub query: String,

    /// Category ("all" for every category).
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Accepted color (repeatable).
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Accepted size (repeatable).
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Only in-stock products.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort: name, price-low or price-high.
    #[arg(short, long)]
    pub sort: Option<String>,
}

/// Identifies one cart line.
#[derive(Args)]
pub struct LineArgs {
    /// Product ID.
    pub id: u32,

    /// Size of the line.
    #[arg(long)]
    pub size: String,

    /// Color of the line.
    #[arg(long)]
    pub color: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        id: u32,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Size (defaults to the product's first size).
        #[arg(long)]
        size: Option<String>,

        /// Color (defaults to the product's first color).
        #[arg(long)]
        color: Option<String>,
    },
    /// Set the quantity of a line; below 1 removes it.
    Update {
        #[command(flatten)]
        line: LineArgs,

        /// New quantity.
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Remove every line.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: WishlistCommand,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Show saved products.
    Show,
    /// Save a product.
    Add {
        /// Product ID.
        id: u32,
    },
    /// Forget a product.
    Remove {
        /// Product ID.
        id: u32,
    },
    /// Save or forget a product.
    Toggle {
        /// Product ID.
        id: u32,
    },
    /// Forget every product.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Street address.
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub state: String,
    #[arg(long, default_value = "")]
    pub zip_code: String,
    #[arg(long, default_value = vault_commerce::checkout::DEFAULT_COUNTRY)]
    pub country: String,

    #[arg(long, default_value = "")]
    pub card_number: String,
    /// Card expiry, MM/YY.
    #[arg(long, default_value = "")]
    pub expiry_date: String,
    #[arg(long, default_value = "")]
    pub cvv: String,
    #[arg(long, default_value = "")]
    pub cardholder_name: String,

    /// Skip confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List placed orders.
    List,
    /// Show one order.
    Show {
        /// Order ID.
        id: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
