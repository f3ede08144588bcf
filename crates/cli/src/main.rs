//! Lustre CLI - Browse the catalog and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # First page of products, cheapest first
//! lustre products list --sort price
//!
//! # Search by title within a vendor
//! lustre products list --search serum --vendor Lustre
//!
//! # Product detail with sizes and colors
//! lustre products show rose-serum
//!
//! # Product types and vendors for filtering
//! lustre products filters
//!
//! # Cart management
//! lustre cart add velvet-lip-tint --size M --color Rose --quantity 2
//! lustre cart set gid://shopify/ProductVariant/44012345 3
//! lustre cart remove gid://shopify/ProductVariant/44012345
//! lustre cart show
//! lustre cart clear
//! ```
//!
//! # Commands
//!
//! - `products` - Catalog listing, detail and filter enumeration
//! - `cart` - Show and mutate the cart stored under `LUSTRE_CART_DIR`

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use lustre_storefront::VariantSelection;
use lustre_storefront::shopify::{MAX_PAGE_SIZE, ProductSortKey};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lustre")]
#[command(author, version, about = "Lustre storefront CLI")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List one page of products
    List {
        /// Page size, 1 to 250 (defaults to `LUSTRE_PAGE_SIZE`)
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=MAX_PAGE_SIZE))]
        first: Option<i64>,

        /// Continue after this cursor
        #[arg(short, long)]
        after: Option<String>,

        /// Sort key (`title` or `price`)
        #[arg(short, long, default_value = "title")]
        sort: ProductSortKey,

        /// Sort descending
        #[arg(short, long)]
        reverse: bool,

        /// Title substring
        #[arg(long, default_value = "")]
        search: String,

        /// Product type
        #[arg(long = "type", default_value = "")]
        product_type: String,

        /// Vendor
        #[arg(long, default_value = "")]
        vendor: String,
    },
    /// Show one product by handle
    Show {
        /// Product handle
        handle: String,
    },
    /// List product types and vendors (sampled from the first 250 products)
    Filters,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add units of a product variant
    Add {
        /// Product handle
        handle: String,

        /// Variant ID
        #[arg(long)]
        variant: Option<String>,

        /// Size option
        #[arg(long)]
        size: Option<String>,

        /// Color option
        #[arg(long, requires = "size")]
        color: Option<String>,

        /// Units to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a line item
    Remove {
        /// Line item (variant) ID
        id: String,
    },
    /// Set a line item's quantity (below 1 removes it)
    Set {
        /// Line item (variant) ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "lustre=info,lustre_storefront=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let ctx = commands::Context::from_env(cli.json)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                first,
                after,
                sort,
                reverse,
                search,
                product_type,
                vendor,
            } => {
                let options = commands::products::ListArgs {
                    first,
                    after,
                    sort,
                    reverse,
                    search,
                    product_type,
                    vendor,
                };
                commands::products::list(ctx, options).await?;
            }
            ProductsAction::Show { handle } => commands::products::show(ctx, &handle).await?,
            ProductsAction::Filters => commands::products::filters(ctx).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(ctx)?,
            CartAction::Add {
                handle,
                variant,
                size,
                color,
                quantity,
            } => {
                let selection = VariantSelection {
                    variant_id: variant,
                    size,
                    color,
                };
                commands::cart::add(ctx, &handle, &selection, quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(ctx, &id)?,
            CartAction::Set { id, quantity } => commands::cart::set_quantity(ctx, &id, quantity)?,
            CartAction::Clear => commands::cart::clear(ctx)?,
        },
    }
    Ok(())
}
