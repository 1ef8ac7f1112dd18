//! FASCO CLI - Storefront page entry points.
//!
//! # Usage
//!
//! ```bash
//! # Browse the shop listing with filters and sorting
//! fasco shop --size M --brand Acme --sort price-low --page 1
//!
//! # View a single product
//! fasco product velvet-jacket
//!
//! # Cart operations
//! fasco cart add velvet-jacket --color red --size M --quantity 2
//! fasco cart show
//! fasco cart decrement velvet-jacket --color red --size M
//! fasco cart clear
//!
//! # Checkout summary
//! fasco checkout
//!
//! # Rate a product
//! fasco rate velvet-jacket 5
//! ```
//!
//! # Environment Variables
//!
//! - `FASCO_API_URL` - Catalog endpoint (default: `http://localhost:3000/products`)
//! - `FASCO_DATA_DIR` - Data directory for persisted state (default: `.fasco`)
//! - `FASCO_PAGE_SIZE` - Products per listing page (default: 9)

#![cfg_attr(not(test), forbid(unsafe_code))]
// This binary's output is its user interface
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fasco")]
#[command(author, version, about = "FASCO storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product listing with filters and sorting
    Shop {
        /// Filter by size (repeatable)
        #[arg(long = "size")]
        sizes: Vec<String>,

        /// Filter by color value (repeatable)
        #[arg(long = "color")]
        colors: Vec<String>,

        /// Filter by price range, e.g. "50-100" (repeatable)
        #[arg(long = "price")]
        prices: Vec<String>,

        /// Filter by brand (repeatable)
        #[arg(long = "brand")]
        brands: Vec<String>,

        /// Filter by tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Restrict to a collection
        #[arg(long)]
        collection: Option<String>,

        /// Sort order: newest, price-low, price-high, best-selling
        #[arg(long)]
        sort: Option<String>,

        /// Grid page to show
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Search product titles instead of listing the grid
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single product page
    Product {
        /// Product slug (or numeric ID)
        slug: String,
    },
    /// Cart operations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show products with an active discount
    Deals,
    /// Show the checkout summary
    Checkout,
    /// Rate a product 1-5 stars
    Rate {
        /// Product slug (or numeric ID)
        slug: String,

        /// Stars, 1-5
        stars: u8,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product slug (or numeric ID)
        slug: String,

        /// Color value; defaults to the product's first color
        #[arg(long)]
        color: Option<String>,

        /// Size label; defaults to the product's first size
        #[arg(long)]
        size: Option<String>,

        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Show cart contents and totals
    Show,
    /// Increase a line's quantity by 1
    Increment {
        slug: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },
    /// Decrease a line's quantity by 1 (removes the line at quantity 1)
    Decrement {
        slug: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },
    /// Remove a line regardless of quantity
    Remove {
        slug: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter; default to warnings only so command
    // output stays readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fasco=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Shop {
            sizes,
            colors,
            prices,
            brands,
            tags,
            collection,
            sort,
            page,
            search,
        } => {
            let options = commands::shop::ShopOptions {
                sizes,
                colors,
                prices,
                brands,
                tags,
                collection,
                sort,
                page,
                search,
            };
            commands::shop::run(&ctx, options).await?;
        }
        Commands::Product { slug } => commands::shop::product(&ctx, &slug).await,
        Commands::Cart { action } => match action {
            CartAction::Add {
                slug,
                color,
                size,
                quantity,
            } => commands::cart::add(&ctx, &slug, color, size, quantity).await,
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Increment { slug, color, size } => {
                commands::cart::adjust(&ctx, &slug, color, size, commands::cart::Adjust::Up).await;
            }
            CartAction::Decrement { slug, color, size } => {
                commands::cart::adjust(&ctx, &slug, color, size, commands::cart::Adjust::Down)
                    .await;
            }
            CartAction::Remove { slug, color, size } => {
                commands::cart::adjust(&ctx, &slug, color, size, commands::cart::Adjust::Remove)
                    .await;
            }
            CartAction::Clear => commands::cart::clear(&ctx),
        },
        Commands::Deals => commands::shop::deals(&ctx).await,
        Commands::Checkout => commands::checkout::run(&ctx),
        Commands::Rate { slug, stars } => commands::rate::run(&ctx, &slug, stars).await,
    }
    Ok(())
}
