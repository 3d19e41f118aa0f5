//! Ridgeline CLI - Command-line storefront.
//!
//! Every storefront operation is exposed as a subcommand:
//!
//! ```bash
//! ridgeline auth login -e ada@example.com -p "correct horse"
//! ridgeline products list --category soccer
//! ridgeline cart add 3 --quantity 2
//! ridgeline checkout --address "1 Main St" --card-number "4111 1111 1111 1111" --expiry 12/27 --cvv 123
//! ridgeline orders show 41
//! ```
//!
//! Configuration comes from the environment (see `ridgeline-client`):
//! `RIDGELINE_API_URL` is required, `RIDGELINE_API_TIMEOUT_SECS` and
//! `RIDGELINE_SESSION_FILE` are optional.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod commands;

use clap::{Parser, Subcommand};
use ridgeline_client::{ClientConfig, Storefront};
use ridgeline_core::Category;

#[derive(Parser)]
#[command(name = "ridgeline")]
#[command(about = "Command-line storefront for the Ridgeline backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign out, and inspect the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Price the cart and pay for it in one step
    Checkout {
        /// Billing address for the order
        #[arg(long)]
        address: String,
        /// Card number (spaces and tabs are ignored)
        #[arg(long)]
        card_number: String,
        /// Card expiry in MM/YY form
        #[arg(long)]
        expiry: String,
        /// Card security code
        #[arg(long)]
        cvv: String,
    },
    /// Review past orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// View and edit the account profile
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Check whether the backend is reachable
    Health,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Create an account and sign in
    Register {
        /// First name
        #[arg(long)]
        first_name: String,
        /// Last name
        #[arg(long)]
        last_name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Sign in with an existing account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show who is signed in
    Status,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered by category
    List {
        /// Category filter: all, soccer, basketball, running, fitness, or other
        #[arg(short, long, default_value = "all")]
        category: Category,
    },
    /// Search products by free text
    Search {
        /// Search terms
        query: String,
    },
    /// Show one product in detail
    Show {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: i64,
        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line from the cart
    Remove {
        /// Cart item id (see `cart show`)
        item_id: i64,
    },
    /// Change the quantity of a cart line
    SetQuantity {
        /// Cart item id (see `cart show`)
        item_id: i64,
        /// New quantity (must be at least 1)
        quantity: u32,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List past orders
    List,
    /// Show one order in detail
    Show {
        /// Order id
        id: i64,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Show the account profile
    Show,
    /// Replace the profile fields (email cannot change)
    Update {
        /// First name
        #[arg(long)]
        first_name: String,
        /// Last name
        #[arg(long)]
        last_name: String,
        /// Birth date in YYYY-MM-DD form
        #[arg(long)]
        birth_date: chrono::NaiveDate,
        /// Shipping address
        #[arg(long)]
        shipping_address: String,
    },
    /// Change the account password
    ChangePassword {
        /// Current password
        #[arg(long)]
        current: String,
        /// New password (at least 8 characters)
        #[arg(long)]
        new: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let storefront = Storefront::new(&config);

    let result = dispatch(cli.command, &storefront).await;

    // A command that died because the whole backend is down reads better
    // with that said outright than as a bare transport error.
    if result.is_err() && storefront.probe_health().await.is_err() {
        tracing::error!(
            "The backend at {} is unreachable. Is the server running?",
            config.api_url
        );
    }

    result
}

async fn dispatch(
    command: Commands,
    storefront: &Storefront,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Auth { action } => match action {
            AuthAction::Register {
                first_name,
                last_name,
                email,
                password,
            } => {
                commands::auth::register(storefront, &first_name, &last_name, &email, &password)
                    .await?;
            }
            AuthAction::Login { email, password } => {
                commands::auth::login(storefront, &email, &password).await?;
            }
            AuthAction::Logout => commands::auth::logout(storefront).await,
            AuthAction::Status => commands::auth::status(storefront).await,
        },
        Commands::Products { action } => match action {
            ProductsAction::List { category } => {
                commands::products::list(storefront, category).await?;
            }
            ProductsAction::Search { query } => {
                commands::products::search(storefront, &query).await?;
            }
            ProductsAction::Show { id } => commands::products::show(storefront, id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(storefront).await?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(storefront, id, quantity).await?;
            }
            CartAction::Remove { item_id } => commands::cart::remove(storefront, item_id).await?,
            CartAction::SetQuantity { item_id, quantity } => {
                commands::cart::set_quantity(storefront, item_id, quantity).await?;
            }
        },
        Commands::Checkout {
            address,
            card_number,
            expiry,
            cvv,
        } => commands::checkout::run(storefront, &address, &card_number, &expiry, &cvv).await?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(storefront).await?,
            OrdersAction::Show { id } => commands::orders::show(storefront, id).await?,
        },
        Commands::Account { action } => match action {
            AccountAction::Show => commands::account::show(storefront).await?,
            AccountAction::Update {
                first_name,
                last_name,
                birth_date,
                shipping_address,
            } => {
                commands::account::update(
                    storefront,
                    &first_name,
                    &last_name,
                    birth_date,
                    &shipping_address,
                )
                .await?;
            }
            AccountAction::ChangePassword { current, new } => {
                commands::account::change_password(storefront, &current, &new).await?;
            }
        },
        Commands::Health => {
            storefront.probe_health().await?;
            tracing::info!("Backend is healthy");
        }
    }

    Ok(())
}
