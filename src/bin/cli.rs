//! Stacko CLI
//!
//! Terminal front-end for the inventory API:
//! - Register, log in and out
//! - Browse and edit products and categories
//! - Show dashboard counters
//! - Print and export stock reports

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use stacko::client::{ApiClient, ClientError, InventorySnapshot, Session, SessionStore};
use stacko::config::{generate_default_config, Config};
use stacko::inventory::{
    Category, CategoryCreate, Product, ProductCreate, ProductFilter, ProductUpdate, UserCreate,
    UserLogin, DEFAULT_REORDER_LEVEL,
};
use stacko::report::{
    bar_chart, format_currency, stock_value, write_category_summaries_csv,
    write_distribution_csv, write_products_csv, InventoryReport, StockStatus,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stacko")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inventory management from the terminal")]
#[command(long_about = "Stacko is a client for the Stacko inventory API.\nManage products and categories, watch stock levels and print reports.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },

    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Manage products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Show dashboard counters
    Dashboard,

    /// Stock report: category summaries, distribution, top products, low stock
    Report {
        /// Number of products in the top-by-value list
        #[arg(short, long)]
        top: Option<usize>,
        /// Write the report to a file instead of stdout (json or csv format)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load the sample catalogue into an empty API
    Seed,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List products
    List {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only products at or below their reorder level
        #[arg(long)]
        low_stock: bool,
    },

    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        quantity: i64,
        /// Unit price, e.g. 12.99
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value_t = DEFAULT_REORDER_LEVEL)]
        reorder_level: i64,
        #[arg(long)]
        description: Option<String>,
    },

    /// Change fields of a product
    Update {
        /// Product ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sku: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        reorder_level: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List,

    /// Add a category
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        if e
            .downcast_ref::<ClientError>()
            .map(ClientError::requires_login)
            .unwrap_or(false)
        {
            eprintln!();
            eprintln!("Log in again with:");
            eprintln!("  stacko login --email <email> --password <password>");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    if let Err(e) = stacko::logging::init(&config.logging) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let client = ApiClient::new(&config.api, &config.session)?;
    let store = SessionStore::new(&config.session.file);
    let symbol = config.report.currency_symbol.as_str();

    match cli.command {
        Commands::Register {
            email,
            name,
            password,
        } => {
            let session = client
                .register(&UserCreate {
                    email,
                    password,
                    name,
                })
                .await?;
            store.save(&session)?;
            println!("Registered and logged in as {} <{}>", session.user.name, session.user.email);
        }

        Commands::Login { email, password } => {
            let session = client.login(&UserLogin { email, password }).await?;
            store.save(&session)?;
            println!("Logged in as {} <{}>", session.user.name, session.user.email);
        }

        Commands::Logout => {
            store.clear()?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let session = require_session(&store)?;
            let user = client.me(&session).await?;
            let lifetime = config.session.token_lifetime()?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
                _ => {
                    println!("{} <{}>", user.name, user.email);
                    println!("User ID: {}", user.id);
                    if let Some(at) = session.expires_at(lifetime) {
                        println!("Session expires: {}", at.format("%Y-%m-%d %H:%M UTC"));
                    }
                }
            }
        }

        Commands::Products { command } => {
            let session = require_session(&store)?;
            run_products(&client, &session, command, cli.format, symbol).await?;
        }

        Commands::Categories { command } => {
            let session = require_session(&store)?;
            run_categories(&client, &session, command, cli.format).await?;
        }

        Commands::Dashboard => {
            let session = require_session(&store)?;
            let snapshot = InventorySnapshot::load(&client, &session).await?;
            let reconciliation = snapshot.reconcile();

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&reconciliation)?)
                }
                _ => {
                    let stats = &reconciliation.stats;
                    println!("Welcome back, {}", session.user.name);
                    println!();
                    println!("  Total products:    {}", stats.total_products);
                    println!("  Categories:        {}", stats.total_categories);
                    println!("  Total quantity:    {}", stats.total_quantity);
                    println!(
                        "  Stock value:       {}",
                        format_currency(stats.total_stock_value, symbol)
                    );
                    println!("  Low stock items:   {}", stats.low_stock_count);

                    if !reconciliation.is_consistent() {
                        println!();
                        println!("Note: the server summary differs from the listed records:");
                        for d in &reconciliation.discrepancies {
                            println!(
                                "  {}: server says {}, records give {}",
                                d.field, d.reported, d.derived
                            );
                        }
                    }
                }
            }
        }

        Commands::Report { top, output } => {
            let session = require_session(&store)?;
            let snapshot = InventorySnapshot::load(&client, &session).await?;
            let report = snapshot.report(top.unwrap_or(config.report.top_n));

            match (cli.format, output) {
                (OutputFormat::Table, Some(_)) => {
                    bail!("--output needs --format json or --format csv")
                }
                (OutputFormat::Table, None) => {
                    print_report(&report, config.report.chart_width, symbol)
                }
                (OutputFormat::Json, output) => {
                    let json = serde_json::to_string_pretty(&report)?;
                    write_output(output, json.as_bytes())?;
                }
                (OutputFormat::Csv, output) => {
                    let mut buf = Vec::new();
                    write_category_summaries_csv(&report.categories, &mut buf)?;
                    writeln!(buf)?;
                    write_distribution_csv(&report.distribution, &mut buf)?;
                    write_output(output, &buf)?;
                }
            }
        }

        Commands::Seed => {
            let message = client.seed_data().await?;
            println!("{}", message);
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

async fn run_products(
    client: &ApiClient,
    session: &Session,
    command: ProductCommands,
    format: OutputFormat,
    symbol: &str,
) -> anyhow::Result<()> {
    match command {
        ProductCommands::List {
            category,
            low_stock,
        } => {
            let filter = ProductFilter {
                category,
                low_stock: low_stock.then_some(true),
            };
            let products = client.list_products(session, &filter).await?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&products)?),
                OutputFormat::Csv => write_products_csv(&products, std::io::stdout().lock())?,
                OutputFormat::Table => print_products(&products, symbol),
            }
        }

        ProductCommands::Add {
            name,
            sku,
            category,
            quantity,
            price,
            reorder_level,
            description,
        } => {
            let product = client
                .create_product(
                    session,
                    &ProductCreate {
                        name,
                        sku,
                        category,
                        quantity,
                        unit_price: price,
                        reorder_level,
                        description,
                    },
                )
                .await?;
            println!("Added {} ({}) with ID {}", product.name, product.sku, product.id);
        }

        ProductCommands::Update {
            id,
            name,
            sku,
            category,
            quantity,
            price,
            reorder_level,
            description,
        } => {
            let update = ProductUpdate {
                name,
                sku,
                category,
                quantity,
                unit_price: price,
                reorder_level,
                description,
            };
            let product = client.update_product(session, &id, &update).await?;
            println!(
                "Updated {}: {} in stock, {} ({})",
                product.name,
                product.quantity,
                format_currency(product.unit_price, symbol),
                StockStatus::of(&product)
            );
        }

        ProductCommands::Delete { id } => {
            let message = client
                .delete_product(session, &id)
                .await
                .with_context(|| format!("Failed to delete product {}", id))?;
            println!("{}", message);
        }
    }

    Ok(())
}

async fn run_categories(
    client: &ApiClient,
    session: &Session,
    command: CategoryCommands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        CategoryCommands::List => {
            let categories = client.list_categories(session).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
                _ => print_categories(&categories),
            }
        }

        CategoryCommands::Add { name, description } => {
            let category = client
                .create_category(session, &CategoryCreate { name, description })
                .await?;
            println!("Added category {} with ID {}", category.name, category.id);
        }
    }

    Ok(())
}

fn require_session(store: &SessionStore) -> anyhow::Result<Session> {
    match store.load()? {
        Some(session) => Ok(session),
        None => bail!("Not logged in. Run `stacko login` first"),
    }
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(&path, data).with_context(|| format!("Failed to write {:?}", path))?;
            println!("Report written to {:?}", path);
        }
        None => {
            std::io::stdout().write_all(data)?;
        }
    }
    Ok(())
}

fn print_products(products: &[Product], symbol: &str) {
    if products.is_empty() {
        println!("No products found.");
        println!();
        println!("Add one with:");
        println!("  stacko products add --name \"Desk\" --sku FURN-001 --category Furniture --quantity 5 --price 199.99");
        return;
    }

    println!(
        "{:<28} {:<10} {:<18} {:>6} {:>12} {:>14}  {}",
        "Name", "SKU", "Category", "Qty", "Unit Price", "Value", "Status"
    );
    println!("{}", "-".repeat(104));

    for p in products {
        println!(
            "{:<28} {:<10} {:<18} {:>6} {:>12} {:>14}  {}",
            truncate(&p.name, 28),
            truncate(&p.sku, 10),
            truncate(&p.category, 18),
            p.quantity,
            format_currency(p.unit_price, symbol),
            format_currency(stock_value(p), symbol),
            StockStatus::of(p)
        );
    }
}

fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories defined yet.");
        return;
    }

    println!("{:<24} {:<40} {}", "Name", "Description", "ID");
    println!("{}", "-".repeat(100));

    for c in categories {
        println!(
            "{:<24} {:<40} {}",
            truncate(&c.name, 24),
            truncate(c.description.as_deref().unwrap_or("-"), 40),
            c.id
        );
    }
}

fn print_report(report: &InventoryReport, chart_width: usize, symbol: &str) {
    println!("Stock by category");
    println!(
        "{:<24} {:>9} {:>10} {:>16}",
        "Category", "Products", "Quantity", "Value"
    );
    println!("{}", "-".repeat(62));
    for s in &report.categories {
        println!(
            "{:<24} {:>9} {:>10} {:>16}",
            truncate(&s.name, 24),
            s.product_count,
            s.total_quantity,
            format_currency(s.total_value, symbol)
        );
    }
    println!("{}", "-".repeat(62));
    println!(
        "{:<24} {:>9} {:>10} {:>16}",
        "Total",
        report.summary.total_products,
        report.summary.total_quantity,
        format_currency(report.summary.total_stock_value, symbol)
    );

    if !report.distribution.is_empty() {
        println!();
        println!("Value distribution");
        let rows: Vec<(String, Decimal)> = report
            .distribution
            .iter()
            .map(|d| {
                let label = if d.category.is_empty() {
                    "(none)".to_string()
                } else {
                    d.category.clone()
                };
                (label, d.total_value)
            })
            .collect();
        for (line, d) in bar_chart(&rows, chart_width).iter().zip(&report.distribution) {
            println!("  {} {}", line, format_currency(d.total_value, symbol));
        }
    }

    println!();
    println!("Top {} products by value", report.top_products.len());
    for (i, p) in report.top_products.iter().enumerate() {
        println!(
            "  {:>2}. {:<28} {:>14}",
            i + 1,
            truncate(&p.name, 28),
            format_currency(stock_value(p), symbol)
        );
    }

    println!();
    if report.low_stock.is_empty() {
        println!("No products at or below their reorder level.");
    } else {
        println!("Low stock ({})", report.low_stock.len());
        for p in &report.low_stock {
            println!(
                "  {:<28} {:>6} in stock, reorder at {}",
                truncate(&p.name, 28),
                p.quantity,
                p.reorder_level
            );
        }
    }

    if !report.orphaned.is_empty() {
        println!();
        println!("Products with an unknown category ({})", report.orphaned.len());
        for p in &report.orphaned {
            let category = if p.category.is_empty() { "(none)" } else { p.category.as_str() };
            println!("  {:<28} {}", truncate(&p.name, 28), category);
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
