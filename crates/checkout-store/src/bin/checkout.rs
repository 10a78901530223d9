//! # Checkout
//!
//! Looks up a stored customer, prices a cart for them and prints the receipt.
//!
//! ## Usage
//! ```bash
//! # Price two items for CUST-1008
//! cargo run -p checkout-store --bin checkout -- CUST-1008 \
//!     --item "RTX 4090:2000" --item "HDMI Cable:4.5:3"
//!
//! # Use another data file
//! cargo run -p checkout-store --bin checkout -- CUST-1008 --data ./customers.txt
//! ```
//!
//! The data file keeps scalar fields only, so the cart comes from the
//! `--item NAME:PRICE[:QTY]` arguments.

use std::env;
use std::path::PathBuf;

use checkout_core::{
    render_receipt, Cart, CoreError, InMemoryCustomerRepository, PricingEngine, Product,
};
use checkout_store::{CheckoutConfig, FileCustomerStore, TracingAuditSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut customer_id: Option<String> = None;
    let mut data_file: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut items: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_file = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--item" | "-i" => {
                if i + 1 < args.len() {
                    items.push(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                if customer_id.is_none() && !other.starts_with('-') {
                    customer_id = Some(other.to_string());
                }
            }
        }
        i += 1;
    }

    let Some(customer_id) = customer_id else {
        print_help();
        return Err("missing <CUSTOMER_ID>".into());
    };

    let mut config = CheckoutConfig::load(config_path)?;
    if let Some(path) = data_file {
        config.store.data_file = path;
    }

    let store = FileCustomerStore::open(config.store.clone())?;
    let mut customer = store
        .find_by_id(&customer_id)
        .ok_or_else(|| CoreError::CustomerNotFound(customer_id.clone()))?;

    let mut cart = Cart::new();
    for (index, item) in items.iter().enumerate() {
        cart.add_product(parse_item(item, index)?)?;
    }
    customer.set_cart(cart);
    info!(customer_id = %customer_id, items = customer.cart().len(), "Pricing cart");

    println!("Customer: {}", customer.id());
    println!("Points:   {}", customer.points());
    println!("Joined:   {}", customer.joined_on());
    println!("Balance:  {:.2}", customer.balance());
    println!();

    let priced = InMemoryCustomerRepository::with_customers([customer.clone()]);
    let engine = PricingEngine::with_rules(&priced, TracingAuditSink, config.pricing);
    let total = engine.calculate_total(&customer_id)?;

    print!("{}", render_receipt(customer.cart(), total));

    Ok(())
}

/// Parses `NAME:PRICE[:QTY]`. The name may itself contain colons.
fn parse_item(spec: &str, index: usize) -> Result<Product, Box<dyn std::error::Error>> {
    let invalid = || format!("invalid --item '{spec}', expected NAME:PRICE[:QTY]");
    let (head, last) = spec.rsplit_once(':').ok_or_else(invalid)?;
    let (name, price, qty) = match head.rsplit_once(':') {
        Some((name, price)) if price.parse::<f64>().is_ok() => (name, price, last.parse()?),
        _ => (head, last, 1),
    };

    Ok(Product::new(name, format!("ITEM-{}", index + 1), price.parse()?, 0).with_quantity(qty))
}

fn print_help() {
    println!("Checkout");
    println!();
    println!("Usage: checkout <CUSTOMER_ID> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -i, --item <NAME:PRICE[:QTY]>  Add an item to the cart (repeatable)");
    println!("  -d, --data <PATH>              Customer data file (overrides config)");
    println!("  -c, --config <PATH>            Config file (default: platform config dir)");
    println!("  -h, --help                     Show this help message");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
