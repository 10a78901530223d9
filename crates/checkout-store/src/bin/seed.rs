//! # Seed Data Generator
//!
//! Populates the customer data file with sample customers for development.
//!
//! ## Usage
//! ```bash
//! # Generate 20 customers (default)
//! cargo run -p checkout-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p checkout-store --bin seed -- --count 200
//!
//! # Specify data file path
//! cargo run -p checkout-store --bin seed -- --data ./data/customers.txt
//! ```
//!
//! ## Generated Customers
//! Each customer has:
//! - Identifier: `CUST-{1000 + index}`
//! - Points: 0 - 28 750 in steps of 1 250 (some above the discount cap)
//! - Join date: spread from 2020-01-01 onwards
//! - Balance: 0.00 - 999.99
//! - A sample address, checked against the address rules first. Customers
//!   whose sample address fails are skipped.

use std::env;
use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use checkout_core::validation::is_valid_address;
use checkout_core::{Address, Customer};
use checkout_store::{CheckoutConfig, FileCustomerStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Sample addresses. The last two break the civic and postal rules.
const ADDRESSES: &[(&str, &str, &str, &str)] = &[
    ("6050 University Ave.", "Halifax", "NS", "B3H 4R2"),
    ("123 Main St.", "Toronto", "ON", "M5V 2T6"),
    ("88 Rideau Blvd.", "Ottawa", "ON", "K1N5Y3"),
    ("4 Rue Saint Paul Dr.", "Montreal", "QC", "H2Y 1C6"),
    ("700 Granville Rd.", "Vancouver", "BC", "V6B 1K3"),
    ("15 Portage Ave.", "Winnipeg", "MB", "R3C 0B1"),
    ("221 Jasper Ave.", "Edmonton", "AB", "T5J 3R8"),
    ("Main Street", "Regina", "SK", "S4P 3Y2"),
    ("9 Water St.", "St. John's", "NL", "D1A 1A1"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut data_file: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_file = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Checkout Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of customers to generate (default: 20)");
                println!("  -d, --data <PATH>  Customer data file (default: from config)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = CheckoutConfig::load(None)?;
    if let Some(path) = data_file {
        config.store.data_file = path;
    }

    println!("Checkout Seed Data Generator");
    println!("============================");
    println!("Data file: {}", config.store.data_file.display());
    println!("Customers: {}", count);
    println!();

    let store = FileCustomerStore::open(config.store)?;

    let existing = store.find_all().len();
    if existing > 0 {
        println!("Data file already has {} customers", existing);
        println!("  Skipping seed to avoid overwriting them.");
        println!("  Delete the data file to regenerate.");
        return Ok(());
    }

    let base = NaiveDate::from_ymd_opt(2020, 1, 1).ok_or("invalid base join date")?;
    let start = std::time::Instant::now();
    let mut generated = 0;
    let mut skipped = 0;

    for index in 0..count {
        let customer = generate_customer(index, base);

        // Addresses are not persisted, but bad ones still never get saved.
        if let Err(err) = is_valid_address(customer.address()) {
            warn!(customer_id = %customer.id(), %err, "Skipping customer with invalid address");
            skipped += 1;
            continue;
        }

        store.save(&customer)?;
        generated += 1;
    }

    info!(generated, skipped, elapsed = ?start.elapsed(), "Seed complete");
    println!("Generated {} customers ({} skipped)", generated, skipped);

    Ok(())
}

/// Generates one customer with deterministic data.
fn generate_customer(index: usize, base: NaiveDate) -> Customer {
    let id = format!("CUST-{}", 1000 + index);

    let points = ((index * 1250) % 30_000) as u32;
    let joined = base
        .checked_add_days(Days::new((index as u64 * 37) % 1800))
        .unwrap_or(base);
    let balance = ((index * 7919) % 100_000) as f64 / 100.0;

    let (line1, city, province, postal) = ADDRESSES[index % ADDRESSES.len()];
    let address = Address::new(index as u32 + 1, line1, city, province, postal);

    Customer::new(id, joined, balance)
        .with_points(points)
        .with_address(address)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
