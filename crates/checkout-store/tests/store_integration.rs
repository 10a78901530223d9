//! End-to-end tests: the file store behind the core repository trait and
//! the pricing engine.

use std::fs;
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use checkout_core::{
    render_receipt, Cart, CoreError, Customer, CustomerRepository, MemoryAuditSink,
    PricingEngine, Product, CALCULATION_SUCCESS,
};
use checkout_store::{CheckoutConfig, FileCustomerStore, StoreConfig, TracingAuditSink};
use tempfile::TempDir;

fn joined() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn open(dir: &TempDir) -> FileCustomerStore {
    FileCustomerStore::open(StoreConfig::new(dir.path().join("customers.txt"))).unwrap()
}

#[test]
fn test_repository_contract_through_trait() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let repo: &dyn CustomerRepository = &store;

    let mut cart = Cart::new();
    cart.add_product(Product::new("Laptop", "L-1", 999.0, 50))
        .unwrap();
    let customer = Customer::new("CUST-1001", joined(), 55.5)
        .with_points(1200)
        .with_cart(cart);
    repo.save(&customer).unwrap();

    let found = repo.find_by_id("CUST-1001").unwrap().unwrap();
    assert_eq!(found.id(), "CUST-1001");
    assert_eq!(found.points(), 1200);
    assert_eq!(found.joined_on(), joined());
    assert_eq!(found.balance(), 55.5);
    assert!(found.cart().is_empty());
    assert!(found.address().is_none());

    assert!(repo.find_by_id("CUST-0000").unwrap().is_none());

    repo.delete("CUST-1001").unwrap();
    assert!(repo.find_by_id("CUST-1001").unwrap().is_none());

    let err = repo.delete("CUST-1001").unwrap_err();
    assert!(matches!(err, CoreError::CustomerNotFound(id) if id == "CUST-1001"));
}

#[test]
fn test_pricing_engine_over_file_store() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store
        .save(&Customer::new("CUST-1008", joined(), 0.0).with_points(25_000))
        .unwrap();

    let audit = MemoryAuditSink::new();
    let engine = PricingEngine::new(&store, &audit);

    // the file keeps no cart, so the stored customer prices at zero
    assert_eq!(engine.calculate_total("CUST-1008").unwrap(), 0.0);
    assert_eq!(audit.entries_tagged(CALCULATION_SUCCESS).len(), 1);

    let err = engine.calculate_total("CUST-9999").unwrap_err();
    assert!(matches!(err, CoreError::CustomerNotFound(_)));
    assert_eq!(audit.entries().len(), 1);
}

#[test]
fn test_stored_points_drive_discount() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store
        .save(&Customer::new("CUST-1008", joined(), 0.0).with_points(2500))
        .unwrap();

    let mut customer = store.find_by_id("CUST-1008").unwrap();
    customer
        .cart_mut()
        .add_product(Product::new("RTX 4090", "1111", 2000.0, 0))
        .unwrap();

    let priced = checkout_core::InMemoryCustomerRepository::with_customers([customer.clone()]);
    let engine = PricingEngine::new(&priced, TracingAuditSink);
    let total = engine.calculate_total("CUST-1008").unwrap();
    assert_eq!(total, 2242.5);

    let receipt = render_receipt(customer.cart(), total);
    assert!(receipt.contains("RTX 4090\t x1"));
    assert!(receipt.trim_end().ends_with("2242.50"));
}

#[test]
fn test_reopen_sees_previous_writes() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir);
        store
            .save(&Customer::new("C1", joined(), 10.0).with_points(1))
            .unwrap();
        store
            .save(&Customer::new("C2", joined(), 20.0).with_points(2))
            .unwrap();
    }

    let store = open(&dir);
    assert_eq!(store.find_all().len(), 2);
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "C1|1|2024-05-01|10.0\nC2|2|2024-05-01|20.0"
    );
}

#[test]
fn test_concurrent_saves_lose_no_updates() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open(&dir));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for n in 0..10 {
                    let id = format!("T{t}-{n}");
                    store
                        .save(&Customer::new(id, joined(), 0.0).with_points(n))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.find_all().len(), 80);
}

#[test]
fn test_config_file_drives_store_and_rules() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data").join("customers.txt");
    let config_path = dir.path().join("checkout.toml");
    fs::write(
        &config_path,
        format!(
            "[store]\ndata_file = {:?}\natomic_writes = false\n\n[pricing]\ntax_rate = 0.0\n",
            data.display().to_string()
        ),
    )
    .unwrap();

    let config = CheckoutConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();
    let store = FileCustomerStore::open(config.store.clone()).unwrap();
    assert_eq!(store.path(), data.as_path());

    let mut cart = Cart::new();
    cart.add_product(Product::new("Chair", "C-1", 100.0, 0))
        .unwrap();
    let priced = checkout_core::InMemoryCustomerRepository::with_customers([Customer::new(
        "C1",
        joined(),
        0.0,
    )
    .with_points(10_000)
    .with_cart(cart)]);
    let engine = PricingEngine::with_rules(&priced, TracingAuditSink, config.pricing);

    // 10% off, no tax
    assert_eq!(engine.calculate_total("C1").unwrap(), 90.0);
}
