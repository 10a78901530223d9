//! # Repository Module
//!
//! File-backed implementations of the core repository contract.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Whole-File Repository                                │
//! │                                                                         │
//! │  PricingEngine                                                         │
//! │       │                                                                 │
//! │       │  repository.find_by_id("C1001")                                │
//! │       ▼                                                                 │
//! │  FileCustomerStore                                                     │
//! │  ├── find_by_id(&self, id)   load ──► lookup                           │
//! │  ├── find_all(&self)         load ──► sorted list                      │
//! │  ├── save(&self, customer)   load ──► insert ──► rewrite               │
//! │  └── delete(&self, id)       load ──► remove ──► rewrite               │
//! │       │                                                                 │
//! │       │  every call holds the store lock from load to rewrite          │
//! │       ▼                                                                 │
//! │  customers.txt  (one pipe-delimited line per customer)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`FileCustomerStore`] - Customer records in a flat text file

pub mod customer;

pub use customer::FileCustomerStore;
