//! # checkout-store: Flat-File Persistence for the Checkout
//!
//! This crate stores customers in a pipe-delimited text file and provides
//! the runtime pieces around it: configuration, an audit sink that writes
//! to `tracing`, and the `checkout` / `seed` binaries.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Data Flow                               │
//! │                                                                         │
//! │  checkout <customer-id>                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  checkout-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Config     │    │  Repository   │    │    Codec     │  │   │
//! │  │   │  (config.rs)  │    │ (customer.rs) │    │  (codec.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ checkout.toml │───►│ FileCustomer  │───►│ id|pts|date| │  │   │
//! │  │   │ CHECKOUT_*    │    │ Store         │    │ balance      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     customers.txt                               │   │
//! │  │   ~/.local/share/checkout/customers.txt (Linux default)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`codec`] - One customer per line encoding
//! - [`repository`] - The file-backed customer store
//! - [`config`] - Store settings and pricing rules from TOML/env
//! - [`audit`] - `tracing`-backed audit sink
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use checkout_core::PricingEngine;
//! use checkout_store::{CheckoutConfig, FileCustomerStore, TracingAuditSink};
//!
//! let config = CheckoutConfig::load(None)?;
//! let store = FileCustomerStore::open(config.store.clone())?;
//! let engine = PricingEngine::with_rules(&store, TracingAuditSink, config.pricing);
//!
//! let total = engine.calculate_total("C1001")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
pub mod codec;
pub mod config;
pub mod error;
pub mod repository;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use audit::TracingAuditSink;
pub use codec::{decode_customer, decode_record, encode_customer, try_decode, try_decode_bytes};
pub use config::{CheckoutConfig, StoreConfig};
pub use error::{DecodeError, StoreError, StoreResult};
pub use repository::FileCustomerStore;
