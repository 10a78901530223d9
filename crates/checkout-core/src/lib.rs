//! # checkout-core: Pure Business Logic for the Checkout
//!
//! Customers, carts, address rules and the loyalty pricing engine, as pure
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Binaries (checkout, seed) in checkout-store        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌───────────┐ ┌───────────┐ ┌──────────────┐   │   │
//! │  │   │  types   │ │ pricing   │ │validation │ │ repository   │   │   │
//! │  │   │ Customer │ │ Engine    │ │ civic     │ │ audit        │   │   │
//! │  │   │ Cart     │ │ Rules     │ │ postal    │ │ (traits +    │   │   │
//! │  │   │ Product  │ │ Quote     │ │ cart line │ │  in-memory)  │   │   │
//! │  │   └──────────┘ └───────────┘ └───────────┘ └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • NO ENVIRONMENT                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ implements CustomerRepository          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              checkout-store (flat-file record store)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Address, Product, Cart)
//! - [`validation`] - Address syntax rules and cart line checks
//! - [`pricing`] - Loyalty discount and tax calculation
//! - [`repository`] - Customer repository contract + in-memory implementation
//! - [`audit`] - Audit sink contract + in-memory implementation
//! - [`receipt`] - Plain-text receipt rendering
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
pub mod error;
pub mod pricing;
pub mod receipt;
pub mod repository;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use audit::{AuditEntry, AuditSink, MemoryAuditSink};
pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::{PricingEngine, PricingRules, Quote};
pub use receipt::render_receipt;
pub use repository::{CustomerRepository, InMemoryCustomerRepository};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat tax rate applied after the loyalty discount (15%).
pub const TAX_RATE: f64 = 0.15;

/// Points beyond this balance earn no additional discount.
///
/// 20 000 points at 1 000 points per percent caps the discount at 20%.
pub const MAX_DISCOUNT_POINTS: u32 = 20_000;

/// Loyalty points that convert into one percent off.
pub const POINTS_PER_PERCENT: u32 = 1_000;

/// Audit tag recorded after every successful total calculation.
pub const CALCULATION_SUCCESS: &str = "CALCULATION_SUCCESS";
