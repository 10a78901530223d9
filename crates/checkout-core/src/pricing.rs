//! # Pricing Engine
//!
//! Turns a customer's cart and loyalty balance into the amount payable.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate_total(customer_id)                         │
//! │                                                                         │
//! │  repository.find_by_id ──► None ──► Err(CustomerNotFound)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal   = Σ(quantity × price)                                      │
//! │  eligible   = min(points, 20 000)                                      │
//! │  fraction   = (eligible / 1 000) / 100      1 000 pts = 1%, max 20%    │
//! │  discounted = subtotal − subtotal × fraction                           │
//! │  total      = discounted + discounted × 0.15                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  audit.log_info("CALCULATION_SUCCESS", "<total:.1> for customer <id>") │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(total)    (full f64 precision, only the message is rounded)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use checkout_core::{
//!     Cart, Customer, InMemoryCustomerRepository, MemoryAuditSink, PricingEngine, Product,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_product(Product::new("RTX 4090", "1111", 2000.0, 0)).unwrap();
//! let joined = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let customer = Customer::new("CUST-1008", joined, 1000.0)
//!     .with_points(2500)
//!     .with_cart(cart);
//!
//! let repo = InMemoryCustomerRepository::with_customers([customer]);
//! let audit = MemoryAuditSink::new();
//! let engine = PricingEngine::new(&repo, &audit);
//!
//! assert_eq!(engine.calculate_total("CUST-1008").unwrap(), 2242.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::audit::AuditSink;
use crate::error::{CoreError, CoreResult};
use crate::repository::CustomerRepository;
use crate::types::Cart;
use crate::{CALCULATION_SUCCESS, MAX_DISCOUNT_POINTS, POINTS_PER_PERCENT, TAX_RATE};

// =============================================================================
// Pricing Rules
// =============================================================================

/// The numeric policy: tax rate and loyalty discount conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Flat tax applied after the discount (0.15 = 15%).
    pub tax_rate: f64,

    /// Points above this count earn no further discount.
    pub max_discount_points: u32,

    /// Points that buy one percent off.
    pub points_per_percent: u32,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            tax_rate: TAX_RATE,
            max_discount_points: MAX_DISCOUNT_POINTS,
            points_per_percent: POINTS_PER_PERCENT,
        }
    }
}

impl PricingRules {
    /// Fraction of the subtotal taken off for `points`.
    ///
    /// With the default rules this is capped at 0.2.
    pub fn discount_fraction(&self, points: u32) -> f64 {
        let eligible = f64::from(points.min(self.max_discount_points));
        (eligible / f64::from(self.points_per_percent)) / 100.0
    }

    /// Prices `cart` for a customer holding `points`.
    pub fn quote(&self, cart: &Cart, points: u32) -> Quote {
        let subtotal = cart.total();
        let discount_fraction = self.discount_fraction(points);
        let discount = subtotal * discount_fraction;
        let discounted = subtotal - discount;
        let tax = discounted * self.tax_rate;

        Quote {
            subtotal,
            discount_fraction,
            discount,
            discounted,
            tax,
            total: discounted + tax,
        }
    }
}

/// Breakdown of one price calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: f64,
    pub discount_fraction: f64,
    pub discount: f64,
    /// Subtotal after the loyalty discount, before tax.
    pub discounted: f64,
    pub tax: f64,
    pub total: f64,
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Computes payable totals for stored customers.
#[derive(Debug)]
pub struct PricingEngine<R, A> {
    repository: R,
    audit: A,
    rules: PricingRules,
}

impl<R, A> PricingEngine<R, A>
where
    R: CustomerRepository,
    A: AuditSink,
{
    /// Creates an engine with the default rules.
    pub fn new(repository: R, audit: A) -> Self {
        Self::with_rules(repository, audit, PricingRules::default())
    }

    pub fn with_rules(repository: R, audit: A, rules: PricingRules) -> Self {
        PricingEngine {
            repository,
            audit,
            rules,
        }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Prices the customer's cart without recording an audit entry.
    ///
    /// ## Errors
    /// - `CustomerNotFound` if the repository has no such customer
    /// - whatever the repository itself reports
    pub fn quote(&self, customer_id: &str) -> CoreResult<Quote> {
        let customer = self
            .repository
            .find_by_id(customer_id)?
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;

        Ok(self.rules.quote(customer.cart(), customer.points()))
    }

    /// Returns the final payable total and records one
    /// `CALCULATION_SUCCESS` audit entry.
    ///
    /// Nothing is audited when the lookup fails.
    pub fn calculate_total(&self, customer_id: &str) -> CoreResult<f64> {
        let quote = self.quote(customer_id)?;

        self.audit.log_info(
            CALCULATION_SUCCESS,
            &format!("{:.1} for customer {}", quote.total, customer_id),
        );

        Ok(quote.total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
