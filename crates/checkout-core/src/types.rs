//! # Domain Types
//!
//! Core domain types used throughout the checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   owns   ┌─────────────────┐  owns  ┌──────────┐  │
//! │  │    Customer     │─────────►│      Cart       │───────►│ Product  │  │
//! │  │  ─────────────  │          │  ─────────────  │  0..n  │ ──────── │  │
//! │  │  id (key)       │◄─ ─ ─ ─ ─│  customer_id    │        │ price    │  │
//! │  │  points         │          └─────────────────┘        │ quantity │  │
//! │  │  joined_on      │                                     │ points   │  │
//! │  │  balance        │   owns   ┌─────────────────┐        └──────────┘  │
//! │  │                 │─────────►│    Address      │                      │
//! │  │                 │◄─ ─ ─ ─ ─│  customer_id    │                      │
//! │  └─────────────────┘   0..1   └─────────────────┘                      │
//! │                                                                         │
//! │  ─── owning    ─ ─ non-owning back-reference (identifier only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Back-references are plain identifiers, so there are no reference cycles:
//! a Cart or Address only remembers which customer it belongs to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{validate_price, validate_quantity, ValidationResult};

// =============================================================================
// Address
// =============================================================================

/// A postal address belonging to one customer.
///
/// `Address::default()` is the blank placeholder: every text field empty and
/// no owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Numeric address identifier.
    pub id: u32,

    /// Civic address line, expected as `<number> <name...> <type>`.
    pub line1: String,

    pub city: String,

    /// Province, state or region.
    pub province: String,

    pub postal_code: String,

    /// Owning customer (non-owning back-reference).
    pub customer_id: Option<String>,
}

impl Address {
    /// Creates an address with no owner yet.
    pub fn new(
        id: u32,
        line1: impl Into<String>,
        city: impl Into<String>,
        province: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Address {
            id,
            line1: line1.into(),
            city: city.into(),
            province: province.into(),
            postal_code: postal_code.into(),
            customer_id: None,
        }
    }

    /// Checks if this is the blank placeholder.
    pub fn is_blank(&self) -> bool {
        self.line1.is_empty()
            && self.city.is_empty()
            && self.province.is_empty()
            && self.postal_code.is_empty()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product placed in a cart.
///
/// The serial number identifies the product line, not the instance: the same
/// serial may appear more than once in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,

    pub serial_number: String,

    /// Unit price.
    pub price: f64,

    /// Units purchased (defaults to 1).
    pub quantity: u32,

    /// Loyalty points awarded per unit.
    pub points: u32,
}

impl Product {
    /// Creates a product line with a quantity of one.
    pub fn new(
        name: impl Into<String>,
        serial_number: impl Into<String>,
        price: f64,
        points: u32,
    ) -> Self {
        Product {
            name: name.into(),
            serial_number: serial_number.into(),
            price,
            quantity: 1,
            points,
        }
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Quantity × unit price.
    #[inline]
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    /// Quantity × per-unit points.
    #[inline]
    pub fn total_points(&self) -> u64 {
        u64::from(self.quantity) * u64::from(self.points)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Item order carries no meaning
/// - Every item has quantity > 0 and a finite, non-negative price
/// - `total()` and `points()` are recomputed from the items on every call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<Product>,

    /// Owning customer (non-owning back-reference).
    customer_id: Option<String>,
}

impl Cart {
    /// Creates an empty cart with no owner.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Creates an empty cart bound to a customer.
    pub fn for_customer(customer_id: impl Into<String>) -> Self {
        Cart {
            items: Vec::new(),
            customer_id: Some(customer_id.into()),
        }
    }

    /// Adds a product line.
    ///
    /// ## Returns
    /// - `Err(ValidationError)` if quantity is zero or the price is negative
    ///   or not finite
    pub fn add_product(&mut self, product: Product) -> ValidationResult<()> {
        validate_quantity(product.quantity)?;
        validate_price(product.price)?;
        self.items.push(product);
        Ok(())
    }

    /// Removes one item equal to `product`.
    ///
    /// Returns `true` if an item was removed.
    pub fn remove_product(&mut self, product: &Product) -> bool {
        match self.items.iter().position(|item| item == product) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    /// Returns the number of product lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ(quantity × price) over the items.
    pub fn total(&self) -> f64 {
        // fold from +0.0: an empty f64 `sum()` yields -0.0
        self.items
            .iter()
            .fold(0.0, |total, item| total + item.line_total())
    }

    /// Σ of each product's total points.
    pub fn points(&self) -> u64 {
        self.items.iter().map(Product::total_points).sum()
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer account.
///
/// The identifier is fixed at construction; there is no setter for it.
/// Loyalty points are unsigned, so they can never go below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: String,
    points: u32,
    joined_on: NaiveDate,
    balance: f64,
    cart: Cart,
    address: Option<Address>,
}

impl Customer {
    /// Creates a customer with zero points, an empty cart and no address.
    pub fn new(id: impl Into<String>, joined_on: NaiveDate, balance: f64) -> Self {
        let id = id.into();
        Customer {
            cart: Cart::for_customer(id.clone()),
            id,
            points: 0,
            joined_on,
            balance,
            address: None,
        }
    }

    /// Sets the starting point balance.
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    /// Attaches a cart (rebinding it to this customer).
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.set_cart(cart);
        self
    }

    /// Attaches an address (rebinding it to this customer).
    pub fn with_address(mut self, address: Address) -> Self {
        self.set_address(Some(address));
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn set_points(&mut self, points: u32) {
        self.points = points;
    }

    /// Adds earned points, saturating at `u32::MAX`.
    pub fn add_points(&mut self, earned: u32) {
        self.points = self.points.saturating_add(earned);
    }

    #[inline]
    pub fn joined_on(&self) -> NaiveDate {
        self.joined_on
    }

    pub fn set_joined_on(&mut self, joined_on: NaiveDate) {
        self.joined_on = joined_on;
    }

    #[inline]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn set_cart(&mut self, mut cart: Cart) {
        cart.customer_id = Some(self.id.clone());
        self.cart = cart;
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn set_address(&mut self, address: Option<Address>) {
        self.address = address.map(|mut address| {
            address.customer_id = Some(self.id.clone());
            address
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
