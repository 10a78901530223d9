//! # Customer Repository
//!
//! The persistence contract the pricing engine depends on.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CustomerRepository                                                     │
//! │  ├── find_by_id(id) → Ok(Some(customer)) | Ok(None)   (never NotFound) │
//! │  ├── save(customer) → insert or overwrite by id (last write wins)      │
//! │  └── delete(id)     → Err(CustomerNotFound(id)) when absent            │
//! │                                                                         │
//! │  Implementations                                                        │
//! │  ├── InMemoryCustomerRepository (this module) - keeps carts/addresses  │
//! │  └── FileCustomerStore (checkout-store)      - scalar fields only      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{CoreError, CoreResult};
use crate::types::Customer;

/// Access to stored customers.
pub trait CustomerRepository {
    /// Looks up a customer. A miss is `Ok(None)`, not an error.
    fn find_by_id(&self, customer_id: &str) -> CoreResult<Option<Customer>>;

    /// Inserts or overwrites the customer keyed by its identifier.
    fn save(&self, customer: &Customer) -> CoreResult<()>;

    /// Removes a customer.
    ///
    /// ## Errors
    /// `CoreError::CustomerNotFound` if the identifier is not stored.
    fn delete(&self, customer_id: &str) -> CoreResult<()>;
}

impl<R: CustomerRepository + ?Sized> CustomerRepository for &R {
    fn find_by_id(&self, customer_id: &str) -> CoreResult<Option<Customer>> {
        (**self).find_by_id(customer_id)
    }

    fn save(&self, customer: &Customer) -> CoreResult<()> {
        (**self).save(customer)
    }

    fn delete(&self, customer_id: &str) -> CoreResult<()> {
        (**self).delete(customer_id)
    }
}

impl<R: CustomerRepository + ?Sized> CustomerRepository for Arc<R> {
    fn find_by_id(&self, customer_id: &str) -> CoreResult<Option<Customer>> {
        (**self).find_by_id(customer_id)
    }

    fn save(&self, customer: &Customer) -> CoreResult<()> {
        (**self).save(customer)
    }

    fn delete(&self, customer_id: &str) -> CoreResult<()> {
        (**self).delete(customer_id)
    }
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// Repository backed by a map in memory.
///
/// Returns clones, so callers never alias stored state. Unlike the file
/// store it keeps each customer's cart and address.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: Mutex<BTreeMap<String, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-loaded with `customers`.
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let customers = customers
            .into_iter()
            .map(|customer| (customer.id().to_string(), customer))
            .collect();
        InMemoryCustomerRepository {
            customers: Mutex::new(customers),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Customer>> {
        self.customers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn find_by_id(&self, customer_id: &str) -> CoreResult<Option<Customer>> {
        Ok(self.lock().get(customer_id).cloned())
    }

    fn save(&self, customer: &Customer) -> CoreResult<()> {
        self.lock()
            .insert(customer.id().to_string(), customer.clone());
        Ok(())
    }

    fn delete(&self, customer_id: &str) -> CoreResult<()> {
        match self.lock().remove(customer_id) {
            Some(_) => Ok(()),
            None => Err(CoreError::CustomerNotFound(customer_id.to_string())),
        }
    }
}
