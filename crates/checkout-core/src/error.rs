//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Lookup / repository failures                   │
//! │  └── ValidationError  - Address and product rule failures              │
//! │                                                                         │
//! │  checkout-store errors (separate crate)                                │
//! │  └── StoreError       - File store and configuration failures          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← StoreError                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending value in the message (ID, address line, code)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer cannot be located.
    ///
    /// ## When This Occurs
    /// - `delete` on an identifier the repository does not hold
    /// - Pricing a customer the repository returns nothing for
    #[error("Customer not found with ID: {0}")]
    CustomerNotFound(String),

    /// The backing store could not complete a write.
    ///
    /// Carries the rendered storage error; the store crate owns the detail.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the address rules and by cart operations before a value is
/// accepted into the domain.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The civic address line does not follow `<number> <name...> <type>`.
    #[error("Invalid civic address: {0}")]
    InvalidCivicAddress(String),

    /// The postal code does not follow the `A1A 1A1` grammar.
    #[error("Invalid Post Code: {0}")]
    InvalidPostalCode(String),

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., NaN price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
