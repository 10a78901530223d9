//! # Validation Module
//!
//! Syntax-only rules for addresses and cart lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Address Validation                                 │
//! │                                                                         │
//! │  is_valid_address(address)                                             │
//! │       │                                                                 │
//! │       ├── None? ─────────────────────────────► Ok(false)               │
//! │       │                                                                 │
//! │       ├── is_civic_address_valid(line1)                                │
//! │       │        └── false ──► Err(InvalidCivicAddress(line1))           │
//! │       │                      (postal code never checked)               │
//! │       │                                                                 │
//! │       ├── is_postal_code_valid(postal_code)                            │
//! │       │        └── false ──► Err(InvalidPostalCode(postal_code))       │
//! │       │                                                                 │
//! │       └── Ok(true)                                                      │
//! │                                                                         │
//! │  No directory lookup: a real address-verification service sits         │
//! │  outside this crate.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{is_civic_address_valid, is_postal_code_valid};
//!
//! assert!(is_civic_address_valid("6050 University Ave."));
//! assert!(is_postal_code_valid("B3H 4R2"));
//! assert!(!is_postal_code_valid(None));
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::Address;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Address Rules
// =============================================================================

/// Street types accepted as the last token of a civic address line.
/// Matched case-sensitively, trailing period included.
pub const STREET_TYPES: [&str; 5] = ["St.", "Ave.", "Blvd.", "Dr.", "Rd."];

/// Letters allowed in the first postal code position.
pub const POSTAL_FIRST_LETTERS: &str = "ABCEGHJKLMNPRSTVWXYZ";

/// Letters allowed in the third and sixth positions (no W or Z).
pub const POSTAL_RESTRICTED_LETTERS: &str = "ABCEGHJKLMNPRSTVXY";

/// `L N L [space] N L N`, ASCII case-insensitive.
static POSTAL_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let first = format!("[{POSTAL_FIRST_LETTERS}]");
    let restricted = format!("[{POSTAL_RESTRICTED_LETTERS}]");
    Regex::new(&format!(
        "(?i-u)^{first}[0-9]{restricted} ?[0-9]{restricted}[0-9]$"
    ))
    .expect("Invalid postal code regex pattern")
});

/// Validates a single civic address line (e.g. `"6050 University Ave."`).
///
/// ## Rules
/// - The first and last space must be at different positions (three or
///   more tokens)
/// - The text before the first space parses as an integer
/// - The text after the last space is one of [`STREET_TYPES`]
///
/// The street name between them is not checked.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::is_civic_address_valid;
///
/// assert!(is_civic_address_valid("123 Main Ave."));
/// assert!(!is_civic_address_valid("X6050 University Ave."));
/// assert!(!is_civic_address_valid("123 Ave."));
/// ```
pub fn is_civic_address_valid(line: &str) -> bool {
    let (Some(first), Some(last)) = (line.find(' '), line.rfind(' ')) else {
        return false;
    };
    if first == last {
        return false;
    }

    let street_number = &line[..first];
    let street_type = &line[last + 1..];

    street_number.parse::<i32>().is_ok() && STREET_TYPES.contains(&street_type)
}

/// Validates a postal code.
///
/// ## Rules
/// 1. Format is `LNL NLN`; the separating space is optional
/// 2. D, F, I, O, Q and U never appear
/// 3. W and Z appear only in the first position
/// 4. Surrounding whitespace is ignored, ASCII letter case is ignored
///
/// Absent input is invalid.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::is_postal_code_valid;
///
/// assert!(is_postal_code_valid("b3h4r2"));
/// assert!(!is_postal_code_valid("B3Z 4R2"));
/// ```
pub fn is_postal_code_valid<'a>(code: impl Into<Option<&'a str>>) -> bool {
    code.into()
        .is_some_and(|code| POSTAL_CODE_PATTERN.is_match(code.trim()))
}

/// Validates a whole address, civic line first.
///
/// ## Returns
/// * `Ok(false)` - no address was given
/// * `Ok(true)` - both rules pass
/// * `Err(InvalidCivicAddress)` - the civic line failed; the postal code
///   is not examined
/// * `Err(InvalidPostalCode)` - the civic line passed, the postal code failed
pub fn is_valid_address(address: Option<&Address>) -> ValidationResult<bool> {
    let Some(address) = address else {
        return Ok(false);
    };

    if !is_civic_address_valid(&address.line1) {
        return Err(ValidationError::InvalidCivicAddress(address.line1.clone()));
    }

    if !is_postal_code_valid(address.postal_code.as_str()) {
        return Err(ValidationError::InvalidPostalCode(
            address.postal_code.clone(),
        ));
    }

    Ok(true)
}

// =============================================================================
// Cart Line Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is allowed for free items)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
