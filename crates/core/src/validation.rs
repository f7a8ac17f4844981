//! Shared validated-construction helpers.
//!
//! Every product and promotion constructor funnels its raw inputs through
//! these functions, so the "non-empty name / non-negative price /
//! non-negative integer quantity" rules live in exactly one place.
//!
//! The `parse_*` variants accept text (as typed at a prompt) and implement
//! "cannot be interpreted as a number" on top of the numeric checks.
//!
//! ```
//! use bestbuy_core::validation::{parse_quantity, require_price};
//!
//! assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
//! assert!(parse_quantity("-1").is_err());
//! assert!(require_price(f64::NAN).is_err());
//! ```

use crate::error::{DomainError, DomainResult};

/// Validates a product or promotion name and returns it owned.
pub fn require_name(name: impl Into<String>) -> DomainResult<String> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(DomainError::invalid_argument("name must not be empty"));
    }
    Ok(name)
}

/// Validates a unit price: finite and not negative.
pub fn require_price(price: f64) -> DomainResult<f64> {
    if !price.is_finite() {
        return Err(DomainError::invalid_argument(format!(
            "price must be a valid number, got {price}"
        )));
    }
    if price < 0.0 {
        return Err(DomainError::invalid_argument(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(price)
}

/// Validates a quantity: a non-negative integer.
pub fn require_quantity(quantity: i64) -> DomainResult<u64> {
    u64::try_from(quantity).map_err(|_| {
        DomainError::invalid_argument(format!("quantity must not be negative, got {quantity}"))
    })
}

/// Parses a price typed as text.
pub fn parse_price(raw: &str) -> DomainResult<f64> {
    let price = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::invalid_argument(format!("price must be a valid number, got {raw:?}")))?;
    require_price(price)
}

/// Parses a quantity typed as text.
pub fn parse_quantity(raw: &str) -> DomainResult<u64> {
    let quantity = raw.trim().parse::<i64>().map_err(|_| {
        DomainError::invalid_argument(format!("quantity must be a whole number, got {raw:?}"))
    })?;
    require_quantity(quantity)
}
