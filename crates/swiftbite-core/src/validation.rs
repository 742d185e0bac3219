//! # Validation Module
//!
//! Input validation utilities for SwiftBite.
//!
//! ## Validation Strategy
//! The frontend does its own format checks for immediate feedback; these
//! functions are the authoritative layer the core runs before any business
//! logic. Whatever store sits behind the app adds its own constraints.
//!
//! ## Usage
//! ```rust
//! use swiftbite_core::validation::{validate_coupon_code, validate_quantity};
//!
//! validate_coupon_code("WELCOME10").unwrap();
//! validate_quantity(3).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an add/update quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates that a monetary amount is zero or greater. Zero is allowed
/// (free items, waived fees); negative is not.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Coordinate Validators
// =============================================================================

/// Validates a latitude in degrees (−90..=90).
pub fn validate_latitude(lat: f64) -> ValidationResult<()> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::CoordinateOutOfRange {
            field: "latitude".to_string(),
            value: lat,
            min: -90.0,
            max: 90.0,
        });
    }

    Ok(())
}

/// Validates a longitude in degrees (−180..=180).
pub fn validate_longitude(lon: f64) -> ValidationResult<()> {
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError::CoordinateOutOfRange {
            field: "longitude".to_string(),
            value: lon,
            min: -180.0,
            max: 180.0,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a coupon code's shape (legitimacy is checked elsewhere).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 32 characters
/// - Letters, numbers, hyphens, and underscores only
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: 32,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates delivery instructions length. Empty is fine (no instructions).
pub fn validate_instructions(text: &str) -> ValidationResult<()> {
    if text.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "delivery instructions".to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
