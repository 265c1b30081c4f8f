//! Money calculation utilities using rust_decimal for precision
//!
//! Prices travel the wire and sit in SQLite as `f64`, but every
//! calculation happens in `Decimal` and is rounded to 2 decimal places
//! before it is stored or compared.

use rust_decimal::prelude::*;
use shared::{AppError, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i64 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Line total for a quantity at a unit price, rounded once at the end.
pub fn line_total(unit_price: f64, quantity: i64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Validate an item quantity before insert or edit.
pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

/// Validate a payment amount before it is registered.
pub fn validate_payment_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::PaymentInvalidAmount,
            format!("payment amount must be a finite number, got {amount}"),
        ));
    }
    if amount <= 0.0 {
        return Err(AppError::new(ErrorCode::PaymentInvalidAmount));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::PaymentInvalidAmount,
            format!("payment amount exceeds maximum allowed ({MAX_PAYMENT_AMOUNT}), got {amount}"),
        ));
    }
    Ok(())
}

/// Check if payment covers the total (within 0.01 tolerance)
pub fn is_payment_sufficient(paid: f64, required: f64) -> bool {
    to_decimal(paid) >= to_decimal(required) - MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(10.99, 3), 32.97);
        assert_eq!(line_total(0.01, 100), 1.0);
    }

    #[test]
    fn test_rounding_half_up() {
        let value = Decimal::new(5, 3); // 0.005
        assert_eq!(to_f64(value), 0.01);
        let value = Decimal::new(4, 3); // 0.004
        assert_eq!(to_f64(value), 0.0);
    }

    #[test]
    fn test_is_payment_sufficient() {
        assert!(is_payment_sufficient(100.0, 100.0));
        assert!(is_payment_sufficient(100.01, 100.0));
        assert!(is_payment_sufficient(99.995, 100.0)); // Within tolerance
        assert!(!is_payment_sufficient(99.98, 100.0)); // Outside tolerance
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(10.0).is_ok());
        assert!(validate_payment_amount(0.0).is_err());
        assert!(validate_payment_amount(-1.0).is_err());
        assert!(validate_payment_amount(f64::NAN).is_err());
        assert!(validate_payment_amount(f64::INFINITY).is_err());
        assert!(validate_payment_amount(MAX_PAYMENT_AMOUNT + 1.0).is_err());
    }
}
