//! Money calculation utilities using rust_decimal for precision
//!
//! All price arithmetic is done in `Decimal`; floats never touch money.
//! Order totals are Σ(price × quantity) over the consumed cart items and must
//! come out exact for 2-decimal prices.

use rust_decimal::prelude::*;

use crate::utils::AppError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per cart item
pub const MAX_QUANTITY: i32 = 999;

/// Maximum allowed price per dish (1,000,000.00)
fn max_price() -> Decimal {
    Decimal::from(1_000_000)
}

/// Validate a cart quantity before it enters any arithmetic
pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

/// Validate a dish price before it enters any arithmetic
pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "price must be non-negative, got {price}"
        )));
    }
    if price > max_price() {
        return Err(AppError::validation(format!(
            "price exceeds maximum allowed ({}), got {price}",
            max_price()
        )));
    }
    Ok(())
}

/// Line total: price × quantity, exact
pub fn line_total(price: Decimal, quantity: i32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Order total: Σ line totals, normalized to 2 decimal places (half-up).
///
/// For 2-decimal input prices the rounding is an identity; it only guards
/// against sub-cent dust ever reaching storage.
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, (price, quantity)| {
            acc + line_total(price, quantity)
        })
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
