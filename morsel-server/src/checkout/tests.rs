//! Money arithmetic tests

use super::money::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal literal")
}

#[test]
fn test_line_total_exact() {
    assert_eq!(line_total(dec("10.99"), 2), dec("21.98"));
    assert_eq!(line_total(dec("8.99"), 1), dec("8.99"));
    assert_eq!(line_total(dec("0.00"), 5), dec("0.00"));
}

#[test]
fn test_order_total_reference_scenario() {
    // (10.99 × 2) + (8.99 × 1) = 30.97, exactly
    let total = order_total(vec![(dec("10.99"), 2), (dec("8.99"), 1)]);
    assert_eq!(total, dec("30.97"));
}

#[test]
fn test_order_total_no_float_drift() {
    // 0.10 summed 100 times must be exactly 10.00 (the classic f64 trap)
    let total = order_total(std::iter::repeat_n((dec("0.10"), 1), 100));
    assert_eq!(total, dec("10.00"));
}

#[test]
fn test_order_total_empty() {
    assert_eq!(order_total(Vec::new()), Decimal::ZERO);
}

#[test]
fn test_quantity_bounds() {
    assert!(validate_quantity(1).is_ok());
    assert!(validate_quantity(MAX_QUANTITY).is_ok());
    assert!(validate_quantity(0).is_err());
    assert!(validate_quantity(-3).is_err());
    assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
}

#[test]
fn test_price_bounds() {
    assert!(validate_price(dec("0.00")).is_ok());
    assert!(validate_price(dec("12.50")).is_ok());
    assert!(validate_price(dec("-0.01")).is_err());
    assert!(validate_price(dec("1000000.01")).is_err());
}
