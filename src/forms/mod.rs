use std::str::FromStr;

use rust_decimal::prelude::*;
use thiserror::Error;

use crate::domain::inventory::QUANTITY_SCALE;

pub mod cash_sessions;
pub mod catalog;
pub mod inventory;
pub mod orders;
pub mod tables;

/// Largest accepted monetary amount: one billion, in cents.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;
/// Largest accepted stock quantity: one billion units, in thousandths.
pub const MAX_QUANTITY: i64 = 1_000_000_000 * QUANTITY_SCALE;

/// Money and stock quantities are entered as decimal strings such as `"27.50"`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("`{0}` is not a decimal number")]
    NotANumber(String),
    #[error("`{0}` must not be negative")]
    Negative(String),
    #[error("`{0}` is out of range")]
    OutOfRange(String),
}

/// Parses a monetary amount into cents, rounding half away from zero to two
/// decimal places.
pub fn parse_amount_cents(input: &str) -> Result<i64, AmountError> {
    parse_scaled(input, 2, 100, MAX_AMOUNT_CENTS)
}

/// Parses a stock quantity into thousandths of its unit of measure.
pub fn parse_quantity(input: &str) -> Result<i64, AmountError> {
    parse_scaled(input, 3, QUANTITY_SCALE, MAX_QUANTITY)
}

fn parse_scaled(input: &str, places: u32, scale: i64, max: i64) -> Result<i64, AmountError> {
    let trimmed = input.trim().replace(',', ".");
    let value =
        Decimal::from_str(&trimmed).map_err(|_| AmountError::NotANumber(input.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative(input.to_string()));
    }

    value
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::from(scale))
        .and_then(|scaled| scaled.to_i64())
        .filter(|scaled| *scaled <= max)
        .ok_or_else(|| AmountError::OutOfRange(input.to_string()))
}

/// Collapses whitespace runs and drops control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}
