//! Decimal money helpers.
//!
//! Amounts travel as decimal strings (`"500.00"`) and stay `Decimal` for every
//! sum and difference. Only percentages are converted to `f64`, after the
//! quotient has been rounded.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::constants::{DISPLAY_DECIMAL_PRECISION, PERCENT_PRECISION};
use crate::errors::{Error, Result, ValidationError};

/// Parses a user or server supplied amount without going through `f64`.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim().replace(',', "");
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "amount".to_string(),
        )));
    }
    let cleaned = trimmed.strip_prefix('$').unwrap_or(&trimmed);
    Ok(Decimal::from_str(cleaned)?)
}

/// Formats an amount with exactly two decimal places (`-100.00`).
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMAL_PRECISION);
    rounded.to_string()
}

/// Formats an amount as dollars with thousands separators (`-$1,250.00`).
pub fn format_currency(amount: Decimal) -> String {
    let formatted = format_amount(amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.round_dp(DISPLAY_DECIMAL_PRECISION) < Decimal::ZERO {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, fraction)
}

/// `part / whole * 100`, rounded to two places.
///
/// Returns `0.0` when `whole` is zero or negative so callers never render
/// `NaN` or an infinite percentage.
pub fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(PERCENT_PRECISION))
        .and_then(|pct| pct.to_f64())
        .unwrap_or(0.0)
}

/// Whole-number percentage label. Never clamped: 120% over budget reads "120%".
///
/// Values that would round onto 100 without being exactly 100 keep enough
/// decimals to show which side of the limit they are on ("100.4%", "99.6%").
pub fn format_percent(percent: f64) -> String {
    // Adding zero turns -0.0 into 0.0.
    let whole = percent.round() + 0.0;
    if percent != 100.0 && whole == 100.0 {
        let one_place = format!("{:.1}", percent);
        if one_place != "100.0" {
            return format!("{}%", one_place);
        }
        return format!("{:.2}%", percent);
    }
    format!("{:.0}%", whole)
}
