use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::constants::AVERAGE_DAYS_PER_MONTH;

/// Months left until `target`, measured in average-length months and never
/// less than one. Returns `None` once `target` is today or earlier.
pub fn months_remaining_until(today: NaiveDate, target: NaiveDate) -> Option<Decimal> {
    if target <= today {
        return None;
    }
    let days = Decimal::from((target - today).num_days());
    Some((days / AVERAGE_DAYS_PER_MONTH).max(Decimal::ONE))
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns (year, month) shifted by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + (month as i32 - 1) + delta;
    (zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1)
}

/// English month name for 1-12, `"Unknown"` otherwise.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
