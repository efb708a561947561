use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::time_utils::{month_name, shift_month};

/// Calendar month a budget applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BudgetPeriod {
    pub year: i32,
    pub month: u32,
}

impl BudgetPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid("Month must be between 1 and 12"));
        }
        Ok(Self { year, month })
    }

    pub fn current(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn previous(&self) -> Self {
        let (year, month) = shift_month(self.year, self.month, -1);
        Self { year, month }
    }

    pub fn next(&self) -> Self {
        let (year, month) = shift_month(self.year, self.month, 1);
        Self { year, month }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// `month` / `year` pairs for `/api/budgets`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("month", self.month.to_string()),
            ("year", self.year.to_string()),
        ]
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}
