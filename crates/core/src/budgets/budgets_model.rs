//! Budget domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::budgets_period::BudgetPeriod;
use crate::categories::Category;
use crate::errors::{Error, Result};
use crate::progress::{budget_progress, BudgetProgress};

/// Monthly spending limit for one category, as returned by `/api/budgets`.
///
/// `spent`, `remaining`, `percent_used` and `is_over_budget` are computed by
/// the server on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub month: u32,
    pub year: i32,
    /// Spending limit
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub spent: Decimal,
    #[serde(default)]
    pub remaining: Decimal,
    #[serde(default)]
    pub percent_used: f64,
    #[serde(default)]
    pub is_over_budget: bool,
}

impl Budget {
    /// Progress recomputed from the limit and the spent amount.
    pub fn progress(&self) -> BudgetProgress {
        budget_progress(self.amount, self.spent)
    }

    pub fn period(&self) -> BudgetPeriod {
        BudgetPeriod {
            month: self.month,
            year: self.year,
        }
    }

    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }

    /// Applies an amount update locally. Category and period never change after creation.
    pub fn apply_update(&mut self, update: &BudgetUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
            let progress = self.progress();
            self.remaining = progress.remaining;
            self.percent_used = progress.percent_used;
            self.is_over_budget = progress.is_over_budget;
        }
    }
}

/// Input model for creating a budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBudget {
    pub category_id: i64,
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        validate_budget_amount(self.amount)?;
        if !(1..=12).contains(&self.month) {
            return Err(Error::invalid("Month must be between 1 and 12"));
        }
        Ok(())
    }
}

/// Input model for updating a budget. Only the limit is mutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BudgetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl BudgetUpdate {
    pub fn amount(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.amount {
            Some(amount) => validate_budget_amount(amount),
            None => Ok(()),
        }
    }
}

fn validate_budget_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid("Budget amount must be greater than 0"));
    }
    Ok(())
}
