//! Budgets module - per-category monthly limits.

mod budgets_model;
mod budgets_overview;
mod budgets_period;

pub use budgets_model::{Budget, BudgetUpdate, NewBudget};
pub use budgets_overview::{summarize_budgets, BudgetsOverview};
pub use budgets_period::BudgetPeriod;
