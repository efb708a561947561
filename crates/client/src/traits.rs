//! Async seams between the stores and the HTTP client.
//!
//! The stores depend on these traits rather than on [`SproutApiClient`]
//! so they can be driven by in-memory fakes.
//!
//! [`SproutApiClient`]: crate::SproutApiClient

use async_trait::async_trait;

use sprout_core::agents::{ProcessUncategorizedResult, UncategorizedCount};
use sprout_core::budgets::{Budget, BudgetPeriod, BudgetUpdate, NewBudget};
use sprout_core::filters::FilterState;
use sprout_core::goals::{Goal, GoalUpdate, GoalVisibility, NewGoal};
use sprout_core::transactions::{NewTransaction, Transaction, TransactionPage, TransactionUpdate};

use crate::error::Result;

#[async_trait]
pub trait TransactionApiTrait: Send + Sync {
    async fn list_transactions(&self, filters: &FilterState) -> Result<TransactionPage>;
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, id: i64, update: &TransactionUpdate) -> Result<Transaction>;
    async fn delete_transaction(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait BudgetApiTrait: Send + Sync {
    async fn list_budgets(&self, period: Option<BudgetPeriod>) -> Result<Vec<Budget>>;
    async fn create_budget(&self, budget: &NewBudget) -> Result<Budget>;
    async fn update_budget(&self, id: i64, update: &BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait GoalApiTrait: Send + Sync {
    async fn list_goals(&self, visibility: GoalVisibility) -> Result<Vec<Goal>>;
    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal>;
    async fn update_goal(&self, id: i64, update: &GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait CategorizationApiTrait: Send + Sync {
    async fn uncategorized_count(&self) -> Result<UncategorizedCount>;
    async fn process_uncategorized(&self, limit: Option<u32>) -> Result<ProcessUncategorizedResult>;
}
