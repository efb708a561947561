//! Per-entity stores with optimistic mutations.
//!
//! Each store owns one [`OptimisticList`](sprout_core::sync::OptimisticList).
//! Mutations are applied locally first; a failed request restores the list
//! exactly as it was and hands the error back to the caller.

mod budget_store;
mod goal_store;
mod transaction_store;

#[cfg(test)]
mod stores_tests;

pub use budget_store::BudgetStore;
pub use goal_store::GoalStore;
pub use transaction_store::TransactionStore;
