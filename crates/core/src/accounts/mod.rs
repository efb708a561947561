//! Accounts module - balance-bearing containers and net worth totals.

mod accounts_constants;
mod accounts_model;

#[cfg(test)]
mod accounts_model_tests;

// Re-export the public interface
pub use accounts_constants::*;
pub use accounts_model::{summarize_accounts, Account, AccountTotals, AccountType};
