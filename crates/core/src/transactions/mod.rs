//! Transactions module - signed amounts, partial updates and the edit draft.

mod transactions_draft;
mod transactions_model;


pub use transactions_draft::TransactionDraft;
pub use transactions_model::{
    normalize_amount, NewTransaction, Transaction, TransactionAccount, TransactionPage,
    TransactionStats, TransactionType, TransactionUpdate,
};
