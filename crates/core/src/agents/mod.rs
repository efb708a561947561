//! Agents module - payloads of the categorization endpoints.

mod agents_model;

pub use agents_model::{ProcessTransactionResult, ProcessUncategorizedResult, UncategorizedCount};
