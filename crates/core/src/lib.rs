//! Sprout Core - Domain entities and pure calculations.
//!
//! This crate holds the typed models of the Sprout API, the decimal money
//! helpers, the progress calculator and the client-side list state
//! (filters, optimistic mutations, batch polling). It performs no I/O;
//! the `sprout-client` crate moves these types over HTTP.

pub mod accounts;
pub mod agents;
pub mod batch;
pub mod budgets;
pub mod categories;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod filters;
pub mod goals;
pub mod money;
pub mod plaid;
pub mod progress;
pub mod sync;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
