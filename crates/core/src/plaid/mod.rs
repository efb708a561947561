//! Plaid module - bank connection payloads and connection health.

mod plaid_model;

pub use plaid_model::{
    ExchangeResult, ItemHealth, LinkToken, PlaidItem, PlaidItemList, PlaidItemStatus,
    PublicTokenExchange, SyncCounts, SyncResult,
};
