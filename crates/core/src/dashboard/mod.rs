//! Dashboard module - the monthly summary shown on the home screen.

mod dashboard_model;

pub use dashboard_model::{DashboardSummary, RecentTransaction, SpendingBreakdownItem};
