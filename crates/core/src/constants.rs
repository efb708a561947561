use rust_decimal::Decimal;

/// Decimal places used when displaying money
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal places kept on percentages before converting to f64
pub const PERCENT_PRECISION: u32 = 2;

/// Default number of transactions per page
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Number of rows in the dashboard's recent transactions panel
pub const RECENT_TRANSACTIONS_LIMIT: usize = 10;

/// Delay before typed search text is committed to the filter state
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Poll interval while a batch categorization is believed to be running
pub const FAST_POLL_INTERVAL_MS: u64 = 2_000;

/// Poll interval when no batch categorization is running
pub const SLOW_POLL_INTERVAL_MS: u64 = 30_000;

/// Default number of uncategorized transactions queued per batch request
pub const DEFAULT_BATCH_LIMIT: u32 = 100;

/// Average month length (days) used to spread a goal over its time left
pub const AVERAGE_DAYS_PER_MONTH: Decimal = Decimal::from_parts(3044, 0, 0, false, 2);
