//! Endpoint catalogue: per-call messages and timeout class.

use std::time::Duration;

/// Timeout class of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Read,
    Write,
    Batch,
}

/// Client-side deadlines per request class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub read: Duration,
    pub write: Duration,
    pub batch: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(30),
            write: Duration::from_secs(10),
            batch: Duration::from_secs(30),
        }
    }
}

impl Timeouts {
    pub fn for_kind(&self, kind: RequestKind) -> Duration {
        match kind {
            RequestKind::Read => self.read,
            RequestKind::Write => self.write,
            RequestKind::Batch => self.batch,
        }
    }
}

/// Every call the client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Dashboard,
    ListTransactions,
    GetTransaction,
    CreateTransaction,
    UpdateTransaction,
    DeleteTransaction,
    TransactionStats,
    UncategorizedCount,
    ProcessUncategorized,
    ProcessTransaction,
    ListBudgets,
    GetBudget,
    CreateBudget,
    UpdateBudget,
    DeleteBudget,
    ListGoals,
    GetGoal,
    CreateGoal,
    UpdateGoal,
    DeleteGoal,
    ListAccounts,
    ListCategories,
    CreateLinkToken,
    ExchangePublicToken,
    SyncPlaidItem,
    PlaidItemStatus,
    ListPlaidItems,
}

impl Endpoint {
    pub fn kind(&self) -> RequestKind {
        use Endpoint::*;
        match self {
            CreateTransaction | UpdateTransaction | DeleteTransaction | CreateBudget
            | UpdateBudget | DeleteBudget | CreateGoal | UpdateGoal | DeleteGoal
            | CreateLinkToken => RequestKind::Write,
            ProcessUncategorized | ProcessTransaction | ExchangePublicToken | SyncPlaidItem => {
                RequestKind::Batch
            }
            _ => RequestKind::Read,
        }
    }

    /// Categories and the health check are public.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Endpoint::Health | Endpoint::ListCategories)
    }

    /// Verb phrase used in timeout messages.
    pub fn operation(&self) -> &'static str {
        use Endpoint::*;
        match self {
            Health => "check the server",
            Dashboard => "load the dashboard",
            ListTransactions => "load transactions",
            GetTransaction => "load the transaction",
            CreateTransaction => "create the transaction",
            UpdateTransaction => "update the transaction",
            DeleteTransaction => "delete the transaction",
            TransactionStats => "load transaction totals",
            UncategorizedCount => "check uncategorized transactions",
            ProcessUncategorized => "start categorization",
            ProcessTransaction => "categorize the transaction",
            ListBudgets => "load budgets",
            GetBudget => "load the budget",
            CreateBudget => "create the budget",
            UpdateBudget => "update the budget",
            DeleteBudget => "delete the budget",
            ListGoals => "load goals",
            GetGoal => "load the goal",
            CreateGoal => "create the goal",
            UpdateGoal => "update the goal",
            DeleteGoal => "delete the goal",
            ListAccounts => "load accounts",
            ListCategories => "load categories",
            CreateLinkToken => "start bank linking",
            ExchangePublicToken => "link the bank",
            SyncPlaidItem => "sync the bank connection",
            PlaidItemStatus => "check the bank connection",
            ListPlaidItems => "load bank connections",
        }
    }

    /// Message used when the server gives no detail.
    pub fn fallback_message(&self) -> String {
        format!("Failed to {}", self.operation())
    }

    pub fn not_found_message(&self) -> &'static str {
        use Endpoint::*;
        match self {
            GetTransaction | UpdateTransaction | DeleteTransaction | ProcessTransaction => {
                "Transaction not found"
            }
            GetBudget | UpdateBudget | DeleteBudget => "Budget not found",
            GetGoal | UpdateGoal | DeleteGoal => "Goal not found",
            SyncPlaidItem | PlaidItemStatus => "PlaidItem not found",
            _ => "Not found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_and_timeouts() {
        let timeouts = Timeouts::default();
        assert_eq!(
            timeouts.for_kind(Endpoint::UpdateBudget.kind()),
            Duration::from_secs(10)
        );
        assert_eq!(
            timeouts.for_kind(Endpoint::ProcessUncategorized.kind()),
            Duration::from_secs(30)
        );
        assert_eq!(Endpoint::ListTransactions.kind(), RequestKind::Read);
        assert_eq!(Endpoint::ProcessTransaction.kind(), RequestKind::Batch);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Endpoint::DeleteGoal.not_found_message(), "Goal not found");
        assert_eq!(
            Endpoint::ProcessTransaction.not_found_message(),
            "Transaction not found"
        );
        assert_eq!(Endpoint::PlaidItemStatus.not_found_message(), "PlaidItem not found");
        assert_eq!(
            Endpoint::ListBudgets.fallback_message(),
            "Failed to load budgets"
        );
        assert!(!Endpoint::ListCategories.requires_auth());
        assert!(Endpoint::ListAccounts.requires_auth());
    }
}
