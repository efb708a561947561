use serde::{Deserialize, Serialize};

/// `GET /api/transactions/uncategorized/count`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UncategorizedCount {
    pub count: u64,
}

/// `POST /api/agents/process-uncategorized`.
///
/// The server answers `{"queued": n}` when work was scheduled and
/// `{"message": "Nothing to process"}` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProcessUncategorizedResult {
    #[serde(default)]
    pub queued: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProcessUncategorizedResult {
    pub fn queued_count(&self) -> u64 {
        self.queued.unwrap_or(0)
    }

    /// True when the server scheduled at least one transaction.
    pub fn started(&self) -> bool {
        self.queued_count() > 0
    }
}

/// `POST /api/agents/process-transaction/{id}`: outcome of categorizing one
/// transaction. A failed run still answers 200 with `success: false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProcessTransactionResult {
    pub success: bool,
    #[serde(default)]
    pub normalized_merchant: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub llm_used: bool,
    #[serde(default)]
    pub time_ms: f64,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProcessTransactionResult {
    /// The reason the run failed, if it did.
    pub fn failure(&self) -> Option<&str> {
        if self.success {
            return None;
        }
        Some(self.error.as_deref().unwrap_or("Categorization failed"))
    }
}
