use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkToken {
    pub link_token: String,
}

/// Body of `POST /api/plaid/item/public_token/exchange`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicTokenExchange {
    pub public_token: String,
    pub institution_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<String>,
}

/// Outcome of a bank link. The link can succeed while the first sync fails,
/// in which case `warning` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeResult {
    pub success: bool,
    pub plaid_item_id: i64,
    #[serde(default)]
    pub accounts_synced: u32,
    #[serde(default)]
    pub transactions_synced: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaidItem {
    pub id: i64,
    pub institution_name: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PlaidItem {
    pub fn health(&self) -> ItemHealth {
        ItemHealth::from_status(&self.status)
    }
}

/// Envelope of `GET /api/plaid/items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlaidItemList {
    #[serde(default)]
    pub plaid_items: Vec<PlaidItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaidItemStatus {
    pub plaid_item_id: i64,
    pub institution_name: String,
    pub status: String,
    #[serde(default)]
    pub accounts_count: u32,
    #[serde(default)]
    pub transactions_count: u64,
    #[serde(default)]
    pub has_cursor: bool,
    #[serde(default)]
    pub last_synced: Option<DateTime<Utc>>,
}

impl PlaidItemStatus {
    pub fn health(&self) -> ItemHealth {
        ItemHealth::from_status(&self.status)
    }

    pub fn needs_reauth(&self) -> bool {
        self.health().needs_reauth()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SyncCounts {
    #[serde(default)]
    pub added: u32,
    #[serde(default)]
    pub modified: u32,
    #[serde(default)]
    pub removed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncResult {
    pub success: bool,
    #[serde(default)]
    pub accounts_synced: u32,
    #[serde(default)]
    pub transactions: SyncCounts,
}

/// Connection health derived from the item's status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemHealth {
    Healthy,
    NeedsReauth,
    Error,
}

impl ItemHealth {
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "good" => ItemHealth::Healthy,
            "login_required" | "pending_expiration" => ItemHealth::NeedsReauth,
            _ => ItemHealth::Error,
        }
    }

    pub fn needs_reauth(&self) -> bool {
        *self == ItemHealth::NeedsReauth
    }
}

impl std::fmt::Display for ItemHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemHealth::Healthy => write!(f, "Connected"),
            ItemHealth::NeedsReauth => write!(f, "Reconnect required"),
            ItemHealth::Error => write!(f, "Error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_from_status() {
        assert_eq!(ItemHealth::from_status("good"), ItemHealth::Healthy);
        assert_eq!(ItemHealth::from_status("LOGIN_REQUIRED"), ItemHealth::NeedsReauth);
        assert_eq!(ItemHealth::from_status("pending_expiration"), ItemHealth::NeedsReauth);
        assert_eq!(ItemHealth::from_status("item_error"), ItemHealth::Error);
        assert!(!ItemHealth::Healthy.needs_reauth());
    }

    #[test]
    fn test_decode_status() {
        let status: PlaidItemStatus = serde_json::from_value(serde_json::json!({
            "plaid_item_id": 3,
            "institution_name": "Chase",
            "status": "login_required",
            "accounts_count": 2,
            "transactions_count": 140,
            "has_cursor": true,
            "last_synced": null
        }))
        .unwrap();
        assert!(status.needs_reauth());
        assert_eq!(status.last_synced, None);
    }

    #[test]
    fn test_decode_exchange_with_warning() {
        let result: ExchangeResult = serde_json::from_value(serde_json::json!({
            "success": true,
            "plaid_item_id": 9,
            "accounts_synced": 2,
            "message": "Bank account linked successfully",
            "warning": "Transaction sync failed"
        }))
        .unwrap();
        assert!(result.success);
        assert_eq!(result.transactions_synced, None);
        assert!(result.warning.is_some());
    }

    #[test]
    fn test_decode_sync_result() {
        let result: SyncResult = serde_json::from_value(serde_json::json!({
            "success": true,
            "accounts_synced": 1,
            "transactions": {"added": 5, "modified": 1, "removed": 0}
        }))
        .unwrap();
        assert_eq!(result.transactions.added, 5);
    }
}
