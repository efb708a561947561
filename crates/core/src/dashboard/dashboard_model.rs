use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::RECENT_TRANSACTIONS_LIMIT;
use crate::money::percent_of;
use crate::transactions::TransactionType;

/// Response of `GET /api/dashboard`. Income and expenses cover the current
/// month; assets and net worth are point-in-time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
    pub assets: Decimal,
    pub net_worth: Decimal,
    #[serde(default)]
    pub spending_breakdown: Vec<SpendingBreakdownItem>,
    #[serde(default)]
    pub recent_transactions: Vec<RecentTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendingBreakdownItem {
    pub category: String,
    pub amount: Decimal,
    pub percentage: f64,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentTransaction {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl DashboardSummary {
    /// Share of income kept this month; `0.0` without income.
    pub fn savings_rate(&self) -> f64 {
        percent_of(self.savings, self.income)
    }

    pub fn liabilities(&self) -> Decimal {
        self.assets - self.net_worth
    }

    /// Breakdown sorted by amount, largest first.
    pub fn top_spending(&self, limit: usize) -> Vec<&SpendingBreakdownItem> {
        let mut items: Vec<&SpendingBreakdownItem> = self.spending_breakdown.iter().collect();
        items.sort_by(|a, b| b.amount.cmp(&a.amount));
        items.truncate(limit);
        items
    }

    pub fn recent(&self) -> &[RecentTransaction] {
        let len = self.recent_transactions.len().min(RECENT_TRANSACTIONS_LIMIT);
        &self.recent_transactions[..len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn summary() -> DashboardSummary {
        serde_json::from_value(serde_json::json!({
            "income": "2500.00",
            "expenses": "200.00",
            "savings": "2300.00",
            "assets": "6000.00",
            "net_worth": "5500.00",
            "spending_breakdown": [
                {"category": "Dining", "amount": "50.00", "percentage": 25.0, "color": "#FF5733"},
                {"category": "Groceries", "amount": "150.00", "percentage": 75.0, "color": "#33FF57"}
            ],
            "recent_transactions": [
                {"id": 1, "description": "Salary", "amount": "2500.00", "date": "2026-03-01", "category": null, "type": "income"},
                {"id": 2, "description": "Restaurants", "amount": "-50.00", "date": "2026-03-02", "category": "Dining", "type": "expense"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_dashboard() {
        let summary = summary();
        assert_eq!(summary.income, dec!(2500.00));
        assert_eq!(summary.liabilities(), dec!(500.00));
        assert_eq!(summary.recent()[0].kind, TransactionType::Income);
        assert_eq!(summary.recent()[1].kind, TransactionType::Expense);
    }

    #[test]
    fn test_savings_rate() {
        assert_eq!(summary().savings_rate(), 92.0);
        assert_eq!(DashboardSummary::default().savings_rate(), 0.0);
    }

    #[test]
    fn test_top_spending_sorted() {
        let summary = summary();
        let top = summary.top_spending(1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].category, "Groceries");
    }

    #[test]
    fn test_empty_dashboard_decodes() {
        let summary: DashboardSummary = serde_json::from_value(serde_json::json!({
            "income": "0", "expenses": "0", "savings": "0", "assets": "0", "net_worth": "0",
            "spending_breakdown": [], "recent_transactions": []
        }))
        .unwrap();
        assert!(summary.recent().is_empty());
        assert!(summary.top_spending(5).is_empty());
    }
}
