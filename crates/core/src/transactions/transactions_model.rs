//! Transaction wire models and local patch application.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::accounts::AccountType;
use crate::categories::Category;
use crate::errors::{Error, Result};

/// Direction of a transaction. The amount sign is the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Negative amounts are expenses, everything else is income.
    pub fn of(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            TransactionType::Expense
        } else {
            TransactionType::Income
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            TransactionType::Income => TransactionType::Expense,
            TransactionType::Expense => TransactionType::Income,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// Gives `amount` the sign `kind` requires, whatever sign the user typed.
pub fn normalize_amount(amount: Decimal, kind: TransactionType) -> Decimal {
    match kind {
        TransactionType::Expense => -amount.abs(),
        TransactionType::Income => amount.abs(),
    }
}

/// Account summary embedded in transaction responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionAccount {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub account_type: AccountType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub account_id: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub goal_id: Option<i64>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub normalized_merchant: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_subscription: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub account: Option<TransactionAccount>,
}

impl Transaction {
    pub fn kind(&self) -> TransactionType {
        TransactionType::of(self.amount)
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category_id.is_none()
    }

    /// Merchant name when the categorizer found one, else the raw description.
    pub fn display_name(&self) -> &str {
        self.normalized_merchant
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.description)
    }

    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }

    /// Applies a patch the same way the server would. A changed category id
    /// drops the embedded category until the server response replaces it.
    pub fn apply_update(&mut self, update: &TransactionUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(category_id) = update.category_id {
            if self.category.as_ref().map(|c| c.id) != category_id {
                self.category = None;
            }
            self.category_id = category_id;
        }
        if let Some(goal_id) = update.goal_id {
            self.goal_id = goal_id;
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
    }
}

/// Request body for `POST /api/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    pub account_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        validate_description(&self.description)?;
        validate_amount(self.amount)
    }
}

/// Partial update for `PUT /api/transactions/{id}`.
///
/// Clearable fields use `Option<Option<_>>`: `None` leaves the field out of
/// the body, `Some(None)` sends `null` and clears it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TransactionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub category_id: Option<Option<i64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub goal_id: Option<Option<i64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub notes: Option<Option<String>>,
}

impl TransactionUpdate {
    pub fn set_category(category_id: Option<i64>) -> Self {
        Self {
            category_id: Some(category_id),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

// A field that is present in the body (even as null) becomes `Some(..)`.
fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::invalid("Description cannot be empty"));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount.is_zero() {
        return Err(Error::invalid("Amount cannot be zero"));
    }
    Ok(())
}

/// One page of `GET /api/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

impl TransactionPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// Totals for the active filter set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TransactionStats {
    pub total_income: Decimal,
    /// Magnitude of all expenses (positive).
    pub total_expenses: Decimal,
    pub net: Decimal,
    pub count: u64,
}

impl TransactionStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut stats = Self::default();
        for tx in transactions {
            match tx.kind() {
                TransactionType::Income => stats.total_income += tx.amount,
                TransactionType::Expense => stats.total_expenses += tx.amount.abs(),
            }
            stats.count += 1;
        }
        stats.net = stats.total_income - stats.total_expenses;
        stats
    }
}
