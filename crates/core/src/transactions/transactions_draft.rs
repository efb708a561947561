use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::transactions_model::{
    normalize_amount, NewTransaction, Transaction, TransactionType, TransactionUpdate,
};
use crate::errors::Result;

/// Edit form state for a single transaction.
///
/// The amount is held as a magnitude and the direction as `kind`, so editing
/// the number can never silently turn an expense into income.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: Option<i64>,
    pub goal_id: Option<i64>,
    pub notes: Option<String>,
}

impl TransactionDraft {
    pub fn new(kind: TransactionType, date: NaiveDate) -> Self {
        Self {
            kind,
            amount: Decimal::ZERO,
            date,
            description: String::new(),
            category_id: None,
            goal_id: None,
            notes: None,
        }
    }

    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            kind: tx.kind(),
            amount: tx.amount.abs(),
            date: tx.date,
            description: tx.description.clone(),
            category_id: tx.category_id,
            goal_id: tx.goal_id,
            notes: tx.notes.clone(),
        }
    }

    /// Stores the typed amount. A leading minus is ignored; only `set_kind`
    /// changes direction.
    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount.abs();
    }

    pub fn set_kind(&mut self, kind: TransactionType) {
        self.kind = kind;
    }

    pub fn signed_amount(&self) -> Decimal {
        normalize_amount(self.amount, self.kind)
    }

    /// Builds the PUT body. The amount always carries the draft's sign.
    pub fn into_update(self) -> Result<TransactionUpdate> {
        let update = TransactionUpdate {
            amount: Some(self.signed_amount()),
            date: Some(self.date),
            description: Some(self.description),
            category_id: Some(self.category_id),
            goal_id: Some(self.goal_id),
            notes: Some(self.notes.filter(|n| !n.trim().is_empty())),
        };
        update.validate()?;
        Ok(update)
    }

    pub fn into_new(self, account_id: i64) -> Result<NewTransaction> {
        let new_tx = NewTransaction {
            account_id,
            category_id: self.category_id,
            amount: self.signed_amount(),
            date: self.date,
            description: self.description,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        };
        new_tx.validate()?;
        Ok(new_tx)
    }
}
