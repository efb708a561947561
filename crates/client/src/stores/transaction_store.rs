use log::{debug, warn};
use std::sync::Arc;

use sprout_core::filters::{FilterChange, FilterState};
use sprout_core::sync::OptimisticList;
use sprout_core::transactions::{
    normalize_amount, NewTransaction, Transaction, TransactionDraft, TransactionUpdate,
};
use sprout_core::Error;

use crate::error::Result;
use crate::traits::TransactionApiTrait;

/// One page of the filtered transaction list.
pub struct TransactionStore {
    api: Arc<dyn TransactionApiTrait>,
    list: OptimisticList<Transaction>,
    filters: FilterState,
    total: u64,
    pages: u32,
}

impl TransactionStore {
    pub fn new(api: Arc<dyn TransactionApiTrait>, filters: FilterState) -> Self {
        Self {
            api,
            list: OptimisticList::default(),
            filters,
            total: 0,
            pages: 1,
        }
    }

    pub fn items(&self) -> &[Transaction] {
        self.list.items()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Changes the filter state; call [`load`](Self::load) afterwards.
    pub fn apply_filter(&mut self, change: FilterChange) {
        self.filters.apply(change);
    }

    pub async fn load(&mut self) -> Result<()> {
        let page = self.api.list_transactions(&self.filters).await?;
        debug!(
            "Loaded {} of {} transactions (page {}/{})",
            page.transactions.len(),
            page.total,
            page.page,
            page.pages
        );
        self.total = page.total;
        self.pages = page.pages;
        self.list.replace_all(page.transactions);
        Ok(())
    }

    pub async fn create(&mut self, transaction: &NewTransaction) -> Result<Transaction> {
        let created = self.api.create_transaction(transaction).await?;
        self.list.apply_insert(created.clone());
        self.list.commit();
        self.total += 1;
        Ok(created)
    }

    /// Saves a patch. The amount keeps the direction of the loaded
    /// transaction; use [`update_from_draft`](Self::update_from_draft) to flip it.
    pub async fn update(&mut self, id: i64, patch: TransactionUpdate) -> Result<Transaction> {
        let patch = self.stage_update(id, &patch)?;
        let result = self.api.update_transaction(id, &patch).await;
        self.settle_update(id, result)
    }

    /// Saves an edit form. The draft's kind is explicit, so a flip is kept.
    pub async fn update_from_draft(&mut self, id: i64, draft: TransactionDraft) -> Result<Transaction> {
        let patch = draft.into_update()?;
        self.stage_patch(id, &patch)?;
        let result = self.api.update_transaction(id, &patch).await;
        self.settle_update(id, result)
    }

    /// Applies `patch` to the loaded list ahead of the server and returns the
    /// patch to transmit, with its amount signed like the loaded transaction.
    pub fn stage_update(&mut self, id: i64, patch: &TransactionUpdate) -> Result<TransactionUpdate> {
        let kind = self
            .list
            .get(id)
            .map(Transaction::kind)
            .ok_or_else(|| Error::NotFound(format!("Transaction {} is not loaded", id)))?;
        let patch = TransactionUpdate {
            amount: patch.amount.map(|amount| normalize_amount(amount, kind)),
            ..patch.clone()
        };
        self.stage_patch(id, &patch)?;
        Ok(patch)
    }

    fn stage_patch(&mut self, id: i64, patch: &TransactionUpdate) -> Result<()> {
        patch.validate()?;
        self.list.apply_update(id, |tx| tx.apply_update(patch))?;
        Ok(())
    }

    /// Reconciles with the server's copy, or restores the pre-update list.
    pub fn settle_update(&mut self, id: i64, result: Result<Transaction>) -> Result<Transaction> {
        match result {
            Ok(saved) => {
                self.list.reconcile(saved.clone());
                self.list.commit();
                Ok(saved)
            }
            Err(err) => {
                warn!("Updating transaction {} failed: {}", id, err);
                self.list.rollback();
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.list.apply_remove(id)?;

        match self.api.delete_transaction(id).await {
            Ok(()) => {
                self.list.commit();
                self.total = self.total.saturating_sub(1);
                Ok(())
            }
            Err(err) => {
                warn!("Deleting transaction {} failed: {}", id, err);
                self.list.rollback();
                Err(err)
            }
        }
    }
}
