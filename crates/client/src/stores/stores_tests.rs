//! Store tests against in-memory API fakes.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use sprout_core::budgets::{Budget, BudgetPeriod, BudgetUpdate, NewBudget};
use sprout_core::filters::{FilterChange, FilterState};
use sprout_core::goals::{Goal, GoalUpdate, GoalVisibility, NewGoal};
use sprout_core::transactions::{
    NewTransaction, Transaction, TransactionDraft, TransactionPage, TransactionType,
    TransactionUpdate,
};

use super::*;
use crate::error::{ApiError, Result};
use crate::traits::{BudgetApiTrait, GoalApiTrait, TransactionApiTrait};

// ============================================================================
// Fixtures
// ============================================================================

fn transaction(id: i64, amount: Decimal, category_id: Option<i64>) -> Transaction {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "user_id": 1,
        "account_id": 1,
        "category_id": category_id,
        "amount": amount.to_string(),
        "date": "2026-03-10",
        "description": format!("Transaction {}", id),
        "category": category_id.map(|c| serde_json::json!({"id": c, "name": format!("Category {}", c)}))
    }))
    .unwrap()
}

fn budget(id: i64, amount: Decimal, spent: Decimal) -> Budget {
    Budget {
        id,
        user_id: 1,
        category_id: id,
        month: 3,
        year: 2026,
        amount,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        category: None,
        spent,
        remaining: amount - spent,
        percent_used: 0.0,
        is_over_budget: spent > amount,
    }
}

fn goal(id: i64, is_active: bool) -> Goal {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "user_id": 1,
        "name": format!("Goal {}", id),
        "target_amount": "1000.00",
        "current_amount": "250.00",
        "target_date": null,
        "monthly_contribution": null,
        "is_active": is_active,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    }))
    .unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

fn server_error() -> ApiError {
    ApiError::api(500, "Failed to update the transaction")
}

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockTransactionApi {
    rows: Mutex<Vec<Transaction>>,
    sent: Mutex<Vec<TransactionUpdate>>,
    fail: AtomicBool,
}

impl MockTransactionApi {
    fn new(rows: Vec<Transaction>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        })
    }

    fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn last_sent(&self) -> Option<TransactionUpdate> {
        self.sent.lock().unwrap().last().cloned()
    }

    fn check(&self) -> Result<()> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionApiTrait for MockTransactionApi {
    async fn list_transactions(&self, filters: &FilterState) -> Result<TransactionPage> {
        self.check()?;
        let rows = self.rows.lock().unwrap().clone();
        Ok(TransactionPage {
            total: rows.len() as u64,
            transactions: rows,
            page: filters.page,
            pages: 1,
        })
    }

    async fn create_transaction(&self, _transaction: &NewTransaction) -> Result<Transaction> {
        unimplemented!()
    }

    async fn update_transaction(&self, id: i64, update: &TransactionUpdate) -> Result<Transaction> {
        self.sent.lock().unwrap().push(update.clone());
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::not_found("Transaction not found"))?;
        row.apply_update(update);
        // The server resolves the embedded category.
        row.category = row
            .category_id
            .map(|c| serde_json::from_value(serde_json::json!({"id": c, "name": "Resolved"})).unwrap());
        Ok(row.clone())
    }

    async fn delete_transaction(&self, id: i64) -> Result<()> {
        self.check()?;
        self.rows.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}

struct MockBudgetApi {
    fail: AtomicBool,
}

#[async_trait]
impl BudgetApiTrait for MockBudgetApi {
    async fn list_budgets(&self, _period: Option<BudgetPeriod>) -> Result<Vec<Budget>> {
        Ok(vec![
            budget(1, dec!(500.00), dec!(200.00)),
            budget(2, dec!(300.00), dec!(350.00)),
        ])
    }

    async fn create_budget(&self, _budget: &NewBudget) -> Result<Budget> {
        unimplemented!()
    }

    async fn update_budget(&self, id: i64, update: &BudgetUpdate) -> Result<Budget> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::validation(400, "Budget amount must be greater than 0"));
        }
        let mut saved = budget(id, dec!(500.00), dec!(200.00));
        saved.apply_update(update);
        Ok(saved)
    }

    async fn delete_budget(&self, _id: i64) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::not_found("Budget not found"));
        }
        Ok(())
    }
}

struct MockGoalApi {
    fail: AtomicBool,
}

#[async_trait]
impl GoalApiTrait for MockGoalApi {
    async fn list_goals(&self, _visibility: GoalVisibility) -> Result<Vec<Goal>> {
        Ok(vec![goal(1, true), goal(2, true), goal(3, false)])
    }

    async fn create_goal(&self, _goal: &NewGoal) -> Result<Goal> {
        unimplemented!()
    }

    async fn update_goal(&self, id: i64, update: &GoalUpdate) -> Result<Goal> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Timeout {
                operation: "update the goal".to_string(),
            });
        }
        let mut saved = goal(id, true);
        saved.apply_update(update, today());
        Ok(saved)
    }

    async fn delete_goal(&self, _id: i64) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// TransactionStore
// ============================================================================

async fn loaded_transaction_store(api: Arc<MockTransactionApi>) -> TransactionStore {
    let mut store = TransactionStore::new(api, FilterState::default());
    store.load().await.unwrap();
    store
}

#[tokio::test]
async fn test_staged_update_is_visible_before_the_request() {
    let api = MockTransactionApi::new(vec![transaction(1, dec!(-20.00), Some(3))]);
    let mut store = loaded_transaction_store(api).await;
    let before = store.items().to_vec();

    let patch = TransactionUpdate {
        amount: Some(dec!(-25.00)),
        ..TransactionUpdate::default()
    };
    store.stage_update(1, &patch).unwrap();
    assert_eq!(store.items()[0].amount, dec!(-25.00));

    let err = store.settle_update(1, Err(server_error())).unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(store.items(), before.as_slice());
}

#[tokio::test]
async fn test_failed_update_restores_exact_snapshot() {
    let api = MockTransactionApi::new(vec![
        transaction(1, dec!(-20.00), Some(3)),
        transaction(2, dec!(1500.00), None),
    ]);
    let mut store = loaded_transaction_store(api.clone()).await;
    let before = store.items().to_vec();

    api.fail_next();
    let result = store
        .update(1, TransactionUpdate::set_category(None))
        .await;

    assert!(matches!(result, Err(ApiError::Api { status: 500, .. })));
    assert_eq!(store.items(), before.as_slice());
}

#[tokio::test]
async fn test_successful_update_reconciles_with_server() {
    let api = MockTransactionApi::new(vec![transaction(1, dec!(-20.00), None)]);
    let mut store = loaded_transaction_store(api).await;

    let saved = store
        .update(1, TransactionUpdate::set_category(Some(8)))
        .await
        .unwrap();

    assert_eq!(saved.category_name(), "Resolved");
    assert_eq!(store.items()[0], saved);
}

#[tokio::test]
async fn test_invalid_patch_never_touches_list() {
    let api = MockTransactionApi::new(vec![transaction(1, dec!(-20.00), None)]);
    let mut store = loaded_transaction_store(api).await;
    let before = store.items().to_vec();

    let result = store
        .update(
            1,
            TransactionUpdate {
                amount: Some(Decimal::ZERO),
                ..TransactionUpdate::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Domain(_))));
    assert_eq!(store.items(), before.as_slice());
}

#[tokio::test]
async fn test_amount_edit_keeps_expense_sign() {
    let api = MockTransactionApi::new(vec![transaction(1, dec!(-50.00), None)]);
    let mut store = loaded_transaction_store(api.clone()).await;
    let patch = TransactionUpdate {
        amount: Some(dec!(75.00)),
        ..TransactionUpdate::default()
    };

    let staged = store.stage_update(1, &patch).unwrap();
    assert_eq!(staged.amount, Some(dec!(-75.00)));
    assert_eq!(store.items()[0].amount, dec!(-75.00));
    store.settle_update(1, Err(server_error())).unwrap_err();

    let saved = store.update(1, patch).await.unwrap();
    assert_eq!(api.last_sent().and_then(|p| p.amount), Some(dec!(-75.00)));
    assert_eq!(saved.amount, dec!(-75.00));
    assert_eq!(store.items()[0].amount, dec!(-75.00));
}

#[tokio::test]
async fn test_amount_edit_keeps_income_sign() {
    let api = MockTransactionApi::new(vec![transaction(1, dec!(1500.00), None)]);
    let mut store = loaded_transaction_store(api.clone()).await;

    store
        .update(
            1,
            TransactionUpdate {
                amount: Some(dec!(-1600.00)),
                ..TransactionUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(api.last_sent().and_then(|p| p.amount), Some(dec!(1600.00)));
}

#[tokio::test]
async fn test_draft_flip_changes_direction() {
    let api = MockTransactionApi::new(vec![transaction(1, dec!(-50.00), None)]);
    let mut store = loaded_transaction_store(api.clone()).await;

    let mut draft = TransactionDraft::from_transaction(&store.items()[0]);
    draft.set_kind(draft.kind.flipped());
    let saved = store.update_from_draft(1, draft).await.unwrap();

    assert_eq!(api.last_sent().and_then(|p| p.amount), Some(dec!(50.00)));
    assert_eq!(saved.kind(), TransactionType::Income);
}

#[tokio::test]
async fn test_update_of_unloaded_transaction_sends_nothing() {
    let api = MockTransactionApi::new(vec![transaction(1, dec!(-50.00), None)]);
    let mut store = loaded_transaction_store(api.clone()).await;

    let result = store.update(9, TransactionUpdate::set_category(Some(2))).await;

    assert!(matches!(result, Err(ApiError::Domain(sprout_core::Error::NotFound(_)))));
    assert_eq!(api.last_sent(), None);
}

#[tokio::test]
async fn test_delete_restores_on_failure() {
    let api = MockTransactionApi::new(vec![
        transaction(1, dec!(-20.00), None),
        transaction(2, dec!(-30.00), None),
    ]);
    let mut store = loaded_transaction_store(api.clone()).await;
    let before = store.items().to_vec();

    api.fail_next();
    assert!(store.delete(2).await.is_err());
    assert_eq!(store.items(), before.as_slice());

    store.delete(2).await.unwrap();
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.total(), 1);
}

#[tokio::test]
async fn test_filter_change_resets_page_before_reload() {
    let api = MockTransactionApi::new(vec![]);
    let mut store = TransactionStore::new(api, FilterState::default());
    store.apply_filter(FilterChange::Page(3));
    store.apply_filter(FilterChange::UncategorizedOnly(true));
    store.load().await.unwrap();
    assert_eq!(store.filters().page, 1);
    assert!(store.items().is_empty());
}

// ============================================================================
// BudgetStore
// ============================================================================

#[tokio::test]
async fn test_budget_update_rollback() {
    let api = Arc::new(MockBudgetApi {
        fail: AtomicBool::new(false),
    });
    let mut store = BudgetStore::new(api.clone(), BudgetPeriod::current(today()));
    store.load().await.unwrap();
    assert_eq!(store.overview().over_budget_count, 1);
    let before = store.items().to_vec();

    api.fail.store(true, Ordering::SeqCst);
    let err = store
        .update(2, BudgetUpdate::amount(dec!(400.00)))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Budget amount must be greater than 0");
    assert_eq!(store.items(), before.as_slice());

    api.fail.store(false, Ordering::SeqCst);
    let saved = store
        .update(1, BudgetUpdate::amount(dec!(250.00)))
        .await
        .unwrap();
    assert!(!saved.is_over_budget);
    assert_eq!(store.items()[0].remaining, dec!(50.00));
}

#[tokio::test]
async fn test_budget_delete_not_found_restores() {
    let api = Arc::new(MockBudgetApi {
        fail: AtomicBool::new(true),
    });
    let mut store = BudgetStore::new(api, BudgetPeriod::current(today()));
    store.load().await.unwrap();

    let err = store.delete(1).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(store.items().len(), 2);
}

// ============================================================================
// GoalStore
// ============================================================================

#[tokio::test]
async fn test_archive_leaves_active_view() {
    let api = Arc::new(MockGoalApi {
        fail: AtomicBool::new(false),
    });
    let mut store = GoalStore::new(api, GoalVisibility::Active, today());
    store.load().await.unwrap();
    assert_eq!(store.visible().count(), 2);

    let archived = store.archive(1).await.unwrap();
    assert!(!archived.is_active);
    assert_eq!(store.visible().count(), 1);
    assert_eq!(store.items().len(), 3);

    store.unarchive(1).await.unwrap();
    assert_eq!(store.visible().count(), 2);
}

#[tokio::test]
async fn test_archive_failure_restores_goal() {
    let api = Arc::new(MockGoalApi {
        fail: AtomicBool::new(true),
    });
    let mut store = GoalStore::new(api, GoalVisibility::Active, today());
    store.load().await.unwrap();
    let before = store.items().to_vec();

    let err = store.archive(2).await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout { .. }));
    assert_eq!(store.items(), before.as_slice());
}
