use log::warn;
use std::sync::Arc;

use sprout_core::budgets::{summarize_budgets, Budget, BudgetPeriod, BudgetUpdate, BudgetsOverview, NewBudget};
use sprout_core::sync::OptimisticList;

use crate::error::Result;
use crate::traits::BudgetApiTrait;

/// Budgets of one month.
pub struct BudgetStore {
    api: Arc<dyn BudgetApiTrait>,
    list: OptimisticList<Budget>,
    period: BudgetPeriod,
}

impl BudgetStore {
    pub fn new(api: Arc<dyn BudgetApiTrait>, period: BudgetPeriod) -> Self {
        Self {
            api,
            list: OptimisticList::default(),
            period,
        }
    }

    pub fn items(&self) -> &[Budget] {
        self.list.items()
    }

    pub fn period(&self) -> BudgetPeriod {
        self.period
    }

    pub fn overview(&self) -> BudgetsOverview {
        summarize_budgets(self.list.items())
    }

    /// Moves to another month; call [`load`](Self::load) afterwards.
    pub fn set_period(&mut self, period: BudgetPeriod) {
        self.period = period;
    }

    pub async fn load(&mut self) -> Result<()> {
        let budgets = self.api.list_budgets(Some(self.period)).await?;
        self.list.replace_all(budgets);
        Ok(())
    }

    pub async fn create(&mut self, budget: &NewBudget) -> Result<Budget> {
        let created = self.api.create_budget(budget).await?;
        if created.period() == self.period {
            self.list.apply_insert(created.clone());
            self.list.commit();
        }
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, patch: BudgetUpdate) -> Result<Budget> {
        patch.validate()?;
        self.list.apply_update(id, |budget| budget.apply_update(&patch))?;

        match self.api.update_budget(id, &patch).await {
            Ok(saved) => {
                self.list.reconcile(saved.clone());
                self.list.commit();
                Ok(saved)
            }
            Err(err) => {
                warn!("Updating budget {} failed: {}", id, err);
                self.list.rollback();
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.list.apply_remove(id)?;

        match self.api.delete_budget(id).await {
            Ok(()) => {
                self.list.commit();
                Ok(())
            }
            Err(err) => {
                warn!("Deleting budget {} failed: {}", id, err);
                self.list.rollback();
                Err(err)
            }
        }
    }
}
