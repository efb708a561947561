use chrono::NaiveDate;
use log::warn;
use std::sync::Arc;

use sprout_core::goals::{Goal, GoalUpdate, GoalVisibility, NewGoal};
use sprout_core::sync::OptimisticList;

use crate::error::Result;
use crate::traits::GoalApiTrait;

/// Goals for one visibility view.
pub struct GoalStore {
    api: Arc<dyn GoalApiTrait>,
    list: OptimisticList<Goal>,
    visibility: GoalVisibility,
    today: NaiveDate,
}

impl GoalStore {
    pub fn new(api: Arc<dyn GoalApiTrait>, visibility: GoalVisibility, today: NaiveDate) -> Self {
        Self {
            api,
            list: OptimisticList::default(),
            visibility,
            today,
        }
    }

    pub fn items(&self) -> &[Goal] {
        self.list.items()
    }

    /// Goals that belong in the current view.
    pub fn visible(&self) -> impl Iterator<Item = &Goal> {
        let visibility = self.visibility;
        self.list
            .items()
            .iter()
            .filter(move |goal| visibility.includes(goal))
    }

    pub fn visibility(&self) -> GoalVisibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: GoalVisibility) {
        self.visibility = visibility;
    }

    pub async fn load(&mut self) -> Result<()> {
        let goals = self.api.list_goals(self.visibility).await?;
        self.list.replace_all(goals);
        Ok(())
    }

    pub async fn create(&mut self, goal: &NewGoal) -> Result<Goal> {
        let created = self.api.create_goal(goal).await?;
        self.list.apply_insert(created.clone());
        self.list.commit();
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, patch: GoalUpdate) -> Result<Goal> {
        patch.validate()?;
        let today = self.today;
        self.list.apply_update(id, |goal| goal.apply_update(&patch, today))?;

        match self.api.update_goal(id, &patch).await {
            Ok(saved) => {
                self.list.reconcile(saved.clone());
                self.list.commit();
                Ok(saved)
            }
            Err(err) => {
                warn!("Updating goal {} failed: {}", id, err);
                self.list.rollback();
                Err(err)
            }
        }
    }

    /// Hides the goal from the active view without deleting it.
    pub async fn archive(&mut self, id: i64) -> Result<Goal> {
        self.update(id, GoalUpdate::archive()).await
    }

    pub async fn unarchive(&mut self, id: i64) -> Result<Goal> {
        self.update(id, GoalUpdate::unarchive()).await
    }

    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.list.apply_remove(id)?;

        match self.api.delete_goal(id).await {
            Ok(()) => {
                self.list.commit();
                Ok(())
            }
            Err(err) => {
                warn!("Deleting goal {} failed: {}", id, err);
                self.list.rollback();
                Err(err)
            }
        }
    }
}
