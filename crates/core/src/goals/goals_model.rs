//! Goals domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::progress::{goal_progress, GoalProgress};

/// Savings target as returned by `/api/goals`.
///
/// `progress_percent`, `remaining`, `on_track` and `is_met` are computed by
/// the server; [`Goal::progress`] recomputes them locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub monthly_contribution: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub progress_percent: f64,
    #[serde(default)]
    pub remaining: Decimal,
    #[serde(default)]
    pub on_track: Option<bool>,
    #[serde(default)]
    pub is_met: bool,
}

impl Goal {
    pub fn progress(&self, today: NaiveDate) -> GoalProgress {
        goal_progress(
            self.target_amount,
            self.current_amount,
            self.target_date,
            self.monthly_contribution,
            today,
        )
    }

    pub fn is_archived(&self) -> bool {
        !self.is_active
    }

    /// Applies a partial update locally and refreshes the derived fields.
    pub fn apply_update(&mut self, update: &GoalUpdate, today: NaiveDate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(target) = update.target_amount {
            self.target_amount = target;
        }
        if let Some(date) = update.target_date {
            self.target_date = Some(date);
        }
        if let Some(monthly) = update.monthly_contribution {
            self.monthly_contribution = Some(monthly);
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }

        let progress = self.progress(today);
        self.progress_percent = progress.progress_percent;
        self.remaining = progress.remaining;
        self.on_track = progress.on_track;
        self.is_met = progress.is_met;
    }
}

/// Input model for creating a goal. New goals always start at zero saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_contribution: Option<Decimal>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("Goal name cannot be empty"));
        }
        validate_target(self.target_amount)?;
        validate_contribution(self.monthly_contribution)
    }
}

/// Partial goal update. Unset fields are left untouched by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_contribution: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl GoalUpdate {
    /// Hides the goal from the default view without deleting it.
    pub fn archive() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }

    pub fn unarchive() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::invalid("Goal name cannot be empty"));
            }
        }
        if let Some(target) = self.target_amount {
            validate_target(target)?;
        }
        validate_contribution(self.monthly_contribution)
    }
}

fn validate_target(target: Decimal) -> Result<()> {
    if target <= Decimal::ZERO {
        return Err(Error::invalid("Target amount must be greater than 0"));
    }
    Ok(())
}

fn validate_contribution(monthly: Option<Decimal>) -> Result<()> {
    match monthly {
        Some(amount) if amount <= Decimal::ZERO => Err(Error::invalid(
            "Monthly contribution must be greater than 0",
        )),
        _ => Ok(()),
    }
}

/// Which goals a list request returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalVisibility {
    #[default]
    Active,
    Archived,
    All,
}

impl GoalVisibility {
    /// Value of the `is_active` query parameter, `None` for all goals.
    pub fn is_active_param(&self) -> Option<bool> {
        match self {
            GoalVisibility::Active => Some(true),
            GoalVisibility::Archived => Some(false),
            GoalVisibility::All => None,
        }
    }

    pub fn includes(&self, goal: &Goal) -> bool {
        match self.is_active_param() {
            Some(active) => goal.is_active == active,
            None => true,
        }
    }
}
