//! Progress domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Limit-versus-actual relationship shared by budgets and goals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// `limit - actual`, signed
    pub remaining: Decimal,
    /// Unclamped percentage for labels (may exceed 100)
    pub percent: f64,
    /// Percentage clamped to `[0, 100]`, for progress-bar width only
    pub bar_percent: f64,
}

/// Budget card figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: f64,
    pub bar_percent: f64,
    pub is_over_budget: bool,
}

/// Goal card figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub remaining: Decimal,
    pub progress_percent: f64,
    pub bar_percent: f64,
    pub is_met: bool,
    /// `None` when there is no plan to judge (missing date or contribution) or the goal is met
    pub on_track: Option<bool>,
}

/// Badge shown on a goal card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Met,
    OnTrack,
    Behind,
    NoPlan,
}

impl GoalProgress {
    pub fn status(&self) -> GoalStatus {
        if self.is_met {
            return GoalStatus::Met;
        }
        match self.on_track {
            Some(true) => GoalStatus::OnTrack,
            Some(false) => GoalStatus::Behind,
            None => GoalStatus::NoPlan,
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::Met => write!(f, "Goal met"),
            GoalStatus::OnTrack => write!(f, "On track"),
            GoalStatus::Behind => write!(f, "Behind"),
            GoalStatus::NoPlan => write!(f, "No plan"),
        }
    }
}
