//! Progress calculator shared by budget and goal cards.

mod progress_calculator;
mod progress_model;

pub use progress_calculator::{budget_progress, calculate_progress, goal_progress};
pub use progress_model::{BudgetProgress, GoalProgress, GoalStatus, Progress};
