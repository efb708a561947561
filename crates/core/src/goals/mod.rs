//! Goals module - savings targets and their archive state.

mod goals_model;

pub use goals_model::{Goal, GoalUpdate, GoalVisibility, NewGoal};
