//! Batch categorization progress tracking.

mod categorization_poll;

pub use categorization_poll::{CategorizationPoll, PollMode};
