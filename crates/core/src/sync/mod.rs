//! Local list state with optimistic mutations.

mod optimistic_list;

pub use optimistic_list::{Identified, OptimisticList};
