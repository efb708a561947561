//! Categories module - reference data shared by transactions and budgets.

mod categories_model;

pub use categories_model::{find_category, find_category_by_name, Category};
