//! Transaction list filter state, its URL form and the search debouncer.

mod filters_model;
mod filters_query;
mod search_debounce;


pub use filters_model::{
    AmountBounds, AmountFilter, AmountKind, FilterChange, FilterPanel, FilterState,
    TransactionFilters,
};
pub use search_debounce::SearchDebounce;
