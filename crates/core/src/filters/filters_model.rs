use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Which sign the amount range applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountKind {
    #[default]
    Any,
    Expense,
    Income,
}

/// Amount range as the user typed it. Expense bounds are magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmountFilter {
    pub kind: AmountKind,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

/// Bounds on the stored, signed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountBounds {
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl AmountFilter {
    pub fn expense(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self {
            kind: AmountKind::Expense,
            min,
            max,
        }
    }

    pub fn income(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self {
            kind: AmountKind::Income,
            min,
            max,
        }
    }

    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Translates the typed range into bounds on the signed amount.
    ///
    /// Expenses are stored negative, so "at least 10 spent" is
    /// `amount <= -10` and "at most 100 spent" is `amount >= -100`.
    pub fn to_query_bounds(&self) -> AmountBounds {
        match self.kind {
            AmountKind::Expense => AmountBounds {
                min_amount: self.max.map(|m| -m.abs()),
                max_amount: self.min.map(|m| -m.abs()),
            },
            AmountKind::Income | AmountKind::Any => AmountBounds {
                min_amount: self.min,
                max_amount: self.max,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionFilters {
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount: AmountFilter,
    pub uncategorized_only: bool,
}

impl TransactionFilters {
    /// Number of filters currently narrowing the list.
    pub fn active_count(&self) -> usize {
        [
            self.search.is_some(),
            self.category_id.is_some(),
            self.date_from.is_some() || self.date_to.is_some(),
            self.amount.is_set(),
            self.uncategorized_only,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// A single edit to the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(Option<String>),
    Category(Option<i64>),
    DateFrom(Option<NaiveDate>),
    DateTo(Option<NaiveDate>),
    Amount(AmountFilter),
    UncategorizedOnly(bool),
    ClearAll,
    Page(u32),
}

/// Applied filters plus pagination for the transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub filters: TransactionFilters,
    pub page: u32,
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            filters: TransactionFilters::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            ..Self::default()
        }
    }

    /// Applies one change. Anything but a page change sends the list back to
    /// page 1; a page change leaves every filter untouched.
    pub fn apply(&mut self, change: FilterChange) {
        let filters = &mut self.filters;
        match change {
            FilterChange::Page(page) => {
                self.page = page.max(1);
                return;
            }
            FilterChange::Search(search) => {
                filters.search = search
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
            }
            FilterChange::Category(category_id) => filters.category_id = category_id,
            FilterChange::DateFrom(date) => filters.date_from = date,
            FilterChange::DateTo(date) => filters.date_to = date,
            FilterChange::Amount(amount) => filters.amount = amount,
            FilterChange::UncategorizedOnly(only) => filters.uncategorized_only = only,
            FilterChange::ClearAll => *filters = TransactionFilters::default(),
        }
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.apply(FilterChange::Page(self.page.saturating_add(1)));
    }

    pub fn previous_page(&mut self) {
        self.apply(FilterChange::Page(self.page.saturating_sub(1)));
    }
}

/// Visibility of the filter controls. Never affects the applied filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPanel {
    #[default]
    Collapsed,
    Expanded,
}

impl FilterPanel {
    pub fn toggle(self) -> Self {
        match self {
            FilterPanel::Collapsed => FilterPanel::Expanded,
            FilterPanel::Expanded => FilterPanel::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == FilterPanel::Expanded
    }
}
