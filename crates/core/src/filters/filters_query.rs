//! URL and API query encodings of [`FilterState`].

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;
use url::form_urlencoded;

use super::filters_model::{AmountKind, FilterState};

const KEY_SEARCH: &str = "q";
const KEY_CATEGORY: &str = "category";
const KEY_FROM: &str = "from";
const KEY_TO: &str = "to";
const KEY_AMOUNT_TYPE: &str = "amount_type";
const KEY_MIN: &str = "min";
const KEY_MAX: &str = "max";
const KEY_UNCATEGORIZED: &str = "uncategorized";
const KEY_PAGE: &str = "page";

impl FilterState {
    /// Bookmarkable query string. Only set values are written; page 1 is
    /// implied.
    pub fn to_url_query(&self) -> String {
        let f = &self.filters;
        let mut query = form_urlencoded::Serializer::new(String::new());

        if let Some(search) = &f.search {
            query.append_pair(KEY_SEARCH, search);
        }
        if let Some(category_id) = f.category_id {
            query.append_pair(KEY_CATEGORY, &category_id.to_string());
        }
        if let Some(from) = f.date_from {
            query.append_pair(KEY_FROM, &from.to_string());
        }
        if let Some(to) = f.date_to {
            query.append_pair(KEY_TO, &to.to_string());
        }
        match f.amount.kind {
            AmountKind::Expense => {
                query.append_pair(KEY_AMOUNT_TYPE, "expense");
            }
            AmountKind::Income => {
                query.append_pair(KEY_AMOUNT_TYPE, "income");
            }
            AmountKind::Any => {}
        }
        if let Some(min) = f.amount.min {
            query.append_pair(KEY_MIN, &min.to_string());
        }
        if let Some(max) = f.amount.max {
            query.append_pair(KEY_MAX, &max.to_string());
        }
        if f.uncategorized_only {
            query.append_pair(KEY_UNCATEGORIZED, "true");
        }
        if self.page > 1 {
            query.append_pair(KEY_PAGE, &self.page.to_string());
        }

        query.finish()
    }

    /// Restores a filter state from a bookmarked query. Unknown keys and
    /// values that do not parse are skipped.
    pub fn from_url_query(query: &str) -> Self {
        let mut state = FilterState::default();
        let query = query.trim_start_matches('?');

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            let f = &mut state.filters;
            match key.as_ref() {
                KEY_SEARCH => f.search = Some(value.to_string()).filter(|s| !s.is_empty()),
                KEY_CATEGORY => f.category_id = value.parse().ok(),
                KEY_FROM => f.date_from = NaiveDate::from_str(value).ok(),
                KEY_TO => f.date_to = NaiveDate::from_str(value).ok(),
                KEY_AMOUNT_TYPE => {
                    f.amount.kind = match value {
                        "expense" => AmountKind::Expense,
                        "income" => AmountKind::Income,
                        _ => AmountKind::Any,
                    }
                }
                KEY_MIN => f.amount.min = Decimal::from_str(value).ok(),
                KEY_MAX => f.amount.max = Decimal::from_str(value).ok(),
                KEY_UNCATEGORIZED => f.uncategorized_only = matches!(value, "true" | "1"),
                KEY_PAGE => state.page = value.parse::<u32>().ok().filter(|p| *p > 0).unwrap_or(1),
                other => debug!("Ignoring unknown filter key '{}'", other),
            }
        }

        state
    }

    /// Query pairs for `GET /api/transactions` and `/api/transactions/stats`.
    pub fn to_api_query(&self) -> Vec<(&'static str, String)> {
        let f = &self.filters;
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.page_size.to_string()),
        ];

        if let Some(search) = &f.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category_id) = f.category_id {
            pairs.push(("category_id", category_id.to_string()));
        }
        if let Some(from) = f.date_from {
            pairs.push(("date_from", from.to_string()));
        }
        if let Some(to) = f.date_to {
            pairs.push(("date_to", to.to_string()));
        }

        let bounds = f.amount.to_query_bounds();
        if let Some(min) = bounds.min_amount {
            pairs.push(("min_amount", min.to_string()));
        }
        if let Some(max) = bounds.max_amount {
            pairs.push(("max_amount", max.to_string()));
        }
        if f.uncategorized_only {
            pairs.push(("is_uncategorized", "true".to_string()));
        }

        pairs
    }
}
