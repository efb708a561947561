//! Category domain models.

use serde::{Deserialize, Serialize};

/// Spending category. Categories are global and seeded by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Category {
    /// Name prefixed with the icon when one is set.
    pub fn label(&self) -> String {
        match self.icon.as_deref().filter(|i| !i.is_empty()) {
            Some(icon) => format!("{} {}", icon, self.name),
            None => self.name.clone(),
        }
    }
}

/// Looks up a category by id.
pub fn find_category(categories: &[Category], id: i64) -> Option<&Category> {
    categories.iter().find(|c| c.id == id)
}

/// Looks up a category by case-insensitive name.
pub fn find_category_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let needle = name.trim();
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(needle))
}
