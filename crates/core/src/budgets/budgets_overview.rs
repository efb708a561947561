use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::budgets_model::Budget;
use crate::progress::{budget_progress, BudgetProgress};

/// Totals shown above the budget cards for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetsOverview {
    pub total_budgeted: Decimal,
    pub total_spent: Decimal,
    pub progress: BudgetProgress,
    pub over_budget_count: usize,
}

pub fn summarize_budgets(budgets: &[Budget]) -> BudgetsOverview {
    let total_budgeted: Decimal = budgets.iter().map(|b| b.amount).sum();
    let total_spent: Decimal = budgets.iter().map(|b| b.spent).sum();
    let over_budget_count = budgets
        .iter()
        .filter(|b| b.progress().is_over_budget)
        .count();

    BudgetsOverview {
        total_budgeted,
        total_spent,
        progress: budget_progress(total_budgeted, total_spent),
        over_budget_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn budget(id: i64, amount: Decimal, spent: Decimal) -> Budget {
        Budget {
            id,
            user_id: 1,
            category_id: id,
            month: 3,
            year: 2026,
            amount,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            category: None,
            spent,
            remaining: amount - spent,
            percent_used: 0.0,
            is_over_budget: spent > amount,
        }
    }

    #[test]
    fn test_summarize_budgets() {
        let overview = summarize_budgets(&[
            budget(1, dec!(500.00), dec!(200.00)),
            budget(2, dec!(300.00), dec!(450.00)),
            budget(3, dec!(200.00), dec!(200.00)),
        ]);
        assert_eq!(overview.total_budgeted, dec!(1000.00));
        assert_eq!(overview.total_spent, dec!(850.00));
        assert_eq!(overview.progress.remaining, dec!(150.00));
        assert_eq!(overview.progress.percent_used, 85.0);
        assert_eq!(overview.over_budget_count, 1);
    }

    #[test]
    fn test_summarize_no_budgets() {
        let overview = summarize_budgets(&[]);
        assert_eq!(overview.total_budgeted, Decimal::ZERO);
        assert_eq!(overview.progress.percent_used, 0.0);
        assert_eq!(overview.over_budget_count, 0);
    }
}
