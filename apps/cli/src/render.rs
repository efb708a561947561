//! Plain-text rendering of dashboard panels.

use std::fmt::Write;

use chrono::NaiveDate;

use sprout_core::accounts::{summarize_accounts, Account};
use sprout_core::agents::ProcessTransactionResult;
use sprout_core::budgets::{summarize_budgets, Budget, BudgetPeriod};
use sprout_core::dashboard::DashboardSummary;
use sprout_core::goals::Goal;
use sprout_core::money::{format_currency, format_percent};
use sprout_core::plaid::{PlaidItem, PlaidItemStatus, SyncResult};
use sprout_core::transactions::{TransactionPage, TransactionStats};

const BAR_WIDTH: usize = 20;

/// Fixed-width bar. `bar_percent` is already clamped to 0..=100.
pub fn progress_bar(bar_percent: f64) -> String {
    let filled = ((bar_percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Income      {:>14}", format_currency(summary.income));
    let _ = writeln!(out, "Expenses    {:>14}", format_currency(summary.expenses));
    let _ = writeln!(
        out,
        "Savings     {:>14}  ({} of income)",
        format_currency(summary.savings),
        format_percent(summary.savings_rate())
    );
    let _ = writeln!(out, "Assets      {:>14}", format_currency(summary.assets));
    let _ = writeln!(out, "Liabilities {:>14}", format_currency(summary.liabilities()));
    let _ = writeln!(out, "Net worth   {:>14}", format_currency(summary.net_worth));

    if !summary.spending_breakdown.is_empty() {
        let _ = writeln!(out, "\nTop spending");
        for item in summary.top_spending(5) {
            let _ = writeln!(
                out,
                "  {:<20} {:>12} {:>5}",
                item.category,
                format_currency(item.amount),
                format_percent(item.percentage)
            );
        }
    }

    let _ = writeln!(out, "\nRecent transactions");
    if summary.recent().is_empty() {
        let _ = writeln!(out, "  No transactions yet");
    }
    for tx in summary.recent() {
        let _ = writeln!(
            out,
            "  {} {:<28} {:>12}  {}",
            tx.date,
            tx.description,
            format_currency(tx.amount),
            tx.category.as_deref().unwrap_or("Uncategorized")
        );
    }
    out
}

pub fn accounts(accounts: &[Account]) -> String {
    let mut out = String::new();
    for account in accounts {
        let _ = writeln!(
            out,
            "{:<5} {:<24} {:<12} {:<6} {:>14}",
            account.id,
            account.name,
            account.account_type.to_string(),
            account.masked_number(),
            format_currency(account.balance)
        );
    }
    let totals = summarize_accounts(accounts);
    let _ = writeln!(
        out,
        "Assets {}  Liabilities {}  Net worth {}",
        format_currency(totals.assets),
        format_currency(totals.liabilities),
        format_currency(totals.net_worth)
    );
    out
}

pub fn budget_line(budget: &Budget) -> String {
    let progress = budget.progress();
    let flag = if progress.is_over_budget { "  OVER" } else { "" };
    format!(
        "{:<5} {:<20} {} {:>5}  {} of {}{}",
        budget.id,
        budget.category_name(),
        progress_bar(progress.bar_percent),
        format_percent(progress.percent_used),
        format_currency(progress.spent),
        format_currency(budget.amount),
        flag
    )
}

pub fn budgets(period: BudgetPeriod, budgets: &[Budget]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Budgets for {}", period);
    if budgets.is_empty() {
        let _ = writeln!(out, "  No budgets for this month");
        return out;
    }
    for budget in budgets {
        let _ = writeln!(out, "{}", budget_line(budget));
    }
    let overview = summarize_budgets(budgets);
    let _ = writeln!(
        out,
        "Total {} of {} ({}), {} over budget",
        format_currency(overview.total_spent),
        format_currency(overview.total_budgeted),
        format_percent(overview.progress.percent_used),
        overview.over_budget_count
    );
    out
}

pub fn goal_line(goal: &Goal, today: NaiveDate) -> String {
    let progress = goal.progress(today);
    let archived = if goal.is_archived() { "  (archived)" } else { "" };
    let due = goal
        .target_date
        .map(|d| format!("  by {}", d))
        .unwrap_or_default();
    format!(
        "{:<5} {:<20} {} {:>5}  {} of {}  {}{}{}",
        goal.id,
        goal.name,
        progress_bar(progress.bar_percent),
        format_percent(progress.progress_percent),
        format_currency(goal.current_amount),
        format_currency(goal.target_amount),
        progress.status(),
        due,
        archived
    )
}

pub fn goals(goals: &[Goal], today: NaiveDate) -> String {
    if goals.is_empty() {
        return "No goals\n".to_string();
    }
    goals
        .iter()
        .map(|g| format!("{}\n", goal_line(g, today)))
        .collect()
}

pub fn transactions(page: &TransactionPage, stats: Option<&TransactionStats>) -> String {
    let mut out = String::new();
    for tx in &page.transactions {
        let _ = writeln!(
            out,
            "{:<6} {} {:<28} {:>12}  {}",
            tx.id,
            tx.date,
            tx.display_name(),
            format_currency(tx.amount),
            tx.category_name()
        );
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} transactions)",
        page.page,
        page.pages.max(1),
        page.total
    );
    if let Some(stats) = stats {
        let _ = writeln!(
            out,
            "Income {}  Expenses {}  Net {}",
            format_currency(stats.total_income),
            format_currency(stats.total_expenses),
            format_currency(stats.net)
        );
    }
    out
}

pub fn plaid_items(items: &[PlaidItem]) -> String {
    if items.is_empty() {
        return "No linked banks\n".to_string();
    }
    items
        .iter()
        .map(|item| format!("{:<5} {:<28} {}\n", item.id, item.institution_name, item.health()))
        .collect()
}

pub fn plaid_status(status: &PlaidItemStatus) -> String {
    let last_synced = status
        .last_synced
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string());
    let mut out = format!(
        "{} ({})\n  accounts {}  transactions {}  last synced {}\n",
        status.institution_name,
        status.health(),
        status.accounts_count,
        status.transactions_count,
        last_synced
    );
    if status.needs_reauth() {
        out.push_str("  Sign in to your bank again to resume syncing.\n");
    }
    out
}

pub fn sync_result(result: &SyncResult) -> String {
    format!(
        "Synced {} accounts: {} added, {} modified, {} removed\n",
        result.accounts_synced,
        result.transactions.added,
        result.transactions.modified,
        result.transactions.removed
    )
}

pub fn categorization(id: i64, result: &ProcessTransactionResult) -> String {
    let merchant = result.normalized_merchant.as_deref().unwrap_or("unknown merchant");
    let category = match result.category_id {
        Some(category_id) => format!("category {}", category_id),
        None => "no category".to_string(),
    };
    let source = if result.llm_used { "model" } else { "rules" };
    format!(
        "Transaction {}: {} -> {} ({}, {:.0} ms)\n",
        id, merchant, category, source, result.time_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sprout_core::categories::Category;

    fn budget(amount: rust_decimal::Decimal, spent: rust_decimal::Decimal) -> Budget {
        Budget {
            id: 3,
            user_id: 1,
            category_id: 7,
            month: 3,
            year: 2026,
            amount,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            category: Some(Category {
                id: 7,
                name: "Groceries".into(),
                icon: None,
                color: None,
            }),
            spent,
            remaining: amount - spent,
            percent_used: 0.0,
            is_over_budget: spent > amount,
        }
    }

    #[test]
    fn test_progress_bar_widths() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(50.0), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(100.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(progress_bar(250.0), progress_bar(100.0));
    }

    #[test]
    fn test_over_budget_line_shows_unclamped_label() {
        let line = budget_line(&budget(dec!(500.00), dec!(600.00)));
        assert!(line.contains("120%"), "{}", line);
        assert!(line.contains(&format!("[{}]", "#".repeat(20))), "{}", line);
        assert!(line.ends_with("OVER"), "{}", line);
        assert!(line.contains("$600.00 of $500.00"), "{}", line);
    }

    #[test]
    fn test_empty_budgets() {
        let period = BudgetPeriod::new(3, 2026).unwrap();
        let out = budgets(period, &[]);
        assert!(out.starts_with("Budgets for March 2026"));
        assert!(out.contains("No budgets"));
    }

    #[test]
    fn test_dashboard_without_transactions() {
        let out = dashboard(&DashboardSummary::default());
        assert!(out.contains("No transactions yet"));
        assert!(out.contains("Net worth"));
        assert!(!out.contains("Top spending"));
    }

    #[test]
    fn test_categorization_line() {
        let result = ProcessTransactionResult {
            success: true,
            normalized_merchant: Some("Whole Foods".into()),
            category_id: Some(4),
            llm_used: false,
            time_ms: 12.4,
            error: None,
        };
        assert_eq!(
            categorization(5, &result),
            "Transaction 5: Whole Foods -> category 4 (rules, 12 ms)\n"
        );
    }
}
