//! Budget and goal progress math.
//!
//! Pure functions, invoked on every render with whatever the data layer last
//! fetched. Division by a zero or negative limit yields 0% rather than an
//! infinite value.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::progress_model::{BudgetProgress, GoalProgress, Progress};
use crate::money::percent_of;
use crate::utils::time_utils::months_remaining_until;

/// Computes remaining amount and percentages for any limit/actual pair.
///
/// Negative actuals (net refunds) count as zero progress.
pub fn calculate_progress(limit: Decimal, actual: Decimal) -> Progress {
    let remaining = limit - actual;
    let percent = percent_of(actual.max(Decimal::ZERO), limit);
    Progress {
        remaining,
        percent,
        bar_percent: percent.clamp(0.0, 100.0),
    }
}

/// Budget card figures. Spending exactly the limit is not over budget.
pub fn budget_progress(limit: Decimal, spent: Decimal) -> BudgetProgress {
    let progress = calculate_progress(limit, spent);
    BudgetProgress {
        spent,
        remaining: progress.remaining,
        percent_used: progress.percent,
        bar_percent: progress.bar_percent,
        is_over_budget: spent > limit,
    }
}

/// Goal card figures as of `today`.
pub fn goal_progress(
    target: Decimal,
    current: Decimal,
    target_date: Option<NaiveDate>,
    monthly_contribution: Option<Decimal>,
    today: NaiveDate,
) -> GoalProgress {
    let progress = calculate_progress(target, current);
    let is_met = current >= target;

    let on_track = match (is_met, target_date, monthly_contribution) {
        (false, Some(date), Some(monthly)) if !monthly.is_zero() => Some(is_on_track(
            progress.remaining,
            monthly,
            months_remaining_until(today, date),
        )),
        _ => None,
    };

    GoalProgress {
        remaining: progress.remaining,
        progress_percent: progress.percent,
        bar_percent: progress.bar_percent,
        is_met,
        on_track,
    }
}

/// The planned monthly contribution must reach what is still needed per
/// remaining month. A target date that has arrived is behind.
fn is_on_track(remaining: Decimal, monthly: Decimal, months_left: Option<Decimal>) -> bool {
    match months_left {
        Some(months) => remaining
            .checked_div(months)
            .map(|required| monthly >= required)
            .unwrap_or(false),
        None => false,
    }
}
