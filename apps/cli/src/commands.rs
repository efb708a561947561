//! Command handlers. Each one talks to the API and prints a rendered panel.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use futures::future::join3;
use rust_decimal::Decimal;

use sprout_client::{
    ApiError, BudgetStore, CategorizationMonitor, GoalStore, SproutApiClient, TransactionStore,
};
use sprout_core::budgets::{BudgetPeriod, BudgetUpdate, NewBudget};
use sprout_core::categories::{find_category_by_name, Category};
use sprout_core::constants::DEFAULT_BATCH_LIMIT;
use sprout_core::filters::{AmountFilter, FilterChange, FilterState};
use sprout_core::goals::{GoalVisibility, NewGoal};
use sprout_core::money::{format_currency, parse_amount};
use sprout_core::plaid::PublicTokenExchange;
use sprout_core::transactions::{TransactionDraft, TransactionPage, TransactionType};

use crate::render;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_optional_amount(input: Option<&str>) -> Result<Option<Decimal>> {
    Ok(input.map(parse_amount).transpose()?)
}

/// Resolves a category given as an id or a case-insensitive name.
fn resolve_category(categories: &[Category], input: &str) -> Result<i64> {
    if let Ok(id) = input.trim().parse::<i64>() {
        return Ok(id);
    }
    find_category_by_name(categories, input)
        .map(|c| c.id)
        .ok_or_else(|| anyhow!("Unknown category '{}'", input.trim()))
}

fn period_or_current(month: Option<u32>, year: Option<i32>) -> Result<BudgetPeriod> {
    let current = BudgetPeriod::current(today());
    Ok(BudgetPeriod::new(
        month.unwrap_or(current.month),
        year.unwrap_or(current.year),
    )?)
}

pub async fn health(client: &SproutApiClient) -> Result<()> {
    let status = client.health().await?;
    println!("API {} at {}", status.status, client.base_url());
    Ok(())
}

pub async fn dashboard(client: &SproutApiClient) -> Result<()> {
    let summary = client.get_dashboard().await?;
    print!("{}", render::dashboard(&summary));
    Ok(())
}

/// Loads the dashboard, this month's budgets and active goals side by side.
/// A failing panel is reported in place; an expired session fails the command.
pub async fn overview(client: &SproutApiClient) -> Result<()> {
    let today = today();
    let period = BudgetPeriod::current(today);
    let (summary, budgets, goals) = join3(
        client.get_dashboard(),
        client.list_budgets(Some(period)),
        client.list_goals(GoalVisibility::Active),
    )
    .await;

    for err in [summary.as_ref().err(), budgets.as_ref().err(), goals.as_ref().err()]
        .into_iter()
        .flatten()
    {
        if err.requires_login() {
            return Err(ApiError::Unauthorized.into());
        }
    }

    match summary {
        Ok(summary) => print!("{}", render::dashboard(&summary)),
        Err(err) => println!("Dashboard unavailable: {}", err.user_message()),
    }
    println!();
    match budgets {
        Ok(budgets) => print!("{}", render::budgets(period, &budgets)),
        Err(err) => println!("Budgets unavailable: {}", err.user_message()),
    }
    println!();
    match goals {
        Ok(goals) => print!("{}", render::goals(&goals, today)),
        Err(err) => println!("Goals unavailable: {}", err.user_message()),
    }
    Ok(())
}

pub async fn accounts(client: &SproutApiClient) -> Result<()> {
    let accounts = client.list_accounts().await?;
    print!("{}", render::accounts(&accounts));
    Ok(())
}

pub async fn budgets(client: &SproutApiClient, month: Option<u32>, year: Option<i32>) -> Result<()> {
    let period = period_or_current(month, year)?;
    let mut store = BudgetStore::new(Arc::new(client.clone()), period);
    store.load().await?;
    print!("{}", render::budgets(store.period(), store.items()));
    Ok(())
}

pub async fn budget_set(
    client: &SproutApiClient,
    category: &str,
    amount: &str,
    month: Option<u32>,
    year: Option<i32>,
) -> Result<()> {
    let period = period_or_current(month, year)?;
    let categories = client.list_categories().await?;
    let budget = NewBudget {
        category_id: resolve_category(&categories, category)?,
        month: period.month,
        year: period.year,
        amount: parse_amount(amount)?,
    };
    let mut store = BudgetStore::new(Arc::new(client.clone()), period);
    let saved = store.create(&budget).await?;
    println!("{}", render::budget_line(&saved));
    Ok(())
}

pub async fn budget_update(client: &SproutApiClient, id: i64, amount: &str) -> Result<()> {
    let patch = BudgetUpdate::amount(parse_amount(amount)?);
    patch.validate()?;
    let existing = client.get_budget(id).await?;
    let mut store = BudgetStore::new(Arc::new(client.clone()), existing.period());
    store.load().await?;
    let saved = store.update(id, patch).await?;
    println!("{}", render::budget_line(&saved));
    Ok(())
}

pub async fn budget_delete(client: &SproutApiClient, id: i64) -> Result<()> {
    client.delete_budget(id).await?;
    println!("Deleted budget {}", id);
    Ok(())
}

pub async fn goals(client: &SproutApiClient, visibility: GoalVisibility) -> Result<()> {
    let today = today();
    let mut store = GoalStore::new(Arc::new(client.clone()), visibility, today);
    store.load().await?;
    let visible: Vec<_> = store.visible().cloned().collect();
    print!("{}", render::goals(&visible, today));
    Ok(())
}

pub async fn goal_add(
    client: &SproutApiClient,
    name: String,
    target: &str,
    target_date: Option<NaiveDate>,
    monthly: Option<&str>,
) -> Result<()> {
    let today = today();
    let goal = NewGoal {
        name,
        target_amount: parse_amount(target)?,
        target_date,
        monthly_contribution: parse_optional_amount(monthly)?,
    };
    let mut store = GoalStore::new(Arc::new(client.clone()), GoalVisibility::Active, today);
    let saved = store.create(&goal).await?;
    println!("{}", render::goal_line(&saved, today));
    Ok(())
}

pub async fn goal_set_archived(client: &SproutApiClient, id: i64, archived: bool) -> Result<()> {
    let today = today();
    let mut store = GoalStore::new(Arc::new(client.clone()), GoalVisibility::All, today);
    store.load().await?;
    let saved = if archived {
        store.archive(id).await?
    } else {
        store.unarchive(id).await?
    };
    println!("{}", render::goal_line(&saved, today));
    Ok(())
}

/// Filter flags of the `transactions` command.
#[derive(Debug, Default, Clone)]
pub struct TransactionArgs {
    pub search: Option<String>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub expense_min: Option<String>,
    pub expense_max: Option<String>,
    pub income_min: Option<String>,
    pub income_max: Option<String>,
    pub uncategorized: bool,
    pub page: u32,
    pub query: Option<String>,
}

pub async fn transactions(client: &SproutApiClient, args: TransactionArgs, page_size: u32) -> Result<()> {
    let mut state = match args.query.as_deref() {
        Some(query) => FilterState::from_url_query(query.trim_start_matches('?')),
        None => FilterState::default(),
    };
    state.page_size = FilterState::with_page_size(page_size).page_size;

    let categories = match args.category.as_deref() {
        Some(input) if input.trim().parse::<i64>().is_err() => client.list_categories().await?,
        _ => Vec::new(),
    };
    for change in filter_changes(&args, &categories)? {
        state.apply(change);
    }
    if args.page > 1 {
        state.apply(FilterChange::Page(args.page));
    }

    let query = state.to_url_query();
    if !query.is_empty() {
        println!("Filters: ?{}", query);
    }

    let mut store = TransactionStore::new(Arc::new(client.clone()), state);
    store.load().await?;
    let stats = client.transaction_stats(store.filters()).await;
    let page = TransactionPage {
        transactions: store.items().to_vec(),
        total: store.total(),
        page: store.filters().page,
        pages: store.pages(),
    };
    match stats {
        Ok(stats) => print!("{}", render::transactions(&page, Some(&stats))),
        Err(err) if err.requires_login() => return Err(err.into()),
        Err(err) => {
            tracing::warn!("Transaction totals unavailable: {}", err);
            print!("{}", render::transactions(&page, None));
        }
    }
    Ok(())
}

/// Turns command flags into filter edits, in the order a user would apply them.
pub fn filter_changes(args: &TransactionArgs, categories: &[Category]) -> Result<Vec<FilterChange>> {
    let mut changes = Vec::new();
    if let Some(search) = &args.search {
        changes.push(FilterChange::Search(Some(search.clone())));
    }
    if let Some(category) = &args.category {
        changes.push(FilterChange::Category(Some(resolve_category(categories, category)?)));
    }
    if let Some(from) = args.from {
        changes.push(FilterChange::DateFrom(Some(from)));
    }
    if let Some(to) = args.to {
        changes.push(FilterChange::DateTo(Some(to)));
    }

    let expense = (
        parse_optional_amount(args.expense_min.as_deref())?,
        parse_optional_amount(args.expense_max.as_deref())?,
    );
    let income = (
        parse_optional_amount(args.income_min.as_deref())?,
        parse_optional_amount(args.income_max.as_deref())?,
    );
    match (expense, income) {
        ((None, None), (None, None)) => {}
        ((min, max), (None, None)) => changes.push(FilterChange::Amount(AmountFilter::expense(min, max))),
        ((None, None), (min, max)) => changes.push(FilterChange::Amount(AmountFilter::income(min, max))),
        _ => return Err(anyhow!("Use either expense or income amount bounds, not both")),
    }

    if args.uncategorized {
        changes.push(FilterChange::UncategorizedOnly(true));
    }
    Ok(changes)
}

/// Edits of the `tx-edit` command.
#[derive(Debug, Default, Clone)]
pub struct TransactionEdit {
    pub amount: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub clear_category: bool,
    pub goal: Option<i64>,
    pub clear_goal: bool,
    pub flip: bool,
    pub notes: Option<String>,
}

impl TransactionEdit {
    /// Applies the flags to a draft. `category_id` is the resolved `category`.
    fn apply(self, draft: &mut TransactionDraft, category_id: Option<i64>) -> Result<()> {
        if let Some(amount) = self.amount.as_deref() {
            draft.set_amount(parse_amount(amount)?);
        }
        if self.flip {
            draft.set_kind(draft.kind.flipped());
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if self.clear_category {
            draft.category_id = None;
        } else if category_id.is_some() {
            draft.category_id = category_id;
        }
        if self.clear_goal {
            draft.goal_id = None;
        } else if let Some(goal) = self.goal {
            draft.goal_id = Some(goal);
        }
        if let Some(notes) = self.notes {
            draft.notes = Some(notes);
        }
        Ok(())
    }
}

pub async fn transaction_edit(client: &SproutApiClient, id: i64, edit: TransactionEdit) -> Result<()> {
    let existing = client.get_transaction(id).await?;
    let mut draft = TransactionDraft::from_transaction(&existing);

    let category_id = match edit.category.as_deref() {
        Some(category) if !edit.clear_category => {
            let categories = client.list_categories().await?;
            Some(resolve_category(&categories, category)?)
        }
        _ => None,
    };
    edit.apply(&mut draft, category_id)?;

    let patch = draft.into_update()?;
    let saved = client.update_transaction(id, &patch).await?;
    println!(
        "{} {} {} {}",
        saved.id,
        saved.date,
        saved.display_name(),
        format_currency(saved.amount)
    );
    Ok(())
}

pub async fn transaction_add(
    client: &SproutApiClient,
    account_id: i64,
    amount: &str,
    description: String,
    date: Option<NaiveDate>,
    income: bool,
) -> Result<()> {
    let kind = if income {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };
    let mut draft = TransactionDraft::new(kind, date.unwrap_or_else(today));
    draft.set_amount(parse_amount(amount)?);
    draft.description = description;
    let saved = client.create_transaction(&draft.into_new(account_id)?).await?;
    println!("Created transaction {} ({})", saved.id, saved.kind());
    Ok(())
}

pub async fn transaction_delete(client: &SproutApiClient, id: i64) -> Result<()> {
    client.delete_transaction(id).await?;
    println!("Deleted transaction {}", id);
    Ok(())
}

pub async fn categorize(
    client: &SproutApiClient,
    watch: bool,
    limit: Option<u32>,
    max_polls: usize,
) -> Result<()> {
    let mut monitor = CategorizationMonitor::new(Arc::new(client.clone()))
        .with_batch_limit(limit.unwrap_or(DEFAULT_BATCH_LIMIT));
    let started = monitor.start().await?;
    match started.message.as_deref() {
        Some(message) => println!("{}", message),
        None => println!("Queued {} transactions", started.queued_count()),
    }
    if !watch || !started.started() {
        return Ok(());
    }

    let remaining = monitor
        .watch(max_polls, |count| println!("{} uncategorized remaining", count))
        .await?;
    if remaining == 0 {
        println!("All transactions categorized");
    }
    Ok(())
}

/// Runs the categorizer on a single transaction and waits for the outcome.
pub async fn categorize_one(client: &SproutApiClient, id: i64) -> Result<()> {
    let result = client.process_transaction(id).await?;
    if let Some(reason) = result.failure() {
        return Err(anyhow!("{}", reason));
    }
    print!("{}", render::categorization(id, &result));
    Ok(())
}

pub async fn banks(client: &SproutApiClient) -> Result<()> {
    let items = client.list_plaid_items().await?;
    print!("{}", render::plaid_items(&items));
    Ok(())
}

pub async fn bank_status(client: &SproutApiClient, id: i64) -> Result<()> {
    let status = client.plaid_item_status(id).await?;
    print!("{}", render::plaid_status(&status));
    Ok(())
}

pub async fn bank_sync(client: &SproutApiClient, id: i64) -> Result<()> {
    let result = client.sync_plaid_item(id).await?;
    print!("{}", render::sync_result(&result));
    Ok(())
}

pub async fn bank_link_token(client: &SproutApiClient) -> Result<()> {
    let token = client.create_link_token().await?;
    println!("{}", token.link_token);
    Ok(())
}

pub async fn bank_link(
    client: &SproutApiClient,
    public_token: String,
    institution_name: String,
    institution_id: Option<String>,
) -> Result<()> {
    let exchange = PublicTokenExchange {
        public_token,
        institution_name,
        institution_id,
    };
    let result = client.exchange_public_token(&exchange).await?;
    println!(
        "Linked item {}: {} accounts synced",
        result.plaid_item_id, result.accounts_synced
    );
    if let Some(warning) = result.warning {
        println!("Warning: {}", warning);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sprout_core::filters::AmountKind;

    fn categories() -> Vec<Category> {
        vec![Category {
            id: 7,
            name: "Groceries".into(),
            icon: None,
            color: None,
        }]
    }

    #[test]
    fn test_resolve_category_by_id_or_name() {
        assert_eq!(resolve_category(&categories(), "7").unwrap(), 7);
        assert_eq!(resolve_category(&categories(), " groceries ").unwrap(), 7);
        assert!(resolve_category(&categories(), "Rent").is_err());
    }

    fn draft() -> TransactionDraft {
        let mut draft = TransactionDraft::new(
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        );
        draft.set_amount(dec!(50));
        draft.description = "Whole Foods".into();
        draft.category_id = Some(7);
        draft
    }

    #[test]
    fn test_edit_links_goal_and_keeps_expense_sign() {
        let mut draft = draft();
        let edit = TransactionEdit {
            amount: Some("75".into()),
            goal: Some(3),
            ..TransactionEdit::default()
        };
        edit.apply(&mut draft, None).unwrap();

        assert_eq!(draft.goal_id, Some(3));
        assert_eq!(draft.category_id, Some(7));
        let patch = draft.into_update().unwrap();
        assert_eq!(patch.amount, Some(dec!(-75)));
        assert_eq!(patch.goal_id, Some(Some(3)));
    }

    #[test]
    fn test_edit_clears_goal_and_category() {
        let mut draft = draft();
        draft.goal_id = Some(3);
        let edit = TransactionEdit {
            clear_goal: true,
            clear_category: true,
            ..TransactionEdit::default()
        };
        edit.apply(&mut draft, None).unwrap();

        let patch = draft.into_update().unwrap();
        assert_eq!(patch.goal_id, Some(None));
        assert_eq!(patch.category_id, Some(None));
    }

    #[test]
    fn test_filter_changes_from_flags() {
        let args = TransactionArgs {
            search: Some("whole foods".into()),
            category: Some("Groceries".into()),
            expense_min: Some("10".into()),
            ..TransactionArgs::default()
        };
        let changes = filter_changes(&args, &categories()).unwrap();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[1], FilterChange::Category(Some(7)));
        match &changes[2] {
            FilterChange::Amount(amount) => {
                assert_eq!(amount.kind, AmountKind::Expense);
                assert_eq!(amount.min, Some(dec!(10)));
                assert_eq!(amount.max, None);
            }
            other => panic!("unexpected change {:?}", other),
        }
    }

    #[test]
    fn test_filter_changes_rejects_mixed_directions() {
        let args = TransactionArgs {
            expense_min: Some("10".into()),
            income_max: Some("50".into()),
            ..TransactionArgs::default()
        };
        assert!(filter_changes(&args, &[]).is_err());
    }
}
