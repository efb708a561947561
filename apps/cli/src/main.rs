//! `sprout` - terminal front end for the Sprout finance API.

mod commands;
mod config;
mod main_lib;
mod render;

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use sprout_core::goals::GoalVisibility;

use crate::commands::{TransactionArgs, TransactionEdit};
use crate::config::Config;
use crate::main_lib::{build_client, describe_failure, init_tracing};

#[derive(Parser)]
#[command(name = "sprout", about = "Personal finance dashboard in the terminal", version)]
struct Cli {
    /// Base URL of the Sprout API
    #[arg(long, global = true, env = "SPROUT_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the current session
    #[arg(long, global = true, env = "SPROUT_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is reachable
    Health,

    /// Monthly income, spending and recent transactions
    Dashboard,

    /// Dashboard, budgets and goals in one view
    Overview,

    /// Accounts and net worth
    Accounts,

    /// Budgets for a month (defaults to the current month)
    Budgets {
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Set a monthly limit for a category
    BudgetSet {
        /// Category id or name
        #[arg(long)]
        category: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Change a budget's limit
    BudgetUpdate {
        id: i64,
        #[arg(long)]
        amount: String,
    },

    /// Delete a budget
    BudgetDelete { id: i64 },

    /// Savings goals
    Goals {
        /// Show archived goals only
        #[arg(long, conflicts_with = "all")]
        archived: bool,
        /// Show active and archived goals
        #[arg(long)]
        all: bool,
    },

    /// Create a savings goal
    GoalAdd {
        name: String,
        target: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        by: Option<NaiveDate>,
        /// Planned monthly contribution
        #[arg(long)]
        monthly: Option<String>,
    },

    /// Archive a goal
    GoalArchive { id: i64 },

    /// Restore an archived goal
    GoalUnarchive { id: i64 },

    /// List transactions
    Transactions {
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Category id or name
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Smallest expense, as a positive amount
        #[arg(long)]
        expense_min: Option<String>,
        #[arg(long)]
        expense_max: Option<String>,
        #[arg(long)]
        income_min: Option<String>,
        #[arg(long)]
        income_max: Option<String>,
        #[arg(long)]
        uncategorized: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Start from a saved filter query string
        #[arg(long)]
        query: Option<String>,
    },

    /// Record a transaction
    TxAdd {
        account_id: i64,
        amount: String,
        description: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
    },

    /// Edit a transaction
    TxEdit {
        id: i64,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "clear_category")]
        category: Option<String>,
        #[arg(long)]
        clear_category: bool,
        /// Goal the transaction contributes to
        #[arg(long, conflicts_with = "clear_goal")]
        goal: Option<i64>,
        #[arg(long)]
        clear_goal: bool,
        /// Switch between income and expense
        #[arg(long)]
        flip: bool,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a transaction
    TxDelete { id: i64 },

    /// Queue uncategorized transactions for automatic categorization
    Categorize {
        /// Categorize this transaction only, right away
        #[arg(long, conflicts_with_all = ["watch", "limit"])]
        transaction: Option<i64>,
        /// Keep polling until everything is categorized
        #[arg(long)]
        watch: bool,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 60)]
        max_polls: usize,
    },

    /// Linked banks
    Banks,

    /// Connection health of a linked bank
    BankStatus { id: i64 },

    /// Pull new transactions from a linked bank
    BankSync { id: i64 },

    /// Create a link token for the bank connection flow
    BankLinkToken,

    /// Finish linking a bank with the public token from the connection flow
    BankLink {
        public_token: String,
        institution_name: String,
        #[arg(long)]
        institution_id: Option<String>,
    },
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let client = build_client(&config)?;

    match cli.command {
        Commands::Health => commands::health(&client).await,
        Commands::Dashboard => commands::dashboard(&client).await,
        Commands::Overview => commands::overview(&client).await,
        Commands::Accounts => commands::accounts(&client).await,
        Commands::Budgets { month, year } => commands::budgets(&client, month, year).await,
        Commands::BudgetSet {
            category,
            amount,
            month,
            year,
        } => commands::budget_set(&client, &category, &amount, month, year).await,
        Commands::BudgetUpdate { id, amount } => commands::budget_update(&client, id, &amount).await,
        Commands::BudgetDelete { id } => commands::budget_delete(&client, id).await,
        Commands::Goals { archived, all } => {
            let visibility = if all {
                GoalVisibility::All
            } else if archived {
                GoalVisibility::Archived
            } else {
                GoalVisibility::Active
            };
            commands::goals(&client, visibility).await
        }
        Commands::GoalAdd {
            name,
            target,
            by,
            monthly,
        } => commands::goal_add(&client, name, &target, by, monthly.as_deref()).await,
        Commands::GoalArchive { id } => commands::goal_set_archived(&client, id, true).await,
        Commands::GoalUnarchive { id } => commands::goal_set_archived(&client, id, false).await,
        Commands::Transactions {
            search,
            category,
            from,
            to,
            expense_min,
            expense_max,
            income_min,
            income_max,
            uncategorized,
            page,
            query,
        } => {
            let args = TransactionArgs {
                search,
                category,
                from,
                to,
                expense_min,
                expense_max,
                income_min,
                income_max,
                uncategorized,
                page,
                query,
            };
            commands::transactions(&client, args, config.page_size).await
        }
        Commands::TxAdd {
            account_id,
            amount,
            description,
            date,
            income,
        } => commands::transaction_add(&client, account_id, &amount, description, date, income).await,
        Commands::TxEdit {
            id,
            amount,
            description,
            category,
            clear_category,
            goal,
            clear_goal,
            flip,
            notes,
        } => {
            let edit = TransactionEdit {
                amount,
                description,
                category,
                clear_category,
                goal,
                clear_goal,
                flip,
                notes,
            };
            commands::transaction_edit(&client, id, edit).await
        }
        Commands::TxDelete { id } => commands::transaction_delete(&client, id).await,
        Commands::Categorize {
            transaction: Some(id),
            ..
        } => commands::categorize_one(&client, id).await,
        Commands::Categorize {
            transaction: None,
            watch,
            limit,
            max_polls,
        } => commands::categorize(&client, watch, limit, max_polls).await,
        Commands::Banks => commands::banks(&client).await,
        Commands::BankStatus { id } => commands::bank_status(&client, id).await,
        Commands::BankSync { id } => commands::bank_sync(&client, id).await,
        Commands::BankLinkToken => commands::bank_link_token(&client).await,
        Commands::BankLink {
            public_token,
            institution_name,
            institution_id,
        } => commands::bank_link(&client, public_token, institution_name, institution_id).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let cli = Cli::parse();
    let config = config.with_overrides(cli.api_url.clone(), cli.token.clone());

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("Command failed: {:?}", err);
            let (code, message) = describe_failure(&err);
            eprintln!("{}", message);
            ExitCode::from(code)
        }
    }
}
