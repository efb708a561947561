//! Account domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts_constants::{default_group_for_account_type, is_liability_type};

/// Kind of balance-bearing container. Decides the sign of its net worth contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    CreditCard,
    Investment,
    Brokerage,
    Cash,
    Loan,
    /// Any type the server adds later
    #[serde(other)]
    Other,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::CreditCard => "Credit Card",
            AccountType::Investment => "Investment",
            AccountType::Brokerage => "Brokerage",
            AccountType::Cash => "Cash",
            AccountType::Loan => "Loan",
            AccountType::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Bank-linked or manual account as returned by `/api/accounts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub provider: Option<String>,
    /// Last digits of the account number
    #[serde(default)]
    pub account_num: Option<String>,
    pub balance: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Set when the account was created through a bank connection
    #[serde(default)]
    pub plaid_item_id: Option<i64>,
}

fn default_active() -> bool {
    true
}

impl Account {
    pub fn is_liability(&self) -> bool {
        is_liability_type(self.account_type)
    }

    pub fn is_linked(&self) -> bool {
        self.plaid_item_id.is_some()
    }

    /// Signed amount this account adds to net worth.
    ///
    /// Liabilities subtract their magnitude whatever sign the bank reports
    /// (credit cards arrive both as `-500.00` and `500.00`).
    pub fn net_worth_contribution(&self) -> Decimal {
        if self.is_liability() {
            -self.balance.abs()
        } else {
            self.balance
        }
    }

    pub fn group(&self) -> &'static str {
        default_group_for_account_type(self.account_type)
    }

    /// `•••• 1234`, or an empty string when no number is known.
    pub fn masked_number(&self) -> String {
        match self.account_num.as_deref().map(str::trim) {
            Some(num) if !num.is_empty() => {
                let start = num.char_indices().rev().nth(3).map(|(i, _)| i).unwrap_or(0);
                format!("•••• {}", &num[start..])
            }
            _ => String::new(),
        }
    }
}

/// Aggregate balances for the accounts screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AccountTotals {
    pub assets: Decimal,
    /// Positive magnitude
    pub liabilities: Decimal,
    pub net_worth: Decimal,
}

/// Sums active accounts into assets, liabilities and net worth.
pub fn summarize_accounts(accounts: &[Account]) -> AccountTotals {
    accounts
        .iter()
        .filter(|a| a.is_active)
        .fold(AccountTotals::default(), |mut totals, account| {
            let contribution = account.net_worth_contribution();
            if account.is_liability() {
                totals.liabilities += -contribution;
            } else {
                totals.assets += contribution;
            }
            totals.net_worth += contribution;
            totals
        })
}
