use super::accounts_model::AccountType;

/// Account types whose balance is money owed rather than money held
pub const LIABILITY_ACCOUNT_TYPES: &[AccountType] = &[AccountType::CreditCard, AccountType::Loan];

/// Returns the group heading used when listing accounts.
///
/// # Arguments
/// * `account_type` - The account type
///
/// # Returns
/// The display group for the account type
pub fn default_group_for_account_type(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Checking | AccountType::Savings | AccountType::Cash => "Cash",
        AccountType::Investment | AccountType::Brokerage => "Investments",
        AccountType::CreditCard => "Credit Cards",
        AccountType::Loan => "Loans",
        AccountType::Other => "Other",
    }
}

/// Returns true if the account type is a liability.
pub fn is_liability_type(account_type: AccountType) -> bool {
    LIABILITY_ACCOUNT_TYPES.contains(&account_type)
}
