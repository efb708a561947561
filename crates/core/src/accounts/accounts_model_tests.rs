//! Tests for account domain models and net worth totals.

#[cfg(test)]
mod tests {
    use crate::accounts::{summarize_accounts, Account, AccountType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn account(id: i64, account_type: AccountType, balance: Decimal) -> Account {
        Account {
            id,
            name: format!("Account {}", id),
            account_type,
            provider: Some("Test Bank".to_string()),
            account_num: Some("123456789".to_string()),
            balance,
            is_active: true,
            plaid_item_id: None,
        }
    }

    // ==================== AccountType Serialization Tests ====================

    #[test]
    fn test_account_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AccountType::CreditCard).unwrap(),
            "\"credit_card\""
        );
        assert_eq!(
            serde_json::from_str::<AccountType>("\"savings\"").unwrap(),
            AccountType::Savings
        );
    }

    #[test]
    fn test_unknown_account_type_maps_to_other() {
        assert_eq!(
            serde_json::from_str::<AccountType>("\"crypto_wallet\"").unwrap(),
            AccountType::Other
        );
    }

    #[test]
    fn test_account_deserializes_decimal_string_balance() {
        let json = r#"{
            "id": 7,
            "name": "Checking",
            "account_type": "checking",
            "provider": "Test Bank",
            "account_num": "1234",
            "balance": "1000.10"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.balance, dec!(1000.10));
        assert!(account.is_active);
        assert!(!account.is_linked());
    }

    // ==================== Net worth Tests ====================

    #[test]
    fn test_credit_card_subtracts_regardless_of_sign() {
        let negative = account(1, AccountType::CreditCard, dec!(-500.00));
        let positive = account(2, AccountType::CreditCard, dec!(500.00));
        assert_eq!(negative.net_worth_contribution(), dec!(-500.00));
        assert_eq!(positive.net_worth_contribution(), dec!(-500.00));
    }

    #[test]
    fn test_non_liabilities_add_balance() {
        for account_type in [
            AccountType::Checking,
            AccountType::Savings,
            AccountType::Investment,
            AccountType::Cash,
        ] {
            assert_eq!(
                account(1, account_type, dec!(250.00)).net_worth_contribution(),
                dec!(250.00)
            );
        }
    }

    #[test]
    fn test_summarize_accounts() {
        let mut closed = account(5, AccountType::Savings, dec!(99999.00));
        closed.is_active = false;

        let totals = summarize_accounts(&[
            account(1, AccountType::Checking, dec!(1000.00)),
            account(2, AccountType::Savings, dec!(2000.00)),
            account(3, AccountType::CreditCard, dec!(-500.00)),
            account(4, AccountType::Investment, dec!(3000.00)),
            closed,
        ]);

        assert_eq!(totals.assets, dec!(6000.00));
        assert_eq!(totals.liabilities, dec!(500.00));
        assert_eq!(totals.net_worth, dec!(5500.00));
    }

    #[test]
    fn test_summarize_empty() {
        let totals = summarize_accounts(&[]);
        assert_eq!(totals.net_worth, Decimal::ZERO);
    }

    #[test]
    fn test_masked_number() {
        let mut acct = account(1, AccountType::Checking, Decimal::ZERO);
        assert_eq!(acct.masked_number(), "•••• 6789");
        acct.account_num = Some("42".to_string());
        assert_eq!(acct.masked_number(), "•••• 42");
        acct.account_num = None;
        assert_eq!(acct.masked_number(), "");
    }

    #[test]
    fn test_group_labels() {
        assert_eq!(account(1, AccountType::CreditCard, Decimal::ZERO).group(), "Credit Cards");
        assert_eq!(account(1, AccountType::Brokerage, Decimal::ZERO).group(), "Investments");
    }
}
