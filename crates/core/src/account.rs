//! # Account Module
//!
//! An `Account` is the balance-holding entity, keyed by its immutable
//! account number. `upi_id` is an optional alias key, unique when present,
//! used by the UPI beneficiary lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bank account.
///
/// `account_balance` is a non-negative decimal; only the transfer engine
/// mutates it, and never below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, immutable account number
    pub account_number: String,
    /// Holder display name, snapshotted into ledger entries at transfer time
    pub account_holder_name: String,
    /// Branch display name
    pub bank_branch: String,
    /// Branch routing code
    pub ifsc_code: String,
    /// Optional payment-address alias (unique across accounts)
    pub upi_id: Option<String>,
    /// Current balance
    pub account_balance: Decimal,
}

impl Account {
    /// Whether the balance covers a debit of `amount`.
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.account_balance >= amount
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} ({}, {}, balance: {})",
            self.account_number, self.account_holder_name, self.bank_branch, self.account_balance
        )
    }
}

/// A resolved transfer target: the display subset of an account that a
/// sender is shown before confirming a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub account_number: String,
    pub holder_name: String,
    pub branch: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Account {
        Account {
            account_number: "1000000001".to_string(),
            account_holder_name: "Asha Rao".to_string(),
            bank_branch: "MG Road".to_string(),
            ifsc_code: "NETB0000001".to_string(),
            upi_id: Some("asha@netbank".to_string()),
            account_balance: dec!(1000.00),
        }
    }

    #[test]
    fn test_can_cover() {
        let account = sample();
        assert!(account.can_cover(dec!(1000.00)));
        assert!(account.can_cover(dec!(999.99)));
        assert!(!account.can_cover(dec!(1000.01)));
    }

    #[test]
    fn test_display() {
        let account = sample();
        let s = format!("{}", account);
        assert!(s.contains("1000000001"));
        assert!(s.contains("Asha Rao"));
    }
}
