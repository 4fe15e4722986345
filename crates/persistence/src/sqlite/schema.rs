//! Database schema definitions
//!
//! Row types for sqlx mapping from SQLite tables. The schema itself is
//! created by [`crate::sqlite::repos::create_schema`].
//!
//! Balances and amounts are stored as decimal TEXT; parsing into
//! `rust_decimal::Decimal` happens at the row boundary so a corrupt value
//! surfaces as an error instead of a silent zero.

use crate::error::{PersistenceError, PersistenceResult};
use chrono::{DateTime, Utc};
use netbank_core::{Account, EntryStatus, LedgerEntry, TransferMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Row type for the `accounts` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub account_number: String,
    pub account_holder_name: String,
    pub bank_branch: String,
    pub ifsc_code: String,
    pub upi_id: Option<String>,
    pub account_balance: String,
}

/// Row type for the `credentials` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CredentialRow {
    pub user_id: String,
    pub email: Option<String>,
    pub account_number: String,
    pub password_hash: String,
    pub salt: String,
}

/// Row type for the `ledger_entries` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct LedgerEntryRow {
    pub transaction_id: String,
    pub transaction_date: DateTime<Utc>,
    pub sender_account_number: String,
    pub receiver_account_number: String,
    pub sender_name: String,
    pub receiver_name: String,
    pub mode: String,
    pub amount: String,
    pub note: Option<String>,
    pub status: String,
}

/// Parse a stored decimal TEXT column.
pub(crate) fn parse_decimal(value: &str) -> PersistenceResult<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| PersistenceError::InvalidDecimal(format!("{} ({})", value, e)))
}

// === Conversion implementations ===

impl TryFrom<AccountRow> for Account {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> PersistenceResult<Self> {
        let balance = parse_decimal(&row.account_balance)?;
        Ok(Account {
            account_number: row.account_number,
            account_holder_name: row.account_holder_name,
            bank_branch: row.bank_branch,
            ifsc_code: row.ifsc_code,
            upi_id: row.upi_id,
            account_balance: balance,
        })
    }
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.account_number.clone(),
            account_holder_name: account.account_holder_name.clone(),
            bank_branch: account.bank_branch.clone(),
            ifsc_code: account.ifsc_code.clone(),
            upi_id: account.upi_id.clone(),
            account_balance: account.account_balance.to_string(),
        }
    }
}

impl TryFrom<LedgerEntryRow> for LedgerEntry {
    type Error = PersistenceError;

    fn try_from(row: LedgerEntryRow) -> PersistenceResult<Self> {
        let mode = TransferMode::from_str(&row.mode).map_err(|_| {
            PersistenceError::InvalidEnumValue {
                field: "mode".to_string(),
                value: row.mode.clone(),
            }
        })?;
        let status = EntryStatus::from_str(&row.status).map_err(|_| {
            PersistenceError::InvalidEnumValue {
                field: "status".to_string(),
                value: row.status.clone(),
            }
        })?;
        let amount = parse_decimal(&row.amount)?;
        Ok(LedgerEntry {
            transaction_id: row.transaction_id,
            transaction_date: row.transaction_date,
            sender_account_number: row.sender_account_number,
            receiver_account_number: row.receiver_account_number,
            sender_name: row.sender_name,
            receiver_name: row.receiver_name,
            mode,
            amount,
            note: row.note,
            status,
        })
    }
}

impl From<&LedgerEntry> for LedgerEntryRow {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            transaction_id: entry.transaction_id.clone(),
            transaction_date: entry.transaction_date,
            sender_account_number: entry.sender_account_number.clone(),
            receiver_account_number: entry.receiver_account_number.clone(),
            sender_name: entry.sender_name.clone(),
            receiver_name: entry.receiver_name.clone(),
            mode: entry.mode.as_str().to_string(),
            amount: entry.amount.to_string(),
            note: entry.note.clone(),
            status: entry.status.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_row_roundtrip() {
        let row = AccountRow {
            account_number: "1000000001".to_string(),
            account_holder_name: "Asha Rao".to_string(),
            bank_branch: "MG Road".to_string(),
            ifsc_code: "NETB0000001".to_string(),
            upi_id: Some("asha@netbank".to_string()),
            account_balance: "1000.00".to_string(),
        };
        let account = Account::try_from(row).unwrap();
        assert_eq!(account.account_balance, dec!(1000.00));

        let back = AccountRow::from(&account);
        assert_eq!(back.account_balance, "1000.00");
    }

    #[test]
    fn test_corrupt_balance_is_an_error() {
        let row = AccountRow {
            account_number: "1000000001".to_string(),
            account_holder_name: "Asha Rao".to_string(),
            bank_branch: "MG Road".to_string(),
            ifsc_code: "NETB0000001".to_string(),
            upi_id: None,
            account_balance: "not-a-number".to_string(),
        };
        assert!(Account::try_from(row).is_err());
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let row = LedgerEntryRow {
            transaction_id: "A1B2C3D4E5F60718".to_string(),
            transaction_date: Utc::now(),
            sender_account_number: "1".to_string(),
            receiver_account_number: "2".to_string(),
            sender_name: "a".to_string(),
            receiver_name: "b".to_string(),
            mode: "NEFT".to_string(),
            amount: "10".to_string(),
            note: None,
            status: "SUCCESS".to_string(),
        };
        assert!(LedgerEntry::try_from(row).is_err());
    }
}
