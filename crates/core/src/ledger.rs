//! # Ledger Module
//!
//! Immutable transfer records. A `LedgerEntry` is written exactly once by
//! the transfer engine when a transfer commits, and never touched again -
//! it is the sole source of truth for transaction history.
//!
//! An entry has no inherent debit/credit polarity; classification is always
//! relative to the account viewing it ([`LedgerEntry::direction_for`]).

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transfer channel.
///
/// `Imps` routes by account number directly; `Upi` routes through the
/// payment-address alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferMode {
    Imps,
    Upi,
}

impl TransferMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMode::Imps => "IMPS",
            TransferMode::Upi => "UPI",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s.to_uppercase().as_str() {
            "IMPS" => Ok(TransferMode::Imps),
            "UPI" => Ok(TransferMode::Upi),
            other => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome tag on a persisted entry. Only successful transfers are ever
/// persisted, so `Success` is the only value that reaches the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    Success,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Success => "SUCCESS",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s.to_uppercase().as_str() {
            "SUCCESS" => Ok(EntryStatus::Success),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Viewer-relative classification of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "DEBIT",
            Direction::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One completed transfer.
///
/// Holder names are snapshotted at transfer time so history stays
/// historically accurate even if a holder renames later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub transaction_id: String,
    pub transaction_date: DateTime<Utc>,
    pub sender_account_number: String,
    pub receiver_account_number: String,
    pub sender_name: String,
    pub receiver_name: String,
    pub mode: TransferMode,
    pub amount: Decimal,
    pub note: Option<String>,
    pub status: EntryStatus,
}

impl LedgerEntry {
    /// Classify this entry from `viewer`'s perspective: `Debit` when the
    /// viewer sent the money, `Credit` otherwise.
    pub fn direction_for(&self, viewer: &str) -> Direction {
        if self.sender_account_number == viewer {
            Direction::Debit
        } else {
            Direction::Credit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry() -> LedgerEntry {
        LedgerEntry {
            transaction_id: "A1B2C3D4E5F60718".to_string(),
            transaction_date: Utc::now(),
            sender_account_number: "1000000001".to_string(),
            receiver_account_number: "1000000002".to_string(),
            sender_name: "Asha Rao".to_string(),
            receiver_name: "Vikram Shah".to_string(),
            mode: TransferMode::Imps,
            amount: dec!(300.00),
            note: Some("rent".to_string()),
            status: EntryStatus::Success,
        }
    }

    #[test]
    fn test_mode_roundtrip() {
        assert_eq!(TransferMode::from_str("IMPS").unwrap(), TransferMode::Imps);
        assert_eq!(TransferMode::from_str("upi").unwrap(), TransferMode::Upi);
        assert_eq!(TransferMode::Upi.as_str(), "UPI");
        assert!(TransferMode::from_str("NEFT").is_err());
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(EntryStatus::from_str("SUCCESS").unwrap(), EntryStatus::Success);
        assert!(EntryStatus::from_str("PENDING").is_err());
    }

    #[test]
    fn test_direction_is_viewer_relative() {
        let e = entry();
        assert_eq!(e.direction_for("1000000001"), Direction::Debit);
        assert_eq!(e.direction_for("1000000002"), Direction::Credit);
        // A third party never sent it, so it reads as credit-shaped;
        // the query layer only ever asks for sender or receiver.
        assert_eq!(e.direction_for("9999999999"), Direction::Credit);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Debit.to_string(), "DEBIT");
        assert_eq!(Direction::Credit.to_string(), "CREDIT");
    }
}
