//! # Netbank Core
//!
//! Domain types for the Netbank funds-transfer ledger.
//!
//! Everything here is pure data and validation - no IO, no database.
//! Amounts are `rust_decimal::Decimal` throughout (2 fractional digits,
//! serialized as strings in JSON).

pub mod account;
pub mod error;
pub mod ledger;
pub mod money;

pub use account::{Account, Beneficiary};
pub use error::{CoreError, CoreResult};
pub use ledger::{Direction, EntryStatus, LedgerEntry, TransferMode};
pub use money::validate_amount;
