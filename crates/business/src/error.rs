//! Business layer errors
//!
//! One outcome enum per operation, so a caller can always tell a business
//! rejection (insufficient funds, not found, bad credentials) from an
//! infrastructure failure (store unavailable, lock timeout, failed commit).
//! Infrastructure failures are the `Unavailable` variants: the operation
//! changed nothing and may be retried.

use netbank_persistence::PersistenceError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Outcomes of `authenticate`.
///
/// A lookup miss and a hash mismatch are deliberately the same variant;
/// the caller never learns which half failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Service unavailable: {0}")]
    Unavailable(#[from] PersistenceError),
}

/// Outcomes of `change_password`.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(#[from] PersistenceError),
}

/// Outcomes of `resolve`.
///
/// `SelfTransfer` is a user-facing distinction, kept separate from
/// `NotFound` on purpose.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Beneficiary not found")]
    NotFound,

    #[error("Cannot transfer to self")]
    SelfTransfer,

    #[error("Service unavailable: {0}")]
    Unavailable(#[from] PersistenceError),
}

/// Outcomes of `transfer`.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Cannot transfer to self")]
    SelfTransfer,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Service unavailable: {0}")]
    Unavailable(#[from] PersistenceError),
}

/// Outcomes of `account_details`.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(#[from] PersistenceError),
}

/// Outcomes of `history`. An account with no entries yields an empty list,
/// not an error.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Service unavailable: {0}")]
    Unavailable(#[from] PersistenceError),
}

/// Outcomes of `open_account`.
#[derive(Debug, Error)]
pub enum OnboardError {
    #[error("Invalid opening balance: {0}")]
    InvalidBalance(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Service unavailable: {0}")]
    Unavailable(#[from] PersistenceError),
}
