//! # Netbank Business
//!
//! Business layer - the five ledger operations behind the request-handling
//! boundary: authenticate, resolve beneficiary, transfer, change password,
//! and the read-only history/snapshot queries. Each operation returns a
//! typed outcome so callers can tell business rejections from
//! infrastructure failures.

pub mod auth;
pub mod beneficiary;
pub mod crypto;
pub mod error;
pub mod history;
pub mod onboarding;
pub mod services;
pub mod transfer;

pub use auth::AuthService;
pub use beneficiary::BeneficiaryService;
pub use error::{
    AccountError, AuthError, HistoryError, OnboardError, PasswordError, ResolveError,
    TransferError,
};
pub use history::{AccountProfile, HistoryService, StatementLine};
pub use onboarding::{OnboardingService, OpenAccountRequest};
pub use services::{ServiceContext, TransferReceipt};
pub use transfer::TransferService;
