//! Shared helpers for business integration tests

#![allow(dead_code)]

use netbank_business::{HistoryService, OnboardingService, OpenAccountRequest, ServiceContext};
use netbank_core::Account;
use netbank_persistence::Database;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Fresh temp database plus a service context over it.
pub async fn setup() -> (TempDir, ServiceContext) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}?mode=rwc", dir.path().join("bank.db").display());
    let db = Database::init(&url).await.unwrap();
    (dir, ServiceContext::new(&db))
}

/// Open an account with a deterministic number and credential.
pub async fn open_account(
    ctx: &ServiceContext,
    number: &str,
    name: &str,
    upi: Option<&str>,
    balance: Decimal,
) -> Account {
    OnboardingService::new(ctx)
        .open_account(OpenAccountRequest {
            holder_name: name.to_string(),
            branch: "MG Road".to_string(),
            ifsc_code: "NETB0000001".to_string(),
            upi_id: upi.map(str::to_string),
            opening_balance: balance,
            user_id: format!("user_{}", number),
            email: Some(format!("{}@example.com", number)),
            password: "opening-secret".to_string(),
            account_number: Some(number.to_string()),
        })
        .await
        .unwrap()
}

/// Current balance of an account.
pub async fn balance_of(ctx: &ServiceContext, number: &str) -> Decimal {
    HistoryService::new(ctx)
        .account_details(number)
        .await
        .unwrap()
        .account
        .account_balance
}
