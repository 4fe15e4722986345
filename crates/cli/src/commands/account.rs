//! Account commands: open, show

use crate::db;
use crate::AccountAction;
use anyhow::{bail, Result};
use netbank_business::{
    AccountError, HistoryService, OnboardError, OnboardingService, OpenAccountRequest,
    ServiceContext,
};
use std::path::Path;
use uuid::Uuid;

pub async fn handle(db_path: &Path, action: AccountAction) -> Result<()> {
    match action {
        AccountAction::Open {
            name,
            branch,
            ifsc,
            upi,
            balance,
            user_id,
            email,
            password,
        } => {
            open(
                db_path,
                name,
                branch,
                ifsc,
                upi,
                balance,
                user_id,
                email,
                password,
            )
            .await
        }
        AccountAction::Show {
            account_number,
            json,
        } => show(db_path, &account_number, json).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn open(
    db_path: &Path,
    name: String,
    branch: String,
    ifsc: String,
    upi: Option<String>,
    balance: rust_decimal::Decimal,
    user_id: Option<String>,
    email: Option<String>,
    password: String,
) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let user_id = user_id.unwrap_or_else(|| Uuid::new_v4().simple().to_string());

    let result = OnboardingService::new(&ctx)
        .open_account(OpenAccountRequest {
            holder_name: name,
            branch,
            ifsc_code: ifsc,
            upi_id: upi,
            opening_balance: balance,
            user_id: user_id.clone(),
            email,
            password,
            account_number: None,
        })
        .await;

    let account = match result {
        Ok(account) => account,
        Err(OnboardError::AlreadyExists(key)) => bail!("Already exists: {}", key),
        Err(OnboardError::InvalidBalance(msg)) => bail!("Invalid balance: {}", msg),
        Err(OnboardError::Unavailable(e)) => bail!("Service unavailable, try again: {}", e),
    };

    println!("✅ Account opened!");
    println!("   Number:  {}", account.account_number);
    println!("   Holder:  {}", account.account_holder_name);
    println!("   Branch:  {}", account.bank_branch);
    if let Some(upi) = &account.upi_id {
        println!("   UPI:     {}", upi);
    }
    println!("   Balance: {}", account.account_balance);
    println!("   User id: {}", user_id);

    pool.close().await;
    Ok(())
}

async fn show(db_path: &Path, account_number: &str, json: bool) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let result = HistoryService::new(&ctx).account_details(account_number).await;
    let profile = match result {
        Ok(profile) => profile,
        Err(AccountError::NotFound(n)) => bail!("Account not found: {}", n),
        Err(AccountError::Unavailable(e)) => bail!("Service unavailable, try again: {}", e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("Account {}", profile.account.account_number);
        println!("   Holder:  {}", profile.account.account_holder_name);
        println!("   Branch:  {}", profile.account.bank_branch);
        println!("   IFSC:    {}", profile.account.ifsc_code);
        if let Some(upi) = &profile.account.upi_id {
            println!("   UPI:     {}", upi);
        }
        if let Some(user_id) = &profile.user_id {
            println!("   User id: {}", user_id);
        }
        if let Some(email) = &profile.email {
            println!("   Email:   {}", email);
        }
        println!("   Balance: {}", profile.account.account_balance);
    }

    pool.close().await;
    Ok(())
}
