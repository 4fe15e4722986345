//! Auth commands: login, passwd

use crate::db;
use anyhow::{bail, Result};
use netbank_business::{AuthError, AuthService, PasswordError, ServiceContext};
use std::path::Path;

/// Authenticate an identity and print the bound account number
pub async fn login(db_path: &Path, identity: &str, password: &str) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let result = AuthService::new(&ctx).authenticate(identity, password).await;
    match result {
        Ok(account_number) => {
            println!("✅ Authenticated");
            println!("   Account: {}", account_number);
        }
        Err(AuthError::InvalidCredentials) => bail!("Invalid credentials"),
        Err(AuthError::Unavailable(e)) => bail!("Service unavailable, try again: {}", e),
    }

    pool.close().await;
    Ok(())
}

/// Rotate an account's password
pub async fn passwd(db_path: &Path, account_number: &str, new_password: &str) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let result = AuthService::new(&ctx)
        .change_password(account_number, new_password)
        .await;
    match result {
        Ok(()) => println!("✅ Password updated for {}", account_number),
        Err(PasswordError::NotFound(n)) => bail!("Account not found: {}", n),
        Err(PasswordError::Unavailable(e)) => bail!("Service unavailable, try again: {}", e),
    }

    pool.close().await;
    Ok(())
}
