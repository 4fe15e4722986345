//! Transfer commands: resolve, transfer, history

use crate::db;
use crate::ModeArg;
use anyhow::{bail, Result};
use netbank_business::{
    BeneficiaryService, HistoryService, ResolveError, ServiceContext, TransferError,
    TransferService,
};
use netbank_core::TransferMode;
use rust_decimal::Decimal;
use std::path::Path;

/// Resolve and print a beneficiary
pub async fn resolve(
    db_path: &Path,
    account_number: &str,
    identifier: &str,
    mode: ModeArg,
) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let result = BeneficiaryService::new(&ctx)
        .resolve(account_number, mode.to_core_type(), identifier)
        .await;
    match result {
        Ok(beneficiary) => {
            println!("✅ Beneficiary found");
            println!("   Account: {}", beneficiary.account_number);
            println!("   Name:    {}", beneficiary.holder_name);
            println!("   Branch:  {}", beneficiary.branch);
        }
        Err(ResolveError::NotFound) => bail!("Invalid details: no such beneficiary"),
        Err(ResolveError::SelfTransfer) => bail!("Cannot transfer to self"),
        Err(ResolveError::Unavailable(e)) => bail!("Service unavailable, try again: {}", e),
    }

    pool.close().await;
    Ok(())
}

/// Resolve the target and execute the transfer, mirroring the request
/// flow: IMPS sends straight to the account number, UPI resolves the
/// alias first.
pub async fn run(
    db_path: &Path,
    sender: &str,
    identifier: &str,
    amount: Decimal,
    mode: ModeArg,
    note: Option<&str>,
) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::from_pool(pool.clone());
    let mode = mode.to_core_type();

    let receiver = match mode {
        TransferMode::Imps => identifier.to_string(),
        TransferMode::Upi => {
            let result = BeneficiaryService::new(&ctx)
                .resolve(sender, mode, identifier)
                .await;
            match result {
                Ok(beneficiary) => beneficiary.account_number,
                Err(ResolveError::NotFound) => bail!("Invalid beneficiary: {}", identifier),
                Err(ResolveError::SelfTransfer) => bail!("Cannot transfer to self"),
                Err(ResolveError::Unavailable(e)) => {
                    bail!("Service unavailable, try again: {}", e)
                }
            }
        }
    };

    let result = TransferService::new(&ctx)
        .transfer(sender, &receiver, amount, mode, note)
        .await;
    let receipt = match result {
        Ok(receipt) => receipt,
        Err(TransferError::InvalidAmount(msg)) => bail!("Invalid amount: {}", msg),
        Err(TransferError::SelfTransfer) => bail!("Cannot transfer to self"),
        Err(TransferError::AccountNotFound(n)) => bail!("Account not found: {}", n),
        Err(TransferError::InsufficientFunds {
            required,
            available,
        }) => bail!(
            "Insufficient funds: required {}, available {}",
            required,
            available
        ),
        Err(TransferError::Unavailable(e)) => bail!("Service unavailable, try again: {}", e),
    };

    println!("✅ Transfer successful!");
    println!("   Transaction: {}", receipt.transaction_id);
    println!("   To:          {} ({})", receipt.receiver_name, receipt.receiver_account_number);
    println!("   Amount:      {}", receipt.amount);
    println!("   Mode:        {}", receipt.mode);

    pool.close().await;
    Ok(())
}

/// Print an account's statement, newest first
pub async fn history(db_path: &Path, account_number: &str, json: bool) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let lines = match HistoryService::new(&ctx).history(account_number).await {
        Ok(lines) => lines,
        Err(netbank_business::HistoryError::Unavailable(e)) => {
            bail!("Service unavailable, try again: {}", e)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else if lines.is_empty() {
        println!("No transactions for {}", account_number);
    } else {
        for line in &lines {
            let entry = &line.entry;
            println!(
                "{}  {:6}  {:>12}  {} -> {}  [{}]  {}",
                entry.transaction_date.format("%d-%b-%Y %I:%M:%S %p"),
                line.direction.as_str(),
                entry.amount,
                entry.sender_name,
                entry.receiver_name,
                entry.mode,
                entry.note.as_deref().unwrap_or("-"),
            );
        }
    }

    pool.close().await;
    Ok(())
}
