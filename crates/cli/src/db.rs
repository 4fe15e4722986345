//! Database initialization and status

use anyhow::{Context, Result};
use netbank_persistence::{AccountRepo, CredentialRepo, LedgerRepo};
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize the database with the schema
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    let pool = netbank_persistence::init_database(&db_url)
        .await
        .context("Failed to create database")?;

    pool.close().await;
    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'netbank init' to create the database");
        return Ok(());
    }

    let pool = connect(db_path).await?;

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();

    let accounts = AccountRepo::count(&pool).await.unwrap_or(0);
    let credentials = CredentialRepo::count(&pool).await.unwrap_or(0);
    let entries = LedgerRepo::count(&pool).await.unwrap_or(0);

    println!("   Accounts:       {}", accounts);
    println!("   Credentials:    {}", credentials);
    println!("   Ledger entries: {}", entries);

    pool.close().await;
    Ok(())
}

/// Connect to the database pool
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    let db_url = format!("sqlite:{}", db_path.display());
    netbank_persistence::create_pool(&db_url)
        .await
        .context("Failed to connect to database. Run 'netbank init' first.")
}
