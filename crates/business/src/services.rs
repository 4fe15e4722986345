//! Service context and shared result types
//!
//! Every service borrows a [`ServiceContext`]; the context holds the pool
//! handle opened once at service start, so no operation ever constructs
//! its own connection.

use chrono::{DateTime, Utc};
use netbank_core::TransferMode;
use netbank_persistence::Database;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

/// Context for business operations - carries database access.
#[derive(Clone)]
pub struct ServiceContext {
    pool: SqlitePool,
}

impl ServiceContext {
    /// Create a new service context from a database
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Create from a pool directly
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// What a committed transfer hands back to the caller.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub transaction_id: String,
    pub transaction_date: DateTime<Utc>,
    pub sender_account_number: String,
    pub receiver_account_number: String,
    pub receiver_name: String,
    pub amount: Decimal,
    pub mode: TransferMode,
}
