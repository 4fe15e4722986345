//! # Netbank Persistence
//!
//! Persistence layer for Netbank - SQLite state with three tables:
//! accounts, credentials, ledger_entries.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Database                               │
//! │  ┌─────────────┐    ┌──────────────┐    ┌────────────────┐ │
//! │  │   SQLite    │    │ ImmediateTx  │    │     Repos      │ │
//! │  │  (state)    │    │ (write lock) │    │   (queries)    │ │
//! │  └─────────────┘    └──────────────┘    └────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use netbank_persistence::{AccountRepo, Database};
//!
//! // Open at service start; the pool is the store handle everything
//! // else borrows.
//! let db = Database::init("sqlite:netbank.db?mode=rwc").await?;
//!
//! let account = AccountRepo::get_by_number(db.pool(), "1000000001").await?;
//! ```

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::{
    create_pool, create_schema, init_database, AccountRepo, CredentialRepo, ImmediateTx,
    LedgerRepo, BUSY_TIMEOUT,
};
pub use sqlite::schema::{AccountRow, CredentialRow, LedgerEntryRow};

use sqlx::SqlitePool;

/// Database facade - owns the connection pool for the lifetime of the
/// service. Opened once at startup; operations acquire scoped connections
/// from the pool and release them on every exit path.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to an existing database.
    ///
    /// # Arguments
    /// * `db_url` - SQLite database URL (e.g., "sqlite:netbank.db")
    pub async fn new(db_url: &str) -> PersistenceResult<Self> {
        let pool = sqlite::create_pool(db_url).await?;
        Ok(Self { pool })
    }

    /// Create the database if missing and apply the schema.
    pub async fn init(db_url: &str) -> PersistenceResult<Self> {
        let pool = sqlite::init_database(db_url).await?;
        Ok(Self { pool })
    }

    /// Get the SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
