//! Repository implementations for SQLite
//!
//! Query functions are generic over the executor so the same repo call runs
//! against the pool (plain reads) or inside an open write transaction
//! (`&mut SqliteConnection` from [`crate::sqlite::tx::ImmediateTx`]).

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::{AccountRow, CredentialRow, LedgerEntryRow};
use netbank_core::Account;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Executor, Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

/// How long a connection waits for the database write lock before the
/// operation aborts as retryable.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Account Repository
// ============================================================================

/// Repository for the accounts table
pub struct AccountRepo;

impl AccountRepo {
    /// Fetch an account by its number
    pub async fn get_by_number<'e, E>(
        exec: E,
        account_number: &str,
    ) -> PersistenceResult<Option<AccountRow>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM accounts WHERE account_number = ?",
        )
        .bind(account_number)
        .fetch_optional(exec)
        .await?;
        Ok(row)
    }

    /// Fetch an account by its UPI alias
    pub async fn get_by_upi<'e, E>(exec: E, upi_id: &str) -> PersistenceResult<Option<AccountRow>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE upi_id = ?")
            .bind(upi_id)
            .fetch_optional(exec)
            .await?;
        Ok(row)
    }

    /// Fetch two accounts in ascending account-number order.
    ///
    /// The transfer engine reads both parties through this so rows are
    /// always acquired in a deterministic order, independent of which side
    /// is sender or receiver.
    pub async fn get_pair<'e, E>(
        exec: E,
        first: &str,
        second: &str,
    ) -> PersistenceResult<Vec<AccountRow>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM accounts WHERE account_number IN (?, ?) ORDER BY account_number",
        )
        .bind(first)
        .bind(second)
        .fetch_all(exec)
        .await?;
        Ok(rows)
    }

    /// Insert a new account
    pub async fn insert<'e, E>(exec: E, account: &Account) -> PersistenceResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO accounts \
             (account_number, account_holder_name, bank_branch, ifsc_code, upi_id, account_balance) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&account.account_number)
        .bind(&account.account_holder_name)
        .bind(&account.bank_branch)
        .bind(&account.ifsc_code)
        .bind(&account.upi_id)
        .bind(account.account_balance.to_string())
        .execute(exec)
        .await?;
        Ok(())
    }

    /// Overwrite an account's balance.
    ///
    /// Only the transfer engine calls this, inside an immediate transaction.
    pub async fn set_balance<'e, E>(
        exec: E,
        account_number: &str,
        balance: Decimal,
    ) -> PersistenceResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE accounts SET account_balance = ? WHERE account_number = ?")
            .bind(balance.to_string())
            .bind(account_number)
            .execute(exec)
            .await?;

        if result.rows_affected() != 1 {
            return Err(PersistenceError::not_found("Account", account_number));
        }
        Ok(())
    }

    /// Count accounts
    pub async fn count<'e, E>(exec: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(exec)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Credential Repository
// ============================================================================

/// Repository for the credentials table
pub struct CredentialRepo;

impl CredentialRepo {
    /// Find a credential by identity.
    ///
    /// The identity key space is the union of user id, email and account
    /// number; the first match wins. An identity that happens to collide
    /// across two different accounts' fields resolves to whichever row the
    /// store returns first - a documented property of the lookup, not
    /// arbitrated further.
    pub async fn find_by_identity<'e, E>(
        exec: E,
        identity: &str,
    ) -> PersistenceResult<Option<CredentialRow>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT * FROM credentials WHERE user_id = ? OR email = ? OR account_number = ? \
             LIMIT 1",
        )
        .bind(identity)
        .bind(identity)
        .bind(identity)
        .fetch_optional(exec)
        .await?;
        Ok(row)
    }

    /// Insert a new credential
    pub async fn insert<'e, E>(exec: E, credential: &CredentialRow) -> PersistenceResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO credentials (user_id, email, account_number, password_hash, salt) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&credential.user_id)
        .bind(&credential.email)
        .bind(&credential.account_number)
        .bind(&credential.password_hash)
        .bind(&credential.salt)
        .execute(exec)
        .await?;
        Ok(())
    }

    /// Replace the hash and salt for one account's credential.
    ///
    /// Returns `false` when no credential row matched (the caller reports
    /// not-found, not an error).
    pub async fn update_password<'e, E>(
        exec: E,
        account_number: &str,
        password_hash: &str,
        salt: &str,
    ) -> PersistenceResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE credentials SET password_hash = ?, salt = ? WHERE account_number = ?",
        )
        .bind(password_hash)
        .bind(salt)
        .bind(account_number)
        .execute(exec)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count credentials
    pub async fn count<'e, E>(exec: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM credentials")
            .fetch_one(exec)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Ledger Repository
// ============================================================================

/// Repository for the ledger_entries table. Append-only: there is no
/// update or delete here on purpose.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Append a ledger entry
    pub async fn insert<'e, E>(exec: E, entry: &LedgerEntryRow) -> PersistenceResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO ledger_entries \
             (transaction_id, transaction_date, sender_account_number, receiver_account_number, \
              sender_name, receiver_name, mode, amount, note, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.transaction_id)
        .bind(entry.transaction_date)
        .bind(&entry.sender_account_number)
        .bind(&entry.receiver_account_number)
        .bind(&entry.sender_name)
        .bind(&entry.receiver_name)
        .bind(&entry.mode)
        .bind(&entry.amount)
        .bind(&entry.note)
        .bind(&entry.status)
        .execute(exec)
        .await?;
        Ok(())
    }

    /// Entries where the account is sender or receiver, newest first.
    ///
    /// The rowid tie-break keeps the order stable for entries committed in
    /// the same timestamp tick.
    pub async fn for_account<'e, E>(
        exec: E,
        account_number: &str,
    ) -> PersistenceResult<Vec<LedgerEntryRow>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, LedgerEntryRow>(
            "SELECT * FROM ledger_entries \
             WHERE sender_account_number = ? OR receiver_account_number = ? \
             ORDER BY transaction_date DESC, rowid DESC",
        )
        .bind(account_number)
        .bind(account_number)
        .fetch_all(exec)
        .await?;
        Ok(rows)
    }

    /// Fetch one entry by transaction id
    pub async fn get_by_id<'e, E>(
        exec: E,
        transaction_id: &str,
    ) -> PersistenceResult<LedgerEntryRow>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, LedgerEntryRow>(
            "SELECT * FROM ledger_entries WHERE transaction_id = ?",
        )
        .bind(transaction_id)
        .fetch_optional(exec)
        .await?
        .ok_or_else(|| PersistenceError::not_found("LedgerEntry", transaction_id))
    }

    /// Count entries
    pub async fn count<'e, E>(exec: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ledger_entries")
            .fetch_one(exec)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Database initialization
// ============================================================================

/// Open a connection pool.
///
/// WAL journaling keeps history reads from blocking behind a transfer;
/// the busy timeout bounds how long a write transaction waits for the lock.
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create a new database (file created if missing) with the schema applied.
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    Ok(pool)
}

/// Apply the schema. Idempotent.
pub async fn create_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS accounts (
            account_number TEXT PRIMARY KEY,
            account_holder_name TEXT NOT NULL,
            bank_branch TEXT NOT NULL,
            ifsc_code TEXT NOT NULL,
            upi_id TEXT UNIQUE,
            account_balance TEXT NOT NULL DEFAULT '0'
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS credentials (
            user_id TEXT PRIMARY KEY,
            email TEXT UNIQUE,
            account_number TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            salt TEXT NOT NULL,
            FOREIGN KEY (account_number) REFERENCES accounts(account_number)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS ledger_entries (
            transaction_id TEXT PRIMARY KEY,
            transaction_date DATETIME NOT NULL,
            sender_account_number TEXT NOT NULL,
            receiver_account_number TEXT NOT NULL,
            sender_name TEXT NOT NULL,
            receiver_name TEXT NOT NULL,
            mode TEXT NOT NULL,
            amount TEXT NOT NULL,
            note TEXT,
            status TEXT NOT NULL,
            FOREIGN KEY (sender_account_number) REFERENCES accounts(account_number),
            FOREIGN KEY (receiver_account_number) REFERENCES accounts(account_number)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_ledger_sender \
         ON ledger_entries(sender_account_number)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_ledger_receiver \
         ON ledger_entries(receiver_account_number)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
