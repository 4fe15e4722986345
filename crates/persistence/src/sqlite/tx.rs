//! Immediate write transactions
//!
//! The transfer engine must hold the database write lock for the whole
//! read-check-write-append sequence; a plain deferred transaction would let
//! another writer slip in between the balance read and the balance write.
//! `BEGIN IMMEDIATE` claims the write lock up front, so every statement in
//! the unit runs against a stable snapshot that nobody else can mutate.
//!
//! Lock acquisition waits up to the connection's busy timeout; exceeding it
//! fails the begin and the caller reports a retryable outcome.

use crate::error::PersistenceResult;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

/// An open `BEGIN IMMEDIATE` transaction on a pooled connection.
///
/// Must be finished with [`commit`](ImmediateTx::commit) or
/// [`rollback`](ImmediateTx::rollback). Dropping an unfinished transaction
/// rolls it back before the connection returns to the pool.
pub struct ImmediateTx {
    conn: Option<PoolConnection<Sqlite>>,
}

impl ImmediateTx {
    /// Acquire a connection and claim the write lock.
    pub async fn begin(pool: &SqlitePool) -> PersistenceResult<Self> {
        let mut conn = pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
        Ok(Self { conn: Some(conn) })
    }

    /// The underlying connection, for running statements inside the unit.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        // Invariant: conn is Some until commit/rollback consumes self.
        self.conn.as_mut().expect("transaction already finished")
    }

    /// Commit the unit. On a failed commit the transaction is rolled back
    /// before the error propagates.
    pub async fn commit(mut self) -> PersistenceResult<()> {
        if let Some(mut conn) = self.conn.take() {
            if let Err(e) = sqlx::query("COMMIT").execute(&mut *conn).await {
                let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Abandon the unit, leaving all state untouched.
    pub async fn rollback(mut self) -> PersistenceResult<()> {
        if let Some(mut conn) = self.conn.take() {
            sqlx::query("ROLLBACK").execute(&mut *conn).await?;
        }
        Ok(())
    }
}

impl Drop for ImmediateTx {
    fn drop(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            // Error paths that propagate with `?` land here; the rollback
            // must complete before the connection is reused.
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
                });
            }
        }
    }
}
