//! Ledger queries
//!
//! Read-only retrieval of per-account transaction history and account
//! snapshots. Never mutates state; safe to run concurrently with any
//! number of transfers.

use crate::error::{AccountError, HistoryError};
use crate::services::ServiceContext;
use netbank_core::{Account, Direction, LedgerEntry};
use netbank_persistence::{AccountRepo, CredentialRepo, LedgerRepo, PersistenceError};
use serde::Serialize;

/// One history row: the entry plus its classification relative to the
/// account that asked.
#[derive(Debug, Clone, Serialize)]
pub struct StatementLine {
    pub direction: Direction,
    #[serde(flatten)]
    pub entry: LedgerEntry,
}

/// An account snapshot joined with its credential lookup keys.
#[derive(Debug, Clone, Serialize)]
pub struct AccountProfile {
    pub user_id: Option<String>,
    pub email: Option<String>,
    #[serde(flatten)]
    pub account: Account,
}

/// History Service - statement and account snapshot reads
pub struct HistoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HistoryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All entries where the account is sender or receiver, newest first,
    /// each tagged `Debit` when the account sent the money and `Credit`
    /// when it received it. No entries is an empty list.
    pub async fn history(&self, account_number: &str) -> Result<Vec<StatementLine>, HistoryError> {
        let rows = LedgerRepo::for_account(self.ctx.pool(), account_number).await?;

        let lines = rows
            .into_iter()
            .map(|row| {
                let entry = LedgerEntry::try_from(row)?;
                Ok(StatementLine {
                    direction: entry.direction_for(account_number),
                    entry,
                })
            })
            .collect::<Result<Vec<_>, PersistenceError>>()?;
        Ok(lines)
    }

    /// Snapshot of one account with its credential lookup keys.
    pub async fn account_details(
        &self,
        account_number: &str,
    ) -> Result<AccountProfile, AccountError> {
        let row = AccountRepo::get_by_number(self.ctx.pool(), account_number).await?;
        let Some(row) = row else {
            return Err(AccountError::NotFound(account_number.to_string()));
        };
        let account = Account::try_from(row)?;

        let credential = CredentialRepo::find_by_identity(self.ctx.pool(), account_number).await?;
        let (user_id, email) = credential
            .map(|c| (Some(c.user_id), c.email))
            .unwrap_or((None, None));

        Ok(AccountProfile {
            user_id,
            email,
            account,
        })
    }
}
