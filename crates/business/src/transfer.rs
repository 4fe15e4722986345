//! The transfer engine
//!
//! Moves money between two accounts as a single all-or-nothing unit:
//! decrement sender, increment receiver, append the ledger entry, commit.
//! Any failure before the commit leaves every balance and the ledger
//! byte-for-byte unchanged.
//!
//! The whole unit runs inside a `BEGIN IMMEDIATE` transaction, so the
//! write lock is held from before the balance reads until the commit -
//! a concurrent transfer can never observe or overwrite a stale balance.
//! Both account rows are read in ascending account-number order,
//! independent of which side is sender or receiver.

use crate::crypto;
use crate::error::TransferError;
use crate::services::{ServiceContext, TransferReceipt};
use chrono::Utc;
use netbank_core::{validate_amount, Account, EntryStatus, LedgerEntry, TransferMode};
use netbank_persistence::{AccountRepo, ImmediateTx, LedgerEntryRow, LedgerRepo};
use rust_decimal::Decimal;

/// How many fresh transaction ids to try when the store reports a
/// duplicate. With 64 bits of entropy a second collision means something
/// is genuinely wrong with the RNG or the store.
const MAX_ID_ATTEMPTS: u32 = 3;

/// Transfer Service - the atomic transfer engine
pub struct TransferService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TransferService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Execute one transfer.
    ///
    /// Expected rejections (`InvalidAmount`, `SelfTransfer`,
    /// `AccountNotFound`, `InsufficientFunds`) abort before any mutation.
    /// `Unavailable` covers lock timeouts and store failures; on that path
    /// the transaction is rolled back and the caller may retry.
    ///
    /// There is no caller-supplied idempotency token: a retried identical
    /// call executes as an independent transfer.
    pub async fn transfer(
        &self,
        sender: &str,
        receiver: &str,
        amount: Decimal,
        mode: TransferMode,
        note: Option<&str>,
    ) -> Result<TransferReceipt, TransferError> {
        let amount =
            validate_amount(amount).map_err(|e| TransferError::InvalidAmount(e.to_string()))?;

        // The resolver already rejects this; the engine still refuses on
        // its own.
        if sender == receiver {
            return Err(TransferError::SelfTransfer);
        }

        let mut tx = ImmediateTx::begin(self.ctx.pool()).await?;

        // Read both parties under the write lock, ascending key order.
        let rows = AccountRepo::get_pair(tx.conn(), sender, receiver).await?;
        let mut sender_row = None;
        let mut receiver_row = None;
        for row in rows {
            if row.account_number == sender {
                sender_row = Some(row);
            } else if row.account_number == receiver {
                receiver_row = Some(row);
            }
        }

        let Some(sender_row) = sender_row else {
            let _ = tx.rollback().await;
            return Err(TransferError::AccountNotFound(sender.to_string()));
        };
        let Some(receiver_row) = receiver_row else {
            let _ = tx.rollback().await;
            return Err(TransferError::AccountNotFound(receiver.to_string()));
        };

        let sender_account = Account::try_from(sender_row)?;
        let receiver_account = Account::try_from(receiver_row)?;

        if !sender_account.can_cover(amount) {
            let available = sender_account.account_balance;
            let _ = tx.rollback().await;
            tracing::debug!(
                sender = %sender,
                %amount,
                %available,
                "transfer rejected: insufficient funds"
            );
            return Err(TransferError::InsufficientFunds {
                required: amount,
                available,
            });
        }

        // Both writes and the ledger append belong to the same unit.
        AccountRepo::set_balance(
            tx.conn(),
            sender,
            sender_account.account_balance - amount,
        )
        .await?;
        AccountRepo::set_balance(
            tx.conn(),
            receiver,
            receiver_account.account_balance + amount,
        )
        .await?;

        let mut entry = LedgerEntry {
            transaction_id: crypto::new_transaction_id(),
            transaction_date: Utc::now(),
            sender_account_number: sender.to_string(),
            receiver_account_number: receiver.to_string(),
            sender_name: sender_account.account_holder_name.clone(),
            receiver_name: receiver_account.account_holder_name.clone(),
            mode,
            amount,
            note: note.map(|s| s.to_string()),
            status: EntryStatus::Success,
        };

        let mut attempts = 1;
        loop {
            match LedgerRepo::insert(tx.conn(), &LedgerEntryRow::from(&entry)).await {
                Ok(()) => break,
                Err(e) if e.is_unique_violation() && attempts < MAX_ID_ATTEMPTS => {
                    // Never overwrite an existing entry; take a fresh id.
                    attempts += 1;
                    entry.transaction_id = crypto::new_transaction_id();
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit().await?;

        tracing::info!(
            transaction_id = %entry.transaction_id,
            sender = %sender,
            receiver = %receiver,
            %amount,
            mode = %mode,
            "transfer committed"
        );

        Ok(TransferReceipt {
            transaction_id: entry.transaction_id,
            transaction_date: entry.transaction_date,
            sender_account_number: entry.sender_account_number,
            receiver_account_number: entry.receiver_account_number,
            receiver_name: entry.receiver_name,
            amount,
            mode,
        })
    }
}
