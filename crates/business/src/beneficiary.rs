//! Beneficiary resolution
//!
//! Maps a transfer-target identifier to a canonical account before a
//! transfer is attempted. Read-only; the engine re-checks everything that
//! matters under its own lock.

use crate::error::ResolveError;
use crate::services::ServiceContext;
use netbank_core::{Beneficiary, TransferMode};
use netbank_persistence::AccountRepo;

/// Beneficiary Service - resolve a transfer target
pub struct BeneficiaryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BeneficiaryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve `identifier` for `requester`.
    ///
    /// IMPS routes by account number, so an identifier equal to the
    /// requester's own number is rejected before any lookup. UPI routes
    /// through the alias, so the self check can only happen after the
    /// alias resolves.
    pub async fn resolve(
        &self,
        requester: &str,
        mode: TransferMode,
        identifier: &str,
    ) -> Result<Beneficiary, ResolveError> {
        let row = match mode {
            TransferMode::Imps => {
                if identifier == requester {
                    return Err(ResolveError::SelfTransfer);
                }
                AccountRepo::get_by_number(self.ctx.pool(), identifier).await?
            }
            TransferMode::Upi => AccountRepo::get_by_upi(self.ctx.pool(), identifier).await?,
        };

        let Some(row) = row else {
            return Err(ResolveError::NotFound);
        };

        if row.account_number == requester {
            return Err(ResolveError::SelfTransfer);
        }

        Ok(Beneficiary {
            account_number: row.account_number,
            holder_name: row.account_holder_name,
            branch: row.bank_branch,
        })
    }
}
