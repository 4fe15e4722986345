//! Account provisioning
//!
//! Creates an account row and its credential row in one unit, so a
//! half-provisioned account (balance but no login, or the reverse) can
//! never exist.

use crate::crypto;
use crate::error::OnboardError;
use crate::services::ServiceContext;
use netbank_core::money::MAX_SCALE;
use netbank_core::Account;
use netbank_persistence::{AccountRepo, CredentialRepo, CredentialRow, ImmediateTx};
use rust_decimal::Decimal;

/// Everything needed to open an account.
#[derive(Debug, Clone)]
pub struct OpenAccountRequest {
    pub holder_name: String,
    pub branch: String,
    pub ifsc_code: String,
    pub upi_id: Option<String>,
    pub opening_balance: Decimal,
    pub user_id: String,
    pub email: Option<String>,
    pub password: String,
    /// Generated when absent.
    pub account_number: Option<String>,
}

/// Onboarding Service - open accounts with their credentials
pub struct OnboardingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OnboardingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create the account and its credential together.
    ///
    /// A duplicate account number, UPI alias, user id or email reports
    /// `AlreadyExists` with nothing written.
    pub async fn open_account(&self, req: OpenAccountRequest) -> Result<Account, OnboardError> {
        if req.opening_balance < Decimal::ZERO {
            return Err(OnboardError::InvalidBalance(format!(
                "opening balance must not be negative: {}",
                req.opening_balance
            )));
        }
        if req.opening_balance.normalize().scale() > MAX_SCALE {
            return Err(OnboardError::InvalidBalance(format!(
                "opening balance has more than {} decimal places: {}",
                MAX_SCALE, req.opening_balance
            )));
        }

        let account = Account {
            account_number: req
                .account_number
                .unwrap_or_else(crypto::new_account_number),
            account_holder_name: req.holder_name,
            bank_branch: req.branch,
            ifsc_code: req.ifsc_code,
            upi_id: req.upi_id,
            account_balance: req.opening_balance,
        };

        let salt = crypto::new_salt();
        let credential = CredentialRow {
            user_id: req.user_id,
            email: req.email,
            account_number: account.account_number.clone(),
            password_hash: crypto::hash_password(&req.password, &salt),
            salt,
        };

        let mut tx = ImmediateTx::begin(self.ctx.pool()).await?;

        if let Err(e) = AccountRepo::insert(tx.conn(), &account).await {
            if e.is_unique_violation() {
                let _ = tx.rollback().await;
                return Err(OnboardError::AlreadyExists(account.account_number));
            }
            return Err(e.into());
        }

        if let Err(e) = CredentialRepo::insert(tx.conn(), &credential).await {
            if e.is_unique_violation() {
                let _ = tx.rollback().await;
                return Err(OnboardError::AlreadyExists(credential.user_id));
            }
            return Err(e.into());
        }

        tx.commit().await?;

        tracing::info!(
            account = %account.account_number,
            holder = %account.account_holder_name,
            "account opened"
        );

        Ok(account)
    }
}
