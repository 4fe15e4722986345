//! Credential verification and password change
//!
//! `AuthService` validates a presented identity+secret against the stored
//! salted hash and returns the account number for session binding.

use crate::crypto;
use crate::error::{AuthError, PasswordError};
use crate::services::ServiceContext;
use netbank_persistence::CredentialRepo;

/// Auth Service - authenticate and change_password
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate an identity+password pair.
    ///
    /// `identity` may be a user id, an email, or an account number; the
    /// first matching credential wins. On success returns the canonical
    /// account number. Lookup miss and hash mismatch both come back as
    /// [`AuthError::InvalidCredentials`] - which half failed is never
    /// revealed.
    pub async fn authenticate(&self, identity: &str, password: &str) -> Result<String, AuthError> {
        let credential = CredentialRepo::find_by_identity(self.ctx.pool(), identity).await?;

        let Some(credential) = credential else {
            return Err(AuthError::InvalidCredentials);
        };

        if crypto::verify_password(password, &credential.salt, &credential.password_hash) {
            tracing::debug!(account = %credential.account_number, "authentication succeeded");
            Ok(credential.account_number)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Rotate an account's credential: fresh salt, recomputed hash, one
    /// conditional row update. Zero rows touched reports `NotFound`.
    pub async fn change_password(
        &self,
        account_number: &str,
        new_password: &str,
    ) -> Result<(), PasswordError> {
        let salt = crypto::new_salt();
        let hash = crypto::hash_password(new_password, &salt);

        let updated =
            CredentialRepo::update_password(self.ctx.pool(), account_number, &hash, &salt).await?;

        if updated {
            tracing::info!(account = %account_number, "password changed");
            Ok(())
        } else {
            Err(PasswordError::NotFound(account_number.to_string()))
        }
    }
}
