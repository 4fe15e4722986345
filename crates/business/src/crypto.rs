//! Credential hashing and identifier generation
//!
//! The credential contract: `password_hash = SHA-256(plaintext || salt)`,
//! lowercase hex, with a fresh random salt on every password change.
//! Verification compares the full recomputed hash in constant time -
//! no early exit on the first mismatched byte.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Salt length in raw bytes (hex-encoded for storage).
pub const SALT_BYTES: usize = 8;

/// Transaction id length in raw bytes (16 hex chars once encoded).
pub const TXN_ID_BYTES: usize = 8;

/// Generate a fresh random salt, hex-encoded.
pub fn new_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a plaintext password with a salt.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a plaintext password against a stored hash and salt.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    let computed = hash_password(password, salt);
    computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

/// Generate a transfer transaction id: 16 uppercase hex chars from the
/// OS RNG. High enough entropy that collisions are negligible; the engine
/// still retries on a duplicate-key insert rather than ever overwriting.
pub fn new_transaction_id() -> String {
    let mut bytes = [0u8; TXN_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode_upper(bytes)
}

/// Generate a 10-digit account number for provisioning.
pub fn new_account_number() -> String {
    OsRng.gen_range(1_000_000_000u64..10_000_000_000u64).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_and_salted() {
        let h1 = hash_password("hunter2", "00ff");
        let h2 = hash_password("hunter2", "00ff");
        let h3 = hash_password("hunter2", "00fe");
        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_roundtrip() {
        let salt = new_salt();
        let hash = hash_password("s3cret", &salt);
        assert!(verify_password("s3cret", &salt, &hash));
        assert!(!verify_password("s3cret!", &salt, &hash));
        assert!(!verify_password("s3cret", &new_salt(), &hash));
    }

    #[test]
    fn test_salts_are_unique() {
        assert_ne!(new_salt(), new_salt());
    }

    #[test]
    fn test_transaction_id_shape() {
        let id = new_transaction_id();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_account_number_shape() {
        let n = new_account_number();
        assert_eq!(n.len(), 10);
        assert!(n.chars().all(|c| c.is_ascii_digit()));
    }
}
