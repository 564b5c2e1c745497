//! Password storage for accounts.
//!
//! Stored values are PHC strings from Argon2. A value starting with
//! [`UNUSABLE_PASSWORD_PREFIX`] marks an account that cannot log in with a
//! password at all; it never verifies and is never parsed.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::error;

pub const UNUSABLE_PASSWORD_PREFIX: char = '!';
const UNUSABLE_SUFFIX_LEN: usize = 40;

/// A fresh marker that no password matches.
pub fn unusable_password() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UNUSABLE_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{UNUSABLE_PASSWORD_PREFIX}{suffix}")
}

pub fn is_password_usable(stored: &str) -> bool {
    !stored.is_empty() && !stored.starts_with(UNUSABLE_PASSWORD_PREFIX)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?;
    Ok(hash.to_string())
}

/// `Ok(false)` for a wrong password or an unusable marker; `Err` when a
/// stored hash is corrupt.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    if !is_password_usable(stored) {
        return Ok(false);
    }
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is corrupt");
        anyhow::anyhow!("corrupt password hash: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
