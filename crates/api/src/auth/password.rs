//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Build the hash that unknown-email logins are compared against.
///
/// The plaintext is random and discarded, so no submitted password can match.
pub fn generate_dummy_hash() -> Result<String, argon2::password_hash::Error> {
    hash_password(&uuid::Uuid::new_v4().to_string())
}

/// Spend the same work as a real login when no account matched.
///
/// Login for an unknown email must cost about as much as a wrong password
/// for a real account, so response timing does not reveal which emails are
/// registered. The result is always discarded.
pub fn verify_against_dummy_hash(password: &str, dummy_hash: &str) {
    if let Err(e) = verify_password(password, dummy_hash) {
        tracing::warn!(error = %e, "Dummy hash comparison failed");
    }
}
