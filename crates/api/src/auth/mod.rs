//! Authentication primitives.
//!
//! - [`jwt`] -- claim types and HS256 signing/validation for both token classes.
//! - [`tokens`] -- the token service: issuance, verification, and revocation
//!   backed by the live token ledger.
//! - [`password`] -- Argon2id password hashing and the dummy-hash comparison.
//! - [`cookie`] -- the refresh-token cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
pub mod tokens;
