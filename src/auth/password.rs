//! Password Hashing
//! Mission: one-way, salted password hashing with a fixed work factor

use anyhow::{Context, Result};

/// bcrypt work factor. High enough to resist offline brute force while keeping
/// interactive logins fast.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password. The salt is randomized per call, so hashing the
/// same plaintext twice yields different hashes.
pub fn hash_password(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, BCRYPT_COST).context("Failed to hash password")
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A clean mismatch returns `Ok(false)`; library failures (e.g. a malformed
/// stored hash) are errors, kept distinct from "wrong password".
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(plaintext, hash).context("Failed to verify password")
}
