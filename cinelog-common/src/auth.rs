//! Password hashing and session token generation
//!
//! Passwords are stored as SHA-256 of a per-user random salt concatenated
//! with the password, hex encoded. Session tokens are 32 random bytes, hex
//! encoded, and only ever stored server-side in the sessions table.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a random per-user password salt (16 bytes, 32 hex chars)
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// Generate a random session token (32 bytes, 64 hex chars)
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// Hash a password with the given salt
///
/// The salt is prepended so equal passwords under different salts never
/// collide in storage.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verify a password attempt against the stored hash and salt
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    hash_password(password, salt) == stored_hash
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
