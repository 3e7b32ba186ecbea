//! Password hashing for the user directory
//!
//! Stored passwords are self-describing strings of the form
//! `pbkdf2-sha256$<iterations>$<salt base64>$<hash hex>`, so the work
//! factor can be raised later without invalidating existing accounts.

use base64::{engine::general_purpose, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

// Constants
const SALT_SIZE: usize = 32;
const HASH_SIZE: usize = 32;
const PBKDF2_ITERATIONS: u32 = 600_000; // OWASP recommendation for 2024
const ALGORITHM: &str = "pbkdf2-sha256";

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> String {
    // Generate random salt
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);

    // Derive hash from password using PBKDF2
    let mut hash = [0u8; HASH_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut hash);

    format!(
        "{}${}${}${}",
        ALGORITHM,
        PBKDF2_ITERATIONS,
        general_purpose::STANDARD.encode(salt),
        hex::encode(hash)
    )
}

/// Check a password against a stored hash string
///
/// A malformed stored value never authenticates.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    if parts.len() != 4 || parts[0] != ALGORITHM {
        return false;
    }
    let iterations = match parts[1].parse::<u32>() {
        Ok(n) => n,
        Err(_) => return false,
    };
    let salt = match general_purpose::STANDARD.decode(parts[2]) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let expected = match hex::decode(parts[3]) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    // Derive with the parameters recorded in the stored string
    let mut hash = [0u8; HASH_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut hash);
    constant_time_eq(&hash, &expected)
}

/// Compare digests without short-circuiting on the first differing byte
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
