//! Salted, iterated one-way password digest.
//!
//! The algorithm is fixed by the stored credential corpus: SHA-1 over the
//! salt bytes followed by the UTF-8 password bytes, then the digest function
//! applied to its own output `iterations` more times, base64-encoded.
//! Changing any step invalidates every stored digest.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha1::{Digest, Sha1};
use thiserror::Error;

/// Extra re-hash rounds applied beyond the initial salted hash.
///
/// This matches the digests already in the credential store. A single round
/// is weak by modern standards; deployments issuing fresh digests should set
/// the iteration count explicitly rather than relying on this default.
pub const DEFAULT_ITERATIONS: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordHashError {
    #[error("password must not be empty")]
    EmptyPassword,

    #[error("salt must not be empty")]
    EmptySalt,

    #[error("salt is not valid base64")]
    InvalidSalt,
}

/// Deterministic salted password hasher.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Compute the base64 digest of `password` under the base64 `salt`.
    pub fn hash(&self, password: &str, salt_base64: &str) -> Result<String, PasswordHashError> {
        if password.is_empty() {
            return Err(PasswordHashError::EmptyPassword);
        }
        if salt_base64.trim().is_empty() {
            return Err(PasswordHashError::EmptySalt);
        }

        let salt = BASE64
            .decode(salt_base64.trim())
            .map_err(|_| PasswordHashError::InvalidSalt)?;

        let mut hasher = Sha1::new();
        hasher.update(&salt);
        hasher.update(password.as_bytes());
        let mut digest = hasher.finalize();

        for _ in 0..self.iterations {
            digest = Sha1::digest(digest);
        }

        Ok(BASE64.encode(digest))
    }

    /// Verify a password against a stored base64 digest.
    ///
    /// The encoded digests are compared in constant time. (The system this
    /// replaces used an ordinary string comparison; the accept/reject
    /// semantics are identical.)
    pub fn verify(
        &self,
        password: &str,
        salt_base64: &str,
        stored_digest: &str,
    ) -> Result<bool, PasswordHashError> {
        let computed = self.hash(password, salt_base64)?;
        Ok(constant_time_eq(
            computed.as_bytes(),
            stored_digest.as_bytes(),
        ))
    }
}

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
