//! Phase-2 verification: signature, issuer, and lifetime.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::claims::{TokenClaims, VerifiedClaims};
use crate::{GateError, TenantSecret};

/// Cryptographic token verifier (HS256, fixed expected issuer).
///
/// This is where a token is actually authenticated; phase 1 only pre-filters.
/// Verification is all-or-nothing against the single resolved key: there is
/// no fallback key and no retry.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    expected_issuer: String,
}

impl TokenVerifier {
    pub fn new(expected_issuer: impl Into<String>) -> Self {
        Self {
            expected_issuer: expected_issuer.into(),
        }
    }

    /// Verify a token against the secret resolved for its claimed user.
    ///
    /// Checks signature validity, issuer equality, and that the expiry lies
    /// in the future. Any failure is terminal and maps to
    /// [`GateError::VerificationFailed`].
    pub fn verify(&self, token: &str, secret: &TenantSecret) -> Result<VerifiedClaims, GateError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.expected_issuer.as_str()]);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let data = jsonwebtoken::decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => GateError::InvalidToken,
            _ => {
                tracing::debug!(error = %e, "token verification failed");
                GateError::VerificationFailed
            }
        })?;

        Ok(VerifiedClaims(data.claims))
    }
}
