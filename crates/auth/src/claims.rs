//! Bearer-token claims model and structural (phase-1) decoding.
//!
//! The gate runs a two-stage pipeline: stage 1 decodes the token *without*
//! verifying its signature so the partner binding can be checked and the
//! signing key resolved; stage 2 performs the actual cryptographic proof.
//! The stages exchange a well-defined intermediate value, [`UnverifiedClaims`],
//! whose type makes the lack of authentication explicit so later code cannot
//! mistake stage-1 data for a verified identity.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::GateError;

/// Claims carried in a partner bearer token.
///
/// Claim names are the wire contract of the external issuance process and
/// must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Tenant the token was issued for.
    #[serde(rename = "PartnerID", default)]
    pub partner_id: String,

    /// User the token was issued to; selects the signing secret.
    #[serde(rename = "userID", default)]
    pub user_id: String,

    /// Token issuer.
    #[serde(default)]
    pub iss: String,

    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: u64,
}

/// Claims read from a token whose signature has **not** been checked.
///
/// Everything in here is caller-supplied input. It is only good for the
/// phase-1 partner binding check and for naming the key to verify against;
/// it proves nothing about who sent the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnverifiedClaims(TokenClaims);

impl UnverifiedClaims {
    pub fn partner_id(&self) -> &str {
        &self.0.partner_id
    }

    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }
}

/// Claims from a token that passed full signature/issuer/lifetime
/// verification. Only [`crate::TokenVerifier`] constructs this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims(pub(crate) TokenClaims);

impl VerifiedClaims {
    pub fn partner_id(&self) -> &str {
        &self.0.partner_id
    }

    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }

    pub fn into_claims(self) -> TokenClaims {
        self.0
    }
}

/// Structurally decode a bearer token without verifying its signature.
///
/// Malformed tokens (wrong segment count, bad base64, non-JSON claims) fail
/// with [`GateError::InvalidToken`]. Missing individual claims do not fail
/// here; the binding and verification stages decide what is required. The
/// header's algorithm is not checked either: with signature validation
/// disabled, jsonwebtoken skips its algorithm checks, so a token whose
/// header names a foreign algorithm still decodes and is left for phase 2
/// to reject.
pub fn decode_unverified(token: &str) -> Result<UnverifiedClaims, GateError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data =
        jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|_| GateError::InvalidToken)?;

    Ok(UnverifiedClaims(data.claims))
}
