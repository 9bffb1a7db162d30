//! Phase-1 gate: header presence and partner-claim binding.
//!
//! This phase is cheap and header-only. It rejects obviously malformed or
//! cross-tenant requests before the cryptographic phase runs, but it does
//! **not** prove authenticity: the claims it extracts come from a token whose
//! signature has not yet been checked.

use crate::claims::{UnverifiedClaims, decode_unverified};
use crate::exempt::PathExemptionMatcher;
use crate::{GateError, PartnerId};

/// Outcome of the phase-1 check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The path is exempt; skip authentication entirely.
    Exempt,
    /// Headers and partner binding are in order; hand the raw token and its
    /// unverified claims to phase 2 for cryptographic verification.
    Checked {
        token: String,
        claims: UnverifiedClaims,
    },
}

/// The first-phase, middleware-style check of the authentication gate.
#[derive(Debug, Clone)]
pub struct PartnerIdentityGate {
    exemptions: PathExemptionMatcher,
}

impl PartnerIdentityGate {
    pub fn new(exemptions: PathExemptionMatcher) -> Self {
        Self { exemptions }
    }

    /// Evaluate a request's headers against the gate.
    ///
    /// Sequencing is fixed: exemption short-circuit, then header presence,
    /// then structural token decode, then partner-claim/header binding.
    pub fn evaluate(
        &self,
        path: &str,
        partner_header: Option<&str>,
        authorization_header: Option<&str>,
    ) -> Result<GateDecision, GateError> {
        if self.exemptions.is_exempt(path) {
            return Ok(GateDecision::Exempt);
        }

        let partner = partner_header.unwrap_or("").trim();
        let token = authorization_header.and_then(extract_bearer);

        let (partner, token) = match (partner.is_empty(), token) {
            (false, Some(t)) if !t.is_empty() => (PartnerId::new(partner), t),
            _ => return Err(GateError::MissingCredentials),
        };

        let claims = decode_unverified(token)?;

        if claims.partner_id().is_empty() || !partner.matches(claims.partner_id()) {
            return Err(GateError::IdentityMismatch);
        }

        Ok(GateDecision::Checked {
            token: token.to_string(),
            claims,
        })
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The `Bearer` scheme match is case-insensitive; surrounding whitespace on
/// the token is trimmed. The prefix is compared as bytes so arbitrary
/// (non-ASCII) header values cannot hit a char-boundary panic.
fn extract_bearer(header: &str) -> Option<&str> {
    const SCHEME: &[u8] = b"bearer ";
    let prefix = header.as_bytes().get(..SCHEME.len())?;
    if !prefix.eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    // The matched prefix is ASCII, so this index is a char boundary.
    Some(header[SCHEME.len()..].trim())
}
