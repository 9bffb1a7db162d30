//! Gate error taxonomy.

use thiserror::Error;

/// Terminal outcome of a rejected authentication attempt.
///
/// Every variant is final for the current request: the gate never retries
/// and never falls back to a different check or key. Messages are the
/// client-visible reason categories; anything more detailed belongs in
/// server-side tracing, not the response body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Required header material is missing (client must resend correctly).
    #[error("PartnerID header and Authorization Bearer token are required")]
    MissingCredentials,

    /// The bearer token is malformed or structurally unparseable.
    #[error("invalid bearer token")]
    InvalidToken,

    /// The token's partner claim is absent or disagrees with the header.
    #[error("invalid or mismatched partner identity in token")]
    IdentityMismatch,

    /// No active signing secret could be resolved for the claimed user.
    #[error("no active signing key for the claimed user")]
    SigningKeyInvalid,

    /// Cryptographic verification failed: bad signature, wrong issuer, or
    /// expired lifetime.
    #[error("token signature or lifetime verification failed")]
    VerificationFailed,
}

impl GateError {
    /// Whether this rejection is the client's request being malformed
    /// (HTTP 400) as opposed to an authentication failure (HTTP 401).
    pub fn is_bad_request(&self) -> bool {
        matches!(self, GateError::MissingCredentials)
    }
}
