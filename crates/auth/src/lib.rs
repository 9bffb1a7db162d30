//! `partnergate-auth`: pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. It holds the
//! two-phase token pipeline primitives (structural decode, then cryptographic
//! verification), the path exemption policy, the password hasher used by the
//! credential-issuance flow, and the authorization aggregation logic.

pub mod aggregate;
pub mod claims;
pub mod error;
pub mod exempt;
pub mod gate;
pub mod identity;
pub mod password;
pub mod records;
pub mod verify;

pub use aggregate::aggregate_authorizations;
pub use claims::{TokenClaims, UnverifiedClaims, VerifiedClaims, decode_unverified};
pub use error::GateError;
pub use exempt::PathExemptionMatcher;
pub use gate::{GateDecision, PartnerIdentityGate};
pub use identity::{LoginId, PartnerId};
pub use password::{PasswordHashError, PasswordHasher};
pub use records::{AuthorizationRow, AuthorizationSet, TenantSecret, UserCredentialRecord};
pub use verify::TokenVerifier;
