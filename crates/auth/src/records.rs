//! Data contracts exchanged with the credential store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::LoginId;

/// Symmetric key material associated with one user/partner.
///
/// This is the persisted app-registration identifier recorded at login time;
/// token verification builds its decoding key from these bytes. Exactly one
/// active secret exists per user at a time; an inactive or missing secret
/// fails verification rather than falling back.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantSecret(String);

impl TenantSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

// Key material stays out of logs.
impl core::fmt::Debug for TenantSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("TenantSecret(..)")
    }
}

/// Stored login credential material for one account.
///
/// `salt` and `digest` are base64-encoded. Both must be present for the
/// account to be able to authenticate; a record with either missing is
/// mis-configured, not merely unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentialRecord {
    pub login_id: LoginId,
    pub digest: Option<String>,
    pub salt: Option<String>,
}

impl UserCredentialRecord {
    /// The salt+digest pair, if the account is fully configured.
    pub fn material(&self) -> Option<(&str, &str)> {
        match (self.salt.as_deref(), self.digest.as_deref()) {
            (Some(s), Some(d)) if !s.is_empty() && !d.is_empty() => Some((s, d)),
            _ => None,
        }
    }
}

/// One row of the employee/role/page join, filtered to active rows by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRow {
    pub role_code: String,
    pub page_code: String,
    pub employee_name: String,
    pub area_code: String,
}

/// De-duplicated authorization outcome of a successful login.
///
/// Empty role or page sets are a valid (if degenerate) result; zero joined
/// rows is rejected upstream as an account-configuration failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationSet {
    pub roles: BTreeSet<String>,
    pub pages: BTreeSet<String>,
}
