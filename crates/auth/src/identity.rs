use serde::{Deserialize, Serialize};

/// Tenant identifier supplied by the caller via the `PartnerID` header and
/// carried as a claim inside bearer tokens.
///
/// Partner identifiers are opaque strings owned by partner onboarding;
/// equality between the header value and the token claim is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerId(String);

impl PartnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive identity comparison (the header/claim binding rule).
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl core::fmt::Display for PartnerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartnerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PartnerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Login identifier of a user account (the credential-store lookup key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginId(String);

impl LoginId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for LoginId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LoginId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LoginId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
