use partnergate_auth::PartnerId;

/// Partner (tenant) context for a request.
///
/// Only inserted after phase-2 verification succeeds, so handlers can rely
/// on it as authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerContext {
    partner_id: PartnerId,
}

impl PartnerContext {
    pub fn new(partner_id: PartnerId) -> Self {
        Self { partner_id }
    }

    pub fn partner_id(&self) -> &PartnerId {
        &self.partner_id
    }
}

/// Authenticated caller context (the verified user-identifier claim).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    user_id: String,
}

impl CallerContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
