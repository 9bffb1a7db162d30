//! The credential-lookup capability consumed by the gate and the issuer.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use partnergate_auth::{AuthorizationRow, LoginId, TenantSecret, UserCredentialRecord};

/// Credential store operation error.
///
/// The store is an external collaborator; the only failure mode the core
/// distinguishes is "unavailable". Callers map this to a generic internal
/// error for the client and log the detail server-side.
#[derive(Debug, Error, Clone)]
pub enum CredentialStoreError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup capability over persisted secrets, credentials, and authorization
/// rows.
///
/// Implementations must be safe for concurrent use by many simultaneous
/// requests; the gate performs one lookup per authentication attempt and per
/// token verification, with no caching, so secret rotation takes effect on
/// the next request. Timeouts and cancellation are the implementation's
/// responsibility.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored salt+digest material for a login, if the account exists.
    async fn lookup_user_digest(
        &self,
        login_id: &LoginId,
    ) -> Result<Option<UserCredentialRecord>, CredentialStoreError>;

    /// The active signing secret for a user, if one exists.
    ///
    /// Must return `None` for inactive accounts and accounts without a
    /// registered secret; there is no fallback key.
    async fn lookup_active_secret(
        &self,
        user_id: &str,
    ) -> Result<Option<TenantSecret>, CredentialStoreError>;

    /// Active employee/role/page join rows for a login.
    async fn lookup_authorization_rows(
        &self,
        login_id: &LoginId,
    ) -> Result<Vec<AuthorizationRow>, CredentialStoreError>;

    /// Persist the caller-supplied app-registration id against the account.
    /// The persisted value becomes the user's signing secret for subsequent
    /// token verification.
    async fn persist_registration_id(
        &self,
        login_id: &LoginId,
        app_reg_id: &str,
    ) -> Result<(), CredentialStoreError>;
}

#[async_trait]
impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    async fn lookup_user_digest(
        &self,
        login_id: &LoginId,
    ) -> Result<Option<UserCredentialRecord>, CredentialStoreError> {
        (**self).lookup_user_digest(login_id).await
    }

    async fn lookup_active_secret(
        &self,
        user_id: &str,
    ) -> Result<Option<TenantSecret>, CredentialStoreError> {
        (**self).lookup_active_secret(user_id).await
    }

    async fn lookup_authorization_rows(
        &self,
        login_id: &LoginId,
    ) -> Result<Vec<AuthorizationRow>, CredentialStoreError> {
        (**self).lookup_authorization_rows(login_id).await
    }

    async fn persist_registration_id(
        &self,
        login_id: &LoginId,
        app_reg_id: &str,
    ) -> Result<(), CredentialStoreError> {
        (**self).persist_registration_id(login_id, app_reg_id).await
    }
}
