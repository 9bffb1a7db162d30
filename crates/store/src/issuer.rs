//! Credential issuance: password verification and authorization assembly.

use thiserror::Error;

use partnergate_auth::{
    AuthorizationSet, LoginId, PasswordHasher, aggregate_authorizations,
};

use crate::credential_store::{CredentialStore, CredentialStoreError};

/// Profile and authorization payload returned on a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct IssuedProfile {
    pub display_name: String,
    pub area_code: String,
    #[serde(flatten)]
    pub authorizations: AuthorizationSet,
}

/// Login failure taxonomy. Each variant is terminal; nothing is retried.
#[derive(Debug, Error, Clone)]
pub enum IssueError {
    /// No credential record exists for the login.
    #[error("invalid user")]
    UnknownUser,

    /// The account exists but its configuration is unusable: salt/digest
    /// material is missing or unparseable, or no active role/page rows
    /// exist to bind a profile to.
    #[error("account is not configured for login")]
    AccountMisconfigured,

    /// The supplied password does not match the stored digest.
    #[error("invalid password")]
    CredentialMismatch,

    #[error(transparent)]
    Store(#[from] CredentialStoreError),
}

/// Verifies login attempts and assembles the caller's authorization set.
///
/// This flow is unauthenticated: it is what produces the profile a client
/// subsequently presents. All failures surface as typed results; an internal
/// failure never masquerades as a success-shaped response.
#[derive(Debug, Clone)]
pub struct CredentialIssuer<S> {
    store: S,
    hasher: PasswordHasher,
}

impl<S: CredentialStore> CredentialIssuer<S> {
    pub fn new(store: S, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Authenticate `login_id` with `password` and, on success, persist
    /// `app_reg_id` as the account's signing secret and return the profile.
    pub async fn authenticate(
        &self,
        login_id: &LoginId,
        password: &str,
        app_reg_id: &str,
    ) -> Result<IssuedProfile, IssueError> {
        let record = self
            .store
            .lookup_user_digest(login_id)
            .await?
            .ok_or(IssueError::UnknownUser)?;

        let (salt, stored_digest) = record.material().ok_or(IssueError::AccountMisconfigured)?;

        // A stored salt that fails to parse is an account-configuration
        // problem, not a caller error.
        let matches = self
            .hasher
            .verify(password, salt, stored_digest)
            .map_err(|_| IssueError::AccountMisconfigured)?;
        if !matches {
            tracing::debug!(login_id = %login_id, "password digest mismatch");
            return Err(IssueError::CredentialMismatch);
        }

        self.store
            .persist_registration_id(login_id, app_reg_id)
            .await?;

        let rows = self.store.lookup_authorization_rows(login_id).await?;
        if rows.is_empty() {
            tracing::debug!(login_id = %login_id, "no active role/page rows for account");
            return Err(IssueError::AccountMisconfigured);
        }

        let display_name = rows[0].employee_name.clone();
        let area_code = rows[0].area_code.clone();
        let authorizations = aggregate_authorizations(&rows);

        tracing::info!(
            login_id = %login_id,
            roles = authorizations.roles.len(),
            pages = authorizations.pages.len(),
            "credential issuance succeeded"
        );

        Ok(IssuedProfile {
            display_name,
            area_code,
            authorizations,
        })
    }
}
