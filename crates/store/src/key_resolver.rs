//! Per-tenant signing-key resolution for phase-2 verification.

use thiserror::Error;

use partnergate_auth::TenantSecret;

use crate::credential_store::{CredentialStore, CredentialStoreError};

#[derive(Debug, Error, Clone)]
pub enum KeyResolutionError {
    /// No active secret exists for the claimed user. Maps to an
    /// unauthorized response, never to a fallback key.
    #[error("no active signing secret for user")]
    NoActiveSecret,

    #[error(transparent)]
    Store(#[from] CredentialStoreError),
}

/// Resolves the signing secret named by a token's user-identifier claim.
///
/// The store handle is injected at construction; the resolver never builds
/// its own service context or looks one up lazily.
///
/// The user identifier it receives comes from the *unverified* claim set, so
/// a caller can trigger one store lookup per request for an arbitrary
/// identifier of their choosing. This is an accepted, bounded
/// cost-amplification trade-off: the subsequent signature check must still
/// succeed against whatever secret is resolved, so naming someone else's
/// identifier cannot produce a forged credential.
#[derive(Debug, Clone)]
pub struct TenantKeyResolver<S> {
    store: S,
}

impl<S: CredentialStore> TenantKeyResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch the active secret for `user_id`, failing terminally when none
    /// exists.
    pub async fn resolve(&self, user_id: &str) -> Result<TenantSecret, KeyResolutionError> {
        if user_id.is_empty() {
            return Err(KeyResolutionError::NoActiveSecret);
        }

        self.store
            .lookup_active_secret(user_id)
            .await?
            .ok_or(KeyResolutionError::NoActiveSecret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryCredentialStore;

    #[tokio::test]
    async fn resolves_active_secret() {
        let store = InMemoryCredentialStore::new();
        store.set_secret("U1", "S");

        let resolver = TenantKeyResolver::new(store);
        let secret = resolver.resolve("U1").await.unwrap();
        assert_eq!(secret, TenantSecret::new("S"));
    }

    #[tokio::test]
    async fn missing_secret_fails() {
        let resolver = TenantKeyResolver::new(InMemoryCredentialStore::new());
        assert!(matches!(
            resolver.resolve("U1").await,
            Err(KeyResolutionError::NoActiveSecret)
        ));
    }

    #[tokio::test]
    async fn inactive_account_fails() {
        let store = InMemoryCredentialStore::new();
        store.set_secret("U1", "S");
        store.deactivate("U1");

        let resolver = TenantKeyResolver::new(store);
        assert!(matches!(
            resolver.resolve("U1").await,
            Err(KeyResolutionError::NoActiveSecret)
        ));
    }

    #[tokio::test]
    async fn empty_user_claim_fails_without_a_lookup() {
        let resolver = TenantKeyResolver::new(InMemoryCredentialStore::new());
        assert!(matches!(
            resolver.resolve("").await,
            Err(KeyResolutionError::NoActiveSecret)
        ));
    }
}
