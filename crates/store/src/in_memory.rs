//! In-memory credential store.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use partnergate_auth::{AuthorizationRow, LoginId, TenantSecret, UserCredentialRecord};

use crate::credential_store::{CredentialStore, CredentialStoreError};

#[derive(Debug, Clone, Default)]
struct AccountRecord {
    digest: Option<String>,
    salt: Option<String>,
    app_reg_id: Option<String>,
    active: bool,
    authorization_rows: Vec<AuthorizationRow>,
}

/// In-memory [`CredentialStore`] backed by a `RwLock<HashMap>`.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an active account with stored credential material.
    pub fn insert_account(&self, login_id: &str, salt_base64: &str, digest_base64: &str) {
        let mut accounts = self.accounts.write().unwrap();
        let record = accounts.entry(login_id.to_string()).or_default();
        record.salt = Some(salt_base64.to_string());
        record.digest = Some(digest_base64.to_string());
        record.active = true;
    }

    /// Seed an account that exists but has no salt/digest configured.
    pub fn insert_unconfigured_account(&self, login_id: &str) {
        let mut accounts = self.accounts.write().unwrap();
        let record = accounts.entry(login_id.to_string()).or_default();
        record.active = true;
    }

    /// Set the account's signing secret directly (as issuance would).
    pub fn set_secret(&self, login_id: &str, secret: &str) {
        let mut accounts = self.accounts.write().unwrap();
        let record = accounts.entry(login_id.to_string()).or_default();
        record.app_reg_id = Some(secret.to_string());
        record.active = true;
    }

    /// Mark an account inactive; its secret must stop resolving.
    pub fn deactivate(&self, login_id: &str) {
        let mut accounts = self.accounts.write().unwrap();
        if let Some(record) = accounts.get_mut(login_id) {
            record.active = false;
        }
    }

    /// Seed authorization join rows for an account.
    pub fn add_authorization_row(&self, login_id: &str, row: AuthorizationRow) {
        let mut accounts = self.accounts.write().unwrap();
        let record = accounts.entry(login_id.to_string()).or_default();
        record.active = true;
        record.authorization_rows.push(row);
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn lookup_user_digest(
        &self,
        login_id: &LoginId,
    ) -> Result<Option<UserCredentialRecord>, CredentialStoreError> {
        let accounts = self.accounts.read().unwrap();
        Ok(accounts.get(login_id.as_str()).map(|r| UserCredentialRecord {
            login_id: login_id.clone(),
            digest: r.digest.clone(),
            salt: r.salt.clone(),
        }))
    }

    async fn lookup_active_secret(
        &self,
        user_id: &str,
    ) -> Result<Option<TenantSecret>, CredentialStoreError> {
        let accounts = self.accounts.read().unwrap();
        Ok(accounts
            .get(user_id)
            .filter(|r| r.active)
            .and_then(|r| r.app_reg_id.as_deref())
            .filter(|s| !s.is_empty())
            .map(TenantSecret::new))
    }

    async fn lookup_authorization_rows(
        &self,
        login_id: &LoginId,
    ) -> Result<Vec<AuthorizationRow>, CredentialStoreError> {
        let accounts = self.accounts.read().unwrap();
        Ok(accounts
            .get(login_id.as_str())
            .filter(|r| r.active)
            .map(|r| r.authorization_rows.clone())
            .unwrap_or_default())
    }

    async fn persist_registration_id(
        &self,
        login_id: &LoginId,
        app_reg_id: &str,
    ) -> Result<(), CredentialStoreError> {
        let mut accounts = self.accounts.write().unwrap();
        let record = accounts
            .get_mut(login_id.as_str())
            .ok_or_else(|| CredentialStoreError::Unavailable("unknown account".to_string()))?;
        record.app_reg_id = Some(app_reg_id.to_string());
        Ok(())
    }
}
