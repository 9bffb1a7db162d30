//! Postgres-backed credential store.
//!
//! Every query is scoped to a single login identifier; there is no
//! cross-account query surface. SQLx errors are mapped uniformly to
//! [`CredentialStoreError::Unavailable`] with the operation name; the
//! detail stays in server-side tracing.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use partnergate_auth::{AuthorizationRow, LoginId, TenantSecret, UserCredentialRecord};

use crate::credential_store::{CredentialStore, CredentialStoreError};

/// [`CredentialStore`] over a SQLx Postgres pool.
///
/// The pool is thread-safe and shared; all operations are single statements
/// or a single UPDATE, so no explicit transactions are needed.
#[derive(Debug, Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(operation: &'static str, e: sqlx::Error) -> CredentialStoreError {
    tracing::error!(operation, error = %e, "credential store query failed");
    CredentialStoreError::Unavailable(format!("{operation} failed"))
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[instrument(skip(self), fields(login_id = %login_id))]
    async fn lookup_user_digest(
        &self,
        login_id: &LoginId,
    ) -> Result<Option<UserCredentialRecord>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
            SELECT pass_digest, pass_salt
            FROM user_credentials
            WHERE login_id = $1
            "#,
        )
        .bind(login_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("lookup_user_digest", e))?;

        Ok(row.map(|r| UserCredentialRecord {
            login_id: login_id.clone(),
            digest: r.get("pass_digest"),
            salt: r.get("pass_salt"),
        }))
    }

    #[instrument(skip(self))]
    async fn lookup_active_secret(
        &self,
        user_id: &str,
    ) -> Result<Option<TenantSecret>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
            SELECT app_reg_id
            FROM user_credentials
            WHERE login_id = $1 AND is_active
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("lookup_active_secret", e))?;

        Ok(row
            .and_then(|r| r.get::<Option<String>, _>("app_reg_id"))
            .filter(|s| !s.is_empty())
            .map(TenantSecret::new))
    }

    #[instrument(skip(self), fields(login_id = %login_id))]
    async fn lookup_authorization_rows(
        &self,
        login_id: &LoginId,
    ) -> Result<Vec<AuthorizationRow>, CredentialStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                e.employee_name,
                e.area_code,
                r.role_code,
                p.page_code
            FROM employees e
            JOIN employee_roles r ON e.login_id = r.login_id
            JOIN role_pages p ON r.role_code = p.role_code
            WHERE e.is_active
              AND r.is_active
              AND p.is_active
              AND e.login_id = $1
            "#,
        )
        .bind(login_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("lookup_authorization_rows", e))?;

        Ok(rows
            .into_iter()
            .map(|r| AuthorizationRow {
                role_code: r.get("role_code"),
                page_code: r.get("page_code"),
                employee_name: r.get("employee_name"),
                area_code: r.get("area_code"),
            })
            .collect())
    }

    #[instrument(skip(self, app_reg_id), fields(login_id = %login_id))]
    async fn persist_registration_id(
        &self,
        login_id: &LoginId,
        app_reg_id: &str,
    ) -> Result<(), CredentialStoreError> {
        sqlx::query(
            r#"
            UPDATE user_credentials
            SET app_reg_id = $1, updated_at = now(), updated_by = $2
            WHERE login_id = $2
            "#,
        )
        .bind(app_reg_id)
        .bind(login_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("persist_registration_id", e))?;

        Ok(())
    }
}
