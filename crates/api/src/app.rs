//! Router construction and the credential-issuance endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use partnergate_auth::{
    LoginId, PartnerIdentityGate, PasswordHasher, PathExemptionMatcher, TokenVerifier,
};
use partnergate_store::{CredentialIssuer, CredentialStore, TenantKeyResolver};

use crate::context::{CallerContext, PartnerContext};
use crate::errors::{issue_error_to_response, json_error};
use crate::middleware::{self, AuthState};

/// Gateway configuration.
///
/// The exemption list is config data: adding a public route means adding a
/// prefix here, not a code change. Routes not enumerated are locked behind
/// the gate.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Issuer value every verified token must carry.
    pub expected_issuer: String,
    /// Case-insensitive path prefixes exempt from authentication.
    pub exempt_prefixes: Vec<String>,
    /// Extra re-hash rounds for the password hasher.
    pub hash_iterations: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            expected_issuer: "partner-gateway".to_string(),
            exempt_prefixes: vec![
                "/health".to_string(),
                "/api/auth".to_string(),
                "/api/registration/".to_string(),
            ],
            hash_iterations: partnergate_auth::password::DEFAULT_ITERATIONS,
        }
    }
}

struct AppServices {
    issuer: CredentialIssuer<Arc<dyn CredentialStore>>,
}

/// Build the full HTTP router.
///
/// The store handle is injected by the caller; nothing in the gate
/// constructs its own service context. The gate middleware wraps the whole
/// router and the exemption list decides which paths skip it.
pub fn build_app(config: GatewayConfig, store: Arc<dyn CredentialStore>) -> Router {
    let auth_state = AuthState {
        gate: Arc::new(PartnerIdentityGate::new(PathExemptionMatcher::new(
            config.exempt_prefixes.clone(),
        ))),
        resolver: Arc::new(TenantKeyResolver::new(store.clone())),
        verifier: Arc::new(TokenVerifier::new(config.expected_issuer.clone())),
    };

    let services = Arc::new(AppServices {
        issuer: CredentialIssuer::new(store, PasswordHasher::new(config.hash_iterations)),
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/whoami", get(whoami))
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn whoami(
    Extension(partner): Extension<PartnerContext>,
    Extension(caller): Extension<CallerContext>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "partner_id": partner.partner_id().as_str(),
        "user_id": caller.user_id(),
    }))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    login_id: String,
    password: String,
    #[serde(default)]
    app_reg_id: String,
}

async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    if body.login_id.trim().is_empty() || body.password.is_empty() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "missing_credentials",
            "login_id and password are required",
        );
    }

    let login_id = LoginId::new(body.login_id.trim());
    match services
        .issuer
        .authenticate(&login_id, &body.password, &body.app_reg_id)
        .await
    {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => issue_error_to_response(e),
    }
}
