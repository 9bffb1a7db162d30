//! The authentication gate as axum middleware.
//!
//! One middleware runs both phases in sequence for non-exempt paths:
//! phase 1 (header presence + partner-claim binding on the structurally
//! decoded token) and phase 2 (signing-key resolution + cryptographic
//! verification). A request is fully allowed or fully rejected before any
//! handler runs.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};

use partnergate_auth::{GateDecision, GateError, PartnerId, PartnerIdentityGate, TokenVerifier};
use partnergate_store::{CredentialStore, KeyResolutionError, TenantKeyResolver};

use crate::context::{CallerContext, PartnerContext};
use crate::errors::{gate_error_to_response, internal_error};

/// Header carrying the caller's claimed tenant identity.
pub const PARTNER_ID_HEADER: &str = "PartnerID";

#[derive(Clone)]
pub struct AuthState {
    pub gate: Arc<PartnerIdentityGate>,
    pub resolver: Arc<TenantKeyResolver<Arc<dyn CredentialStore>>>,
    pub verifier: Arc<TokenVerifier>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let partner_header = header_value(req.headers(), PARTNER_ID_HEADER);
    let authorization = header_value(req.headers(), header::AUTHORIZATION.as_str());

    // Phase 1: exemption, header presence, partner binding.
    let decision = match state.gate.evaluate(&path, partner_header, authorization) {
        Ok(d) => d,
        Err(e) => {
            tracing::debug!(path, error = %e, "request rejected at identity gate");
            return gate_error_to_response(&e);
        }
    };

    let (token, claims) = match decision {
        GateDecision::Exempt => return next.run(req).await,
        GateDecision::Checked { token, claims } => (token, claims),
    };

    // Phase 2: resolve the claimed user's signing secret, then prove the
    // token against it. The claim set used here is still unverified; the
    // signature check below is what authenticates it.
    let secret = match state.resolver.resolve(claims.user_id()).await {
        Ok(s) => s,
        Err(KeyResolutionError::NoActiveSecret) => {
            tracing::debug!(path, "no active signing secret for claimed user");
            return gate_error_to_response(&GateError::SigningKeyInvalid);
        }
        Err(KeyResolutionError::Store(e)) => {
            tracing::error!(path, error = %e, "signing-key lookup failed");
            return internal_error();
        }
    };

    let verified = match state.verifier.verify(&token, &secret) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(path, error = %e, "token verification failed");
            return gate_error_to_response(&e);
        }
    };

    req.extensions_mut()
        .insert(PartnerContext::new(PartnerId::new(verified.partner_id())));
    req.extensions_mut()
        .insert(CallerContext::new(verified.user_id()));

    next.run(req).await
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
