use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use partnergate_auth::GateError;
use partnergate_store::IssueError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Generic 500 for store and internal failures. Diagnostic detail belongs in
/// tracing, never in the response body.
pub fn internal_error() -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "internal server error",
    )
}

pub fn gate_error_to_response(err: &GateError) -> axum::response::Response {
    let status = if err.is_bad_request() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::UNAUTHORIZED
    };
    let code = match err {
        GateError::MissingCredentials => "missing_credentials",
        GateError::InvalidToken => "invalid_token",
        GateError::IdentityMismatch => "identity_mismatch",
        GateError::SigningKeyInvalid => "signing_key_invalid",
        GateError::VerificationFailed => "verification_failed",
    };
    json_error(status, code, err.to_string())
}

pub fn issue_error_to_response(err: IssueError) -> axum::response::Response {
    match err {
        IssueError::UnknownUser => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_user", err.to_string())
        }
        IssueError::AccountMisconfigured => json_error(
            StatusCode::BAD_REQUEST,
            "account_misconfigured",
            err.to_string(),
        ),
        IssueError::CredentialMismatch => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_password", err.to_string())
        }
        IssueError::Store(e) => {
            tracing::error!(error = %e, "credential issuance store failure");
            internal_error()
        }
    }
}
