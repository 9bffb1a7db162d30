use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use partnergate_api::app::{GatewayConfig, build_app};
use partnergate_auth::{AuthorizationRow, PasswordHasher, TokenClaims};
use partnergate_store::InMemoryCredentialStore;

const ISSUER: &str = "partner-gateway";
const SALT: &str = "c2FsdA==";

struct TestServer {
    base_url: String,
    store: Arc<InMemoryCredentialStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let store = Arc::new(InMemoryCredentialStore::new());
        let app = build_app(GatewayConfig::default(), store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_token(partner: &str, user: &str, issuer: &str, secret: &str, expires_in: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    let claims = TokenClaims {
        partner_id: partner.to_string(),
        user_id: user.to_string(),
        iss: issuer.to_string(),
        exp: (now + expires_in).max(0) as u64,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode token")
}

fn row(role: &str, page: &str) -> AuthorizationRow {
    AuthorizationRow {
        role_code: role.to_string(),
        page_code: page.to_string(),
        employee_name: "Jane Doe".to_string(),
        area_code: "N1".to_string(),
    }
}

#[tokio::test]
async fn exempt_path_allows_request_with_no_headers_at_all() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_headers_are_rejected_with_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // No headers at all.
    let res = client
        .get(format!("{}/api/whoami", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Partner header without a bearer token.
    let res = client
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Wrong authorization scheme.
    let res = client
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .header("Authorization", "Basic dXNlcjpwdw==")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_token_is_unauthorized() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .header("Authorization", "Bearer not.a.token")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mismatched_partner_claim_is_unauthorized_even_with_valid_signature() {
    let srv = TestServer::spawn().await;
    srv.store.set_secret("U1", "S");

    let token = mint_token("P2", "U1", ISSUER, "S", 600);
    let res = reqwest::Client::new()
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn partner_binding_is_case_insensitive_and_verified_token_is_allowed() {
    let srv = TestServer::spawn().await;
    srv.store.set_secret("U1", "S");

    // Header "P1", claim "p1": case difference must not matter.
    let token = mint_token("p1", "U1", ISSUER, "S", 600);
    let res = reqwest::Client::new()
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["partner_id"], "p1");
    assert_eq!(body["user_id"], "U1");
}

#[tokio::test]
async fn user_without_active_secret_is_unauthorized() {
    let srv = TestServer::spawn().await;

    let token = mint_token("p1", "U1", ISSUER, "S", 600);
    let res = reqwest::Client::new()
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "signing_key_invalid");
}

#[tokio::test]
async fn deactivated_account_stops_verifying() {
    let srv = TestServer::spawn().await;
    srv.store.set_secret("U1", "S");
    srv.store.deactivate("U1");

    let token = mint_token("p1", "U1", ISSUER, "S", 600);
    let res = reqwest::Client::new()
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let srv = TestServer::spawn().await;
    srv.store.set_secret("U1", "S");

    let token = mint_token("p1", "U1", ISSUER, "S", -600);
    let res = reqwest::Client::new()
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_unauthorized() {
    let srv = TestServer::spawn().await;
    srv.store.set_secret("U1", "S");

    let token = mint_token("p1", "U1", ISSUER, "not-S", 600);
    let res = reqwest::Client::new()
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_from_wrong_issuer_is_unauthorized() {
    let srv = TestServer::spawn().await;
    srv.store.set_secret("U1", "S");

    let token = mint_token("p1", "U1", "someone-else", "S", 600);
    let res = reqwest::Client::new()
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P1")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_profile_and_registered_secret_verifies_later_tokens() {
    let srv = TestServer::spawn().await;

    let digest = PasswordHasher::default().hash("correct-pw", SALT).unwrap();
    srv.store.insert_account("jdoe", SALT, &digest);
    srv.store.add_authorization_row("jdoe", row("sales", "home"));
    srv.store.add_authorization_row("jdoe", row("sales", "orders"));

    let client = reqwest::Client::new();

    // Issuance is exempt: no auth headers.
    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({
            "login_id": "jdoe",
            "password": "correct-pw",
            "app_reg_id": "reg-secret-1",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["display_name"], "Jane Doe");
    assert_eq!(body["area_code"], "N1");
    assert_eq!(body["roles"], json!(["sales"]));
    assert_eq!(body["pages"], json!(["home", "orders"]));

    // The persisted registration id is now the signing secret.
    let token = mint_token("P7", "jdoe", ISSUER, "reg-secret-1", 600);
    let res = client
        .get(format!("{}/api/whoami", srv.base_url))
        .header("PartnerID", "P7")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user_id"], "jdoe");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let srv = TestServer::spawn().await;

    let digest = PasswordHasher::default().hash("correct-pw", SALT).unwrap();
    srv.store.insert_account("jdoe", SALT, &digest);

    let res = reqwest::Client::new()
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({
            "login_id": "jdoe",
            "password": "wrong-pw",
            "app_reg_id": "reg",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_password");
}

#[tokio::test]
async fn login_for_unknown_user_is_unauthorized() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({
            "login_id": "ghost",
            "password": "pw",
            "app_reg_id": "reg",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_user");
}

#[tokio::test]
async fn login_against_misconfigured_account_is_bad_request() {
    let srv = TestServer::spawn().await;
    srv.store.insert_unconfigured_account("jdoe");

    let res = reqwest::Client::new()
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({
            "login_id": "jdoe",
            "password": "pw",
            "app_reg_id": "reg",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "account_misconfigured");
}

#[tokio::test]
async fn login_without_authorization_rows_is_misconfigured() {
    let srv = TestServer::spawn().await;

    let digest = PasswordHasher::default().hash("correct-pw", SALT).unwrap();
    srv.store.insert_account("jdoe", SALT, &digest);

    let res = reqwest::Client::new()
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({
            "login_id": "jdoe",
            "password": "correct-pw",
            "app_reg_id": "reg",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "account_misconfigured");
}

#[tokio::test]
async fn login_with_blank_fields_is_bad_request() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({
            "login_id": "  ",
            "password": "",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
