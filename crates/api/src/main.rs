use std::sync::Arc;

use partnergate_api::app::{GatewayConfig, build_app};
use partnergate_store::{CredentialStore, InMemoryCredentialStore};

#[tokio::main]
async fn main() {
    partnergate_observability::init();

    let mut config = GatewayConfig::default();
    if let Ok(issuer) = std::env::var("TOKEN_ISSUER") {
        config.expected_issuer = issuer;
    } else {
        tracing::warn!("TOKEN_ISSUER not set; using default issuer");
    }

    let store = build_store().await;
    let app = build_app(config, store);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

async fn build_store() -> Arc<dyn CredentialStore> {
    let use_postgres = std::env::var("USE_POSTGRES_STORE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_postgres {
        #[cfg(feature = "postgres")]
        {
            let database_url = std::env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set when USE_POSTGRES_STORE=true");
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .expect("failed to connect to Postgres");
            return Arc::new(partnergate_store::PostgresCredentialStore::new(pool));
        }
        #[cfg(not(feature = "postgres"))]
        tracing::warn!(
            "USE_POSTGRES_STORE=true but postgres feature not enabled, falling back to in-memory"
        );
    }

    Arc::new(InMemoryCredentialStore::new())
}
