//! `partnergate-store`: the credential-lookup capability and the services
//! built on it.
//!
//! The gate consumes [`CredentialStore`] as a capability: it owns the
//! persisted secrets, credential records, and authorization rows, while the
//! gate itself holds no persistent state. An in-memory implementation serves
//! dev/test; a Postgres implementation is available behind the `postgres`
//! feature.

pub mod credential_store;
pub mod in_memory;
pub mod issuer;
pub mod key_resolver;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use credential_store::{CredentialStore, CredentialStoreError};
pub use in_memory::InMemoryCredentialStore;
pub use issuer::{CredentialIssuer, IssueError, IssuedProfile};
pub use key_resolver::{KeyResolutionError, TenantKeyResolver};
#[cfg(feature = "postgres")]
pub use postgres::PostgresCredentialStore;
