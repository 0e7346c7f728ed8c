//! Session management: vendor login, credential lifecycle, on-disk cache.

pub mod authenticator;
pub mod backend;
pub mod credential;
pub mod jwt;
pub mod manager;
pub mod store;

pub use authenticator::Authenticator;
pub use backend::{AuthBackend, TokenGrant};
pub use credential::{ActiveToken, Credential, TokenState};
pub use manager::TokenManager;
pub use store::{FileTokenStore, TokenStore};
