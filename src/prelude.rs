//! Convenience re-exports for common use.

pub use crate::api::{Api, RequestContext, RequestGateway, TripsQuery};
pub use crate::auth::{AuthBackend, Credential, FileTokenStore, TokenManager, TokenState, TokenStore};
pub use crate::config::{ClientConfig, Endpoints};
pub use crate::error::{ErrorCategory, RecoverySuggestion, Result, ToyotaError};
pub use crate::models::ApiResponse;
