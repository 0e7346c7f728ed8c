//! Authenticated access to the connected-car API.

pub mod endpoints;
pub mod facade;
pub mod gateway;
pub mod redact;

pub use endpoints::TripsQuery;
pub use facade::Api;
pub use gateway::{ApiMethod, RawResponse, RequestContext, RequestGateway};
