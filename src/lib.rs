//! MyToyota — client for Toyota connected-car services
//!
//! Logs in with the account's username and password, keeps the resulting
//! OAuth tokens fresh (cached on disk between runs) and exposes the vehicle
//! endpoints as typed async methods.
//!
//! # Quick Start
//!
//! ```no_run
//! use mytoyota::prelude::*;
//!
//! # async fn example() -> mytoyota::Result<()> {
//! let config = ClientConfig::builder()
//!     .username("driver@example.com")
//!     .password("secret")
//!     .build();
//! let api = Api::new(config)?;
//! let vehicles = api.get_vehicles().await?;
//! for vehicle in vehicles.payload.unwrap_or_default() {
//!     if let Some(vin) = vehicle.vin {
//!         let location = api.get_location(&vin).await?;
//!         println!("{vin}: {:?}", location.payload);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Result, ToyotaError};
