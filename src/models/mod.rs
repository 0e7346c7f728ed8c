//! Typed response models for the vendor API.
//!
//! Field sets vary by drivetrain and market, so nearly everything is
//! optional and unknown fields are ignored.

pub mod common;
pub mod electric;
pub mod health;
pub mod location;
pub mod notification;
pub mod remote_status;
pub mod service_history;
pub mod telemetry;
pub mod trips;
pub mod vehicle;

pub use common::{ApiResponse, Status, StatusMessage, StatusMessages, ValueWithUnit};
pub use electric::{ElectricStatus, ElectricStatusResponse};
pub use health::{HealthStatus, HealthStatusResponse};
pub use location::{Location, LocationResponse, VehicleLocation};
pub use notification::{Notification, NotificationHistory, NotificationResponse};
pub use remote_status::{RemoteStatus, RemoteStatusResponse, SectionValue, StatusCategory, StatusSection};
pub use service_history::{ServiceHistories, ServiceHistoryResponse, ServiceRecord};
pub use telemetry::{Telemetry, TelemetryResponse};
pub use trips::{Pagination, RoutePoint, Trip, TripSummary, Trips, TripsMetadata, TripsResponse};
pub use vehicle::{Vehicle, VehicleAlias, VehiclesResponse};
