//! Vendor API paths and the trips query.

use bon::Builder;
use chrono::NaiveDate;

pub const VEHICLE_ASSOCIATION: &str = "/v1/vehicle-association/vehicle";
pub const VEHICLE_GUID: &str = "/v2/vehicle/guid";
pub const LOCATION: &str = "/v1/location";
pub const HEALTH_STATUS: &str = "/v1/vehiclehealth/status";
pub const REMOTE_STATUS: &str = "/v1/global/remote/status";
pub const ELECTRIC_STATUS: &str = "/v1/global/remote/electric/status";
pub const TELEMETRY: &str = "/v3/telemetry";
pub const NOTIFICATION_HISTORY: &str = "/v2/notification/history";
pub const TRIPS: &str = "/v1/trips";
pub const SERVICE_HISTORY: &str = "/v1/servicehistory/vehicle/summary";

/// Parameters of the trips listing.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use mytoyota::api::TripsQuery;
///
/// let query = TripsQuery::builder()
///     .from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .to(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
///     .build();
/// assert_eq!(
///     query.path(),
///     "/v1/trips?from=2024-01-01&to=2024-01-31&route=False&summary=True&limit=5&offset=0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct TripsQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Include sampled route points.
    #[builder(default)]
    pub route: bool,
    /// Include monthly aggregates.
    #[builder(default = true)]
    pub summary: bool,
    #[builder(default = 5)]
    pub limit: u32,
    #[builder(default)]
    pub offset: u32,
}

impl TripsQuery {
    /// Path with the query string inlined. Flags use the capitalized
    /// `True`/`False` spelling the service expects.
    pub fn path(&self) -> String {
        format!(
            "{TRIPS}?from={}&to={}&route={}&summary={}&limit={}&offset={}",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d"),
            flag(self.route),
            flag(self.summary),
            self.limit,
            self.offset,
        )
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
