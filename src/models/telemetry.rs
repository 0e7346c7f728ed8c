use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ApiResponse, ValueWithUnit};

pub type TelemetryResponse = ApiResponse<Telemetry>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer: Option<ValueWithUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charging_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_to_empty: Option<ValueWithUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_telemetry_for_petrol_vehicle() {
        let resp: TelemetryResponse = serde_json::from_str(
            r#"{"payload":{"fuelType":"B","odometer":{"value":12345.0,"unit":"km"},
                "fuelLevel":60,"distanceToEmpty":{"value":420,"unit":"km"},
                "timestamp":"2024-03-01T10:00:00Z"}}"#,
        )
        .unwrap();
        let telemetry = resp.payload.unwrap();
        assert_eq!(telemetry.odometer.unwrap().value, Some(12345.0));
        assert_eq!(telemetry.fuel_level, Some(60));
        assert!(telemetry.battery_level.is_none());
    }
}
