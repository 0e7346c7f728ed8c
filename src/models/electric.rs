//! Battery and charging state of electrified vehicles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ApiResponse, ValueWithUnit};

pub type ElectricStatusResponse = ApiResponse<ElectricStatus>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ElectricStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_set_min_charging_limit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charging_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ev_range: Option<ValueWithUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ev_range_with_ac: Option<ValueWithUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_range: Option<ValueWithUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_timestamp: Option<DateTime<Utc>>,
    /// Minutes until fully charged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_charge_time: Option<i64>,
}
