//! Vehicle health: warning lights and oil level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::ApiResponse;

pub type HealthStatusResponse = ApiResponse<HealthStatus>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    #[serde(default)]
    pub quantity_of_eng_oil_icon: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default)]
    pub warning: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wnglast_upd_time: Option<DateTime<Utc>>,
}

impl HealthStatus {
    pub fn has_warnings(&self) -> bool {
        !self.warning.is_empty() || !self.quantity_of_eng_oil_icon.is_empty()
    }
}
