//! Door, window and lock state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::ApiResponse;

pub type RemoteStatusResponse = ApiResponse<RemoteStatus>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStatus {
    #[serde(default)]
    pub vehicle_status: Vec<StatusCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caution_overall_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_acquisition_datetime: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_date: Option<DateTime<Utc>>,
}

/// A group of sections such as "Driver Side Door".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default)]
    pub sections: Vec<StatusSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StatusSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default)]
    pub values: Vec<SectionValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SectionValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

impl RemoteStatus {
    /// Look up a section by category and section name, case-insensitive.
    pub fn section(&self, category: &str, section: &str) -> Option<&StatusSection> {
        self.vehicle_status
            .iter()
            .filter(|c| {
                c.category
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(category))
            })
            .flat_map(|c| c.sections.iter())
            .find(|s| {
                s.section
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(section))
            })
    }
}
