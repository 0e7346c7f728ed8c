//! Dealer service records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::ApiResponse;

pub type ServiceHistoryResponse = ApiResponse<ServiceHistories>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHistories {
    #[serde(default)]
    pub service_histories: Vec<ServiceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_history_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_created_record: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations_performed: Option<serde_json::Value>,
    #[serde(default, rename = "ronumber", skip_serializing_if = "Option::is_none")]
    pub ro_number: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servicing_dealer: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_records() {
        let resp: ServiceHistoryResponse = serde_json::from_str(
            r#"{"payload":{"serviceHistories":[{"serviceHistoryId":"1",
                "customerCreatedRecord":false,"mileage":"15000","unit":"km",
                "serviceCategory":"Maintenance","serviceDate":"2023-06-15"}]}}"#,
        )
        .unwrap();
        let records = resp.payload.unwrap().service_histories;
        assert_eq!(records[0].service_date, NaiveDate::from_ymd_opt(2023, 6, 15));
        assert_eq!(records[0].mileage.as_deref(), Some("15000"));
    }

    #[test]
    fn empty_payload_yields_no_records() {
        let resp: ServiceHistoryResponse = serde_json::from_str(r#"{"payload":{}}"#).unwrap();
        assert!(resp.payload.unwrap().service_histories.is_empty());
    }
}
