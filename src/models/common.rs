//! Envelope and shared value types used by every endpoint.

use serde::{Deserialize, Serialize};

/// Standard response wrapper returned by the vendor API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Borrow the payload, if the server sent one.
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

/// `status` is either a bare word (`"SUCCESS"`) or a list of messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Status {
    Text(String),
    Messages(StatusMessages),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StatusMessages {
    #[serde(default)]
    pub messages: Vec<StatusMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
}

/// A measurement as the vendor reports it; units are not converted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ValueWithUnit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_plain_text() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"status":"SUCCESS","code":200,"payload":{"a":1}}"#).unwrap();
        assert_eq!(resp.status, Some(Status::Text("SUCCESS".into())));
        assert_eq!(resp.code, Some(200));
        assert_eq!(resp.payload().unwrap()["a"], 1);
    }

    #[test]
    fn status_accepts_message_list() {
        let resp: ApiResponse<serde_json::Value> = serde_json::from_str(
            r#"{"status":{"messages":[{"responseCode":"OneappService-S0000",
                "description":"Request Completed Successfully",
                "detailedDescription":"Request Completed Successfully"}]}}"#,
        )
        .unwrap();
        let Some(Status::Messages(messages)) = resp.status else {
            panic!("expected structured status");
        };
        assert_eq!(
            messages.messages[0].response_code.as_deref(),
            Some("OneappService-S0000")
        );
        assert!(resp.payload.is_none());
    }

    #[test]
    fn value_with_unit_tolerates_missing_unit() {
        let v: ValueWithUnit = serde_json::from_str(r#"{"value":12.5}"#).unwrap();
        assert_eq!(v.value, Some(12.5));
        assert_eq!(v.unit, None);
    }
}
