//! Notification history, grouped per vehicle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::ApiResponse;

pub type NotificationResponse = ApiResponse<Vec<NotificationHistory>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_notifications() {
        let resp: NotificationResponse = serde_json::from_str(
            r#"{"payload":[{"guid":"g","notifications":[
                {"messageId":"m1","vin":"JTDKB20U123456789","type":"alert",
                 "isRead":false,"message":"Door unlocked",
                 "notificationDate":"2024-03-01T10:00:00Z"}]}]}"#,
        )
        .unwrap();
        let history = resp.payload.unwrap();
        let first = &history[0].notifications[0];
        assert_eq!(first.kind.as_deref(), Some("alert"));
        assert_eq!(first.is_read, Some(false));
    }
}
