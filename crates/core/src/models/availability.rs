use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::WallTime;

/// A recurring weekly interval during which appointments may be offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub id: Uuid,
    /// 0-6, Sunday = 0
    pub day_of_week: u8,
    pub start_time: WallTime,
    pub end_time: WallTime,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a window creation request.
///
/// Every field is optional on the wire so that missing input is reported
/// with the same messages as malformed input instead of a decoder error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWindowRequest {
    pub day_of_week: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWindowRequest {
    pub day_of_week: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowResponse {
    pub window: AvailabilityWindow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowListResponse {
    pub windows: Vec<AvailabilityWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteWindowResponse {
    pub success: bool,
}
