//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/session`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshotDto {
    pub target: Option<String>,
    pub phase: String,
    pub room_id: Option<String>,
    pub generation: u64,
    /// RFC 3339 time of the last phase change
    pub since: String,
}
