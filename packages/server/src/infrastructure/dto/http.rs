//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionStatus, DetectionMethod};

/// One committed transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    /// RFC 3339 with offset
    pub timestamp: String,
    pub status: ConnectionStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUserDto {
    pub username: String,
    pub session_name: String,
    pub session_id: String,
    pub state: String,
    pub connection_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    pub detected_by: DetectionMethod,
}

/// `GET /api/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    pub is_remote_session: bool,
    pub last_check_time: Option<String>,
    pub status_text: String,
    /// Most recent entries, oldest first
    pub connection_history: Vec<HistoryEntryDto>,
    pub remote_users: Vec<RemoteUserDto>,
    pub user_count: usize,
}

/// `GET /api/history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDto {
    pub history: Vec<HistoryEntryDto>,
    pub total_records: usize,
}

/// `GET /api/force_check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceCheckDto {
    pub message: String,
    pub status: StatusDto,
}

/// `GET /api/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersDto {
    pub users: Vec<RemoteUserDto>,
    pub count: usize,
    pub query_time: String,
}
