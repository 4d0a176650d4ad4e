//! Conversion logic from domain entities to DTOs.
//!
//! Phrases depend on the configured locale, so conversions that produce
//! text take it explicitly.

use rdpwatch_shared::time::timestamp_to_rfc3339;

use crate::{
    config::STATUS_HISTORY_LIMIT,
    domain::{HistoryEntry, Locale, RemoteUser, StatusSnapshot, Timestamp},
    infrastructure::dto::http as dto,
    usecase::RemoteUserList,
};

fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp_to_rfc3339(timestamp.value()).unwrap_or_default()
}

impl From<RemoteUser> for dto::RemoteUserDto {
    fn from(model: RemoteUser) -> Self {
        Self {
            username: model.username,
            session_name: model.session_name,
            session_id: model.session_id,
            state: model.state,
            connection_type: model.connection_type,
            remote_ip: model.remote_ip,
            local_address: model.local_address,
            remote_address: model.remote_address,
            process_name: model.process_name,
            detected_by: model.detected_by,
        }
    }
}

impl dto::HistoryEntryDto {
    pub fn from_entry(entry: &HistoryEntry, locale: Locale) -> Self {
        Self {
            timestamp: format_timestamp(entry.timestamp),
            status: entry.status,
            message: entry.message(locale).to_string(),
        }
    }
}

impl dto::StatusDto {
    pub fn from_snapshot(snapshot: StatusSnapshot, locale: Locale) -> Self {
        let StatusSnapshot { state, users } = snapshot;
        let remote_users: Vec<dto::RemoteUserDto> = users.into_iter().map(Into::into).collect();
        Self {
            is_remote_session: state.is_connected(),
            last_check_time: state.last_checked_at.map(format_timestamp),
            status_text: state.status.status_text(locale).to_string(),
            connection_history: state
                .history
                .recent(STATUS_HISTORY_LIMIT)
                .iter()
                .map(|entry| dto::HistoryEntryDto::from_entry(entry, locale))
                .collect(),
            user_count: remote_users.len(),
            remote_users,
        }
    }
}

impl dto::HistoryDto {
    pub fn from_entries(entries: &[HistoryEntry], locale: Locale) -> Self {
        Self {
            history: entries
                .iter()
                .map(|entry| dto::HistoryEntryDto::from_entry(entry, locale))
                .collect(),
            total_records: entries.len(),
        }
    }
}

impl dto::ForceCheckDto {
    pub fn from_snapshot(snapshot: StatusSnapshot, locale: Locale) -> Self {
        Self {
            message: locale.force_check_message().to_string(),
            status: dto::StatusDto::from_snapshot(snapshot, locale),
        }
    }
}

impl From<RemoteUserList> for dto::UsersDto {
    fn from(model: RemoteUserList) -> Self {
        let users: Vec<dto::RemoteUserDto> = model.users.into_iter().map(Into::into).collect();
        Self {
            count: users.len(),
            users,
            query_time: format_timestamp(model.queried_at),
        }
    }
}
