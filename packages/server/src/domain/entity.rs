//! Entities for the connection monitor domain.

use std::collections::{HashSet, VecDeque};

use super::value_object::{ConnectionStatus, DetectionMethod, Locale, Timestamp};

/// Maximum number of retained history entries
pub const HISTORY_CAPACITY: usize = 50;

/// Record of a committed status transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: Timestamp,
    pub status: ConnectionStatus,
}

impl HistoryEntry {
    pub fn new(timestamp: Timestamp, status: ConnectionStatus) -> Self {
        Self { timestamp, status }
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        self.status.history_message(locale)
    }
}

/// Chronological, capacity-bounded transition history.
///
/// Pushing beyond capacity evicts the oldest entry first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ConnectionHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// The `count` most recent entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<HistoryEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }
}

impl Default for ConnectionHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide committed connection state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionState {
    pub status: ConnectionStatus,
    pub last_checked_at: Option<Timestamp>,
    pub history: ConnectionHistory,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    /// Record that a check happened without changing the status
    pub fn mark_checked(&mut self, at: Timestamp) {
        self.last_checked_at = Some(at);
    }

    /// Commit a detection result.
    ///
    /// Returns `true` when the status changed and a history entry was appended.
    pub fn commit(&mut self, status: ConnectionStatus, at: Timestamp) -> bool {
        self.mark_checked(at);
        if self.status == status {
            return false;
        }
        self.status = status;
        self.history.push(HistoryEntry::new(at, status));
        true
    }
}

/// A remote session or connection observed by one detection method.
///
/// Recomputed on every query, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser {
    /// Username, or a synthesized label for network-only detections
    pub username: String,
    pub session_name: String,
    pub session_id: String,
    pub state: String,
    pub connection_type: String,
    pub remote_ip: Option<String>,
    pub local_address: Option<String>,
    pub remote_address: Option<String>,
    pub process_name: Option<String>,
    pub detected_by: DetectionMethod,
}

impl RemoteUser {
    pub const CONNECTION_TYPE: &'static str = "RDP";

    /// Identity used to suppress duplicate detections of the same connection
    pub fn dedup_key(&self) -> String {
        match (&self.detected_by, &self.remote_ip) {
            (DetectionMethod::Network, Some(ip)) => ip.clone(),
            _ => self.username.to_lowercase(),
        }
    }
}

/// Merge per-method user lists in order; the first record for a key wins.
pub fn merge_users<I>(groups: I) -> Vec<RemoteUser>
where
    I: IntoIterator<Item = Vec<RemoteUser>>,
{
    let mut seen = HashSet::new();
    groups
        .into_iter()
        .flatten()
        .filter(|user| seen.insert(user.dedup_key()))
        .collect()
}

/// Committed state together with a freshly collected user list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub state: ConnectionState,
    pub users: Vec<RemoteUser>,
}
