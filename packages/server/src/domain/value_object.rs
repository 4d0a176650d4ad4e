//! Value objects for the connection monitor domain.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::ParseVariantError;

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Committed remote desktop connection status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionStatus {
    /// Map a raw detection result to a status
    pub fn from_detected(detected: bool) -> Self {
        if detected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    /// History message recorded for a transition into this status
    pub fn history_message(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::ZhCn, Self::Connected) => "远程桌面已连接",
            (Locale::ZhCn, Self::Disconnected) => "远程桌面已断开",
            (Locale::En, Self::Connected) => "Remote desktop connected",
            (Locale::En, Self::Disconnected) => "Remote desktop disconnected",
        }
    }

    /// Summary phrase shown while this status is current
    pub fn status_text(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::ZhCn, Self::Connected) => "远程桌面已连接",
            (Locale::ZhCn, Self::Disconnected) => "本地使用",
            (Locale::En, Self::Connected) => "Remote desktop connected",
            (Locale::En, Self::Disconnected) => "Local use",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language of user-facing phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    ZhCn,
    En,
}

impl Locale {
    /// Confirmation returned by a forced check
    pub fn force_check_message(self) -> &'static str {
        match self {
            Self::ZhCn => "状态已更新",
            Self::En => "Status updated",
        }
    }
}

impl FromStr for Locale {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" => Ok(Self::ZhCn),
            "en" | "en-us" => Ok(Self::En),
            other => Err(ParseVariantError::Locale(other.to_string())),
        }
    }
}

/// Independent evidence source for remote sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMethod {
    /// Session-name environment variable of this process
    #[serde(rename = "env")]
    Environment,
    /// Session listing utility
    SessionTable,
    /// Established connections on the remote desktop port
    Network,
    /// Count of remote-desktop-related processes (probabilistic)
    ProcessCensus,
}

impl DetectionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "env",
            Self::SessionTable => "session-table",
            Self::Network => "network",
            Self::ProcessCensus => "process-census",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMethod {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "env" | "environment" => Ok(Self::Environment),
            "session-table" | "sessions" => Ok(Self::SessionTable),
            "network" | "netstat" => Ok(Self::Network),
            "process-census" | "processes" => Ok(Self::ProcessCensus),
            other => Err(ParseVariantError::DetectionMethod(other.to_string())),
        }
    }
}
