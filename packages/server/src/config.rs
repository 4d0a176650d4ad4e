//! Monitor configuration.
//!
//! The binary builds this from command-line arguments; the library never reads argv.

use std::time::Duration;

use crate::domain::{DetectionMethod, Locale};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 51472;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_CONFIRM_DELAY_MS: u64 = 1000;
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 5;
/// Forwarded remote desktop port watched by the network method
pub const DEFAULT_RDP_PORT: u16 = 43389;
pub const DEFAULT_CENSUS_THRESHOLD: usize = 2;
/// Number of history entries included in a status response
pub const STATUS_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub poll_interval: Duration,
    pub confirm_delay: Duration,
    pub command_timeout: Duration,
    /// Enabled detection methods, in the order their users are merged
    pub methods: Vec<DetectionMethod>,
    pub rdp_port: u16,
    /// Only `Active` rows of the session table count as evidence
    pub strict_sessions: bool,
    /// Skip the session table unless remote desktop is enabled in the registry
    pub require_rdp_enabled: bool,
    pub census_threshold: usize,
    /// Let the process census be the sole positive signal
    pub census_standalone: bool,
    pub locale: Locale,
}

impl MonitorConfig {
    pub fn default_methods() -> Vec<DetectionMethod> {
        vec![
            DetectionMethod::Network,
            DetectionMethod::SessionTable,
            DetectionMethod::Environment,
        ]
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            confirm_delay: Duration::from_millis(DEFAULT_CONFIRM_DELAY_MS),
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            methods: Self::default_methods(),
            rdp_port: DEFAULT_RDP_PORT,
            strict_sessions: false,
            require_rdp_enabled: false,
            census_threshold: DEFAULT_CENSUS_THRESHOLD,
            census_standalone: false,
            locale: Locale::default(),
        }
    }
}
