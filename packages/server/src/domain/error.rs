//! Error types for the connection monitor.

use std::time::Duration;

use thiserror::Error;

/// A single detection method could not produce evidence.
///
/// Never fatal: the collector logs it and treats the method as silent.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The external command could not be started (missing tool, permissions)
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command did not finish in time
    #[error("'{program}' timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    /// The external command exited unsuccessfully
    #[error("'{program}' exited with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: String,
        stderr: String,
    },

    /// The output did not contain what the parser needs
    #[error("unusable output from '{program}': {reason}")]
    Malformed { program: String, reason: String },

    /// Process introspection was not available
    #[error("process introspection unavailable: {0}")]
    Unavailable(String),
}

/// Unknown value for a configuration enum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVariantError {
    #[error("unknown locale '{0}' (expected zh-cn or en)")]
    Locale(String),

    #[error("unknown detection method '{0}' (expected env, session-table, network or process-census)")]
    DetectionMethod(String),
}
