//! Evidence probes: one per detection method.
//!
//! A probe answers "is there evidence of a remote session?" and "which
//! sessions?" from a single source. Failures are returned as `ProbeError`
//! and the collector treats them as "no evidence from this method".

pub mod environment;
pub mod network;
pub mod process;
pub mod process_census;
pub mod session_table;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::MonitorConfig,
    domain::{DetectionMethod, ProbeError, RemoteUser},
    infrastructure::command::CommandRunner,
};

pub use environment::EnvironmentProbe;
pub use network::NetworkProbe;
pub use process::{ProcessInspector, SysinfoProcessInspector};
pub use process_census::ProcessCensusProbe;
pub use session_table::SessionTableProbe;

/// What a single probe observed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    pub positive: bool,
    pub users: Vec<RemoteUser>,
}

impl Evidence {
    pub fn negative() -> Self {
        Self::default()
    }

    pub fn from_users(users: Vec<RemoteUser>) -> Self {
        Self {
            positive: !users.is_empty(),
            users,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvidenceProbe: Send + Sync {
    fn method(&self) -> DetectionMethod;

    /// A corroborating probe never turns detection positive on its own
    fn corroborating_only(&self) -> bool {
        false
    }

    async fn collect(&self) -> Result<Evidence, ProbeError>;
}

/// Build the probes enabled in `config`, in configuration order
pub fn build_probes(
    config: &MonitorConfig,
    runner: Arc<dyn CommandRunner>,
    inspector: Arc<dyn ProcessInspector>,
) -> Vec<Arc<dyn EvidenceProbe>> {
    let mut probes: Vec<Arc<dyn EvidenceProbe>> = Vec::new();
    for method in &config.methods {
        if probes.iter().any(|probe| probe.method() == *method) {
            continue;
        }
        let probe: Arc<dyn EvidenceProbe> = match method {
            DetectionMethod::Environment => Arc::new(EnvironmentProbe::new()),
            DetectionMethod::SessionTable => Arc::new(
                SessionTableProbe::new(runner.clone())
                    .strict(config.strict_sessions)
                    .require_rdp_enabled(config.require_rdp_enabled),
            ),
            DetectionMethod::Network => Arc::new(NetworkProbe::new(
                runner.clone(),
                inspector.clone(),
                config.rdp_port,
            )),
            DetectionMethod::ProcessCensus => Arc::new(ProcessCensusProbe::new(
                inspector.clone(),
                config.census_threshold,
                config.census_standalone,
            )),
        };
        probes.push(probe);
    }
    probes
}
