//! Process census probe.
//!
//! Counts running processes whose name contains a remote-desktop marker.
//! This is probabilistic: clients and helper services match the marker too,
//! so by default the census only corroborates other methods.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DetectionMethod, ProbeError};

use super::{Evidence, EvidenceProbe, ProcessInspector};

const PROCESS_MARKER: &str = "rdp";

pub struct ProcessCensusProbe {
    inspector: Arc<dyn ProcessInspector>,
    threshold: usize,
    standalone: bool,
}

impl ProcessCensusProbe {
    pub fn new(inspector: Arc<dyn ProcessInspector>, threshold: usize, standalone: bool) -> Self {
        Self {
            inspector,
            threshold,
            standalone,
        }
    }
}

/// Number of names containing `marker` (case-insensitive)
pub fn count_matching<'a, I>(names: I, marker: &str) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let marker = marker.to_lowercase();
    names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&marker))
        .count()
}

#[async_trait]
impl EvidenceProbe for ProcessCensusProbe {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::ProcessCensus
    }

    fn corroborating_only(&self) -> bool {
        !self.standalone
    }

    async fn collect(&self) -> Result<Evidence, ProbeError> {
        let inspector = self.inspector.clone();
        let names = tokio::task::spawn_blocking(move || inspector.process_names())
            .await
            .map_err(|e| ProbeError::Unavailable(e.to_string()))?;

        let count = count_matching(names.iter().map(String::as_str), PROCESS_MARKER);
        tracing::debug!(count, threshold = self.threshold, "Process census");
        Ok(Evidence {
            positive: count > self.threshold,
            users: Vec::new(),
        })
    }
}
