//! Established-connection probe on the remote desktop port.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::{
    domain::{DetectionMethod, ProbeError, RemoteUser},
    infrastructure::{
        command::CommandRunner,
        parser::{ConnectionRow, parse_connection_table},
    },
};

use super::{Evidence, EvidenceProbe, ProcessInspector};

const NETSTAT_PROGRAM: &str = "netstat";
#[cfg(windows)]
const NETSTAT_ARGS: [&str; 1] = ["-ano"];
#[cfg(not(windows))]
const NETSTAT_ARGS: [&str; 1] = ["-tnp"];
const SESSION_NAME: &str = "RDP-Tcp";

pub struct NetworkProbe {
    runner: Arc<dyn CommandRunner>,
    inspector: Arc<dyn ProcessInspector>,
    rdp_port: u16,
}

impl NetworkProbe {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        inspector: Arc<dyn ProcessInspector>,
        rdp_port: u16,
    ) -> Self {
        Self {
            runner,
            inspector,
            rdp_port,
        }
    }

    /// Resolve owning process names for `pids` on the blocking pool
    async fn process_names(&self, pids: Vec<u32>) -> Result<HashMap<u32, String>, ProbeError> {
        if pids.is_empty() {
            return Ok(HashMap::new());
        }
        let inspector = self.inspector.clone();
        tokio::task::spawn_blocking(move || {
            pids.into_iter()
                .filter_map(|pid| inspector.process_name(pid).map(|name| (pid, name)))
                .collect::<HashMap<u32, String>>()
        })
        .await
        .map_err(|e| ProbeError::Unavailable(e.to_string()))
    }
}

fn to_remote_user(row: ConnectionRow, names: &HashMap<u32, String>) -> Option<RemoteUser> {
    let remote_ip = row.remote_ip()?.to_string();
    let process_name = row
        .program
        .clone()
        .or_else(|| row.pid.and_then(|pid| names.get(&pid).cloned()));

    Some(RemoteUser {
        username: format!("remote connection from {remote_ip}"),
        session_name: SESSION_NAME.to_string(),
        session_id: row.pid.map(|pid| pid.to_string()).unwrap_or_default(),
        state: "Active".to_string(),
        connection_type: RemoteUser::CONNECTION_TYPE.to_string(),
        remote_ip: Some(remote_ip),
        local_address: Some(row.local_address),
        remote_address: Some(row.remote_address),
        process_name,
        detected_by: DetectionMethod::Network,
    })
}

#[async_trait]
impl EvidenceProbe for NetworkProbe {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Network
    }

    async fn collect(&self) -> Result<Evidence, ProbeError> {
        let output = self.runner.run(NETSTAT_PROGRAM, &NETSTAT_ARGS).await?;
        let rows: Vec<ConnectionRow> = parse_connection_table(&output)
            .into_iter()
            .filter(|row| row.local_port() == Some(self.rdp_port))
            .collect();

        let mut pids: Vec<u32> = rows
            .iter()
            .filter(|row| row.program.is_none())
            .filter_map(|row| row.pid)
            .collect();
        pids.sort_unstable();
        pids.dedup();
        let names = self.process_names(pids).await?;

        let users = rows
            .into_iter()
            .filter_map(|row| to_remote_user(row, &names))
            .collect();
        Ok(Evidence::from_users(users))
    }
}
