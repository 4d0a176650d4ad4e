//! Session table probe (`query session`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{DetectionMethod, ProbeError, RemoteUser},
    infrastructure::{
        command::CommandRunner,
        parser::{SessionRow, parse_remote_desktop_enabled, parse_session_table},
    },
};

use super::{Evidence, EvidenceProbe};

const QUERY_PROGRAM: &str = "query";
const QUERY_ARGS: [&str; 1] = ["session"];
const REG_PROGRAM: &str = "reg";
const REG_ARGS: [&str; 4] = [
    "query",
    r"HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\Terminal Server",
    "/v",
    "fDenyTSConnections",
];
const REMOTE_SESSION_PREFIX: &str = "rdp-tcp#";

pub struct SessionTableProbe {
    runner: Arc<dyn CommandRunner>,
    strict: bool,
    require_rdp_enabled: bool,
}

impl SessionTableProbe {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            strict: false,
            require_rdp_enabled: false,
        }
    }

    /// Require the `Active` state on remote rows
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Consult the registry before listing sessions
    pub fn require_rdp_enabled(mut self, require: bool) -> Self {
        self.require_rdp_enabled = require;
        self
    }

    fn is_evidence(&self, row: &SessionRow) -> bool {
        row.is_remote(REMOTE_SESSION_PREFIX)
            && !row.is_listener()
            && (!self.strict || row.is_active())
    }

    async fn remote_desktop_enabled(&self) -> Result<bool, ProbeError> {
        let output = self.runner.run(REG_PROGRAM, &REG_ARGS).await?;
        parse_remote_desktop_enabled(&output).ok_or_else(|| ProbeError::Malformed {
            program: REG_PROGRAM.to_string(),
            reason: "fDenyTSConnections not found".to_string(),
        })
    }
}

fn to_remote_user(row: SessionRow) -> RemoteUser {
    RemoteUser {
        username: row.username.unwrap_or_else(|| row.session_name.clone()),
        session_name: row.session_name,
        session_id: row.session_id.to_string(),
        state: row.state,
        connection_type: RemoteUser::CONNECTION_TYPE.to_string(),
        remote_ip: None,
        local_address: None,
        remote_address: None,
        process_name: None,
        detected_by: DetectionMethod::SessionTable,
    }
}

#[async_trait]
impl EvidenceProbe for SessionTableProbe {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::SessionTable
    }

    async fn collect(&self) -> Result<Evidence, ProbeError> {
        if self.require_rdp_enabled && !self.remote_desktop_enabled().await? {
            tracing::debug!("Remote desktop disabled in registry, skipping session table");
            return Ok(Evidence::negative());
        }

        let output = self.runner.run(QUERY_PROGRAM, &QUERY_ARGS).await?;
        let users = parse_session_table(&output)
            .into_iter()
            .filter(|row| self.is_evidence(row))
            .map(to_remote_user)
            .collect();
        Ok(Evidence::from_users(users))
    }
}
