//! Session-name environment variable probe.
//!
//! Only tells whether *this* process runs inside a remote session.

use async_trait::async_trait;

use crate::domain::{DetectionMethod, ProbeError, RemoteUser};

use super::{Evidence, EvidenceProbe};

const SESSION_VARIABLE: &str = "SESSIONNAME";
const REMOTE_PREFIX: &str = "RDP-";
const USER_VARIABLES: [&str; 2] = ["USERNAME", "USER"];

type Lookup = fn(&str) -> Option<String>;

pub struct EnvironmentProbe {
    lookup: Lookup,
}

impl EnvironmentProbe {
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Use `lookup` instead of the process environment
    pub fn with_lookup(lookup: Lookup) -> Self {
        Self { lookup }
    }
}

impl Default for EnvironmentProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Session name carries the remote-session marker
pub fn is_remote_session_name(session_name: &str) -> bool {
    session_name
        .get(..REMOTE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(REMOTE_PREFIX))
}

#[async_trait]
impl EvidenceProbe for EnvironmentProbe {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Environment
    }

    async fn collect(&self) -> Result<Evidence, ProbeError> {
        let Some(session_name) = (self.lookup)(SESSION_VARIABLE) else {
            return Ok(Evidence::negative());
        };
        if !is_remote_session_name(&session_name) {
            return Ok(Evidence::negative());
        }

        let username = USER_VARIABLES
            .iter()
            .find_map(|name| (self.lookup)(name))
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Evidence::from_users(vec![RemoteUser {
            username,
            session_name,
            session_id: "current".to_string(),
            state: "Active".to_string(),
            connection_type: RemoteUser::CONNECTION_TYPE.to_string(),
            remote_ip: None,
            local_address: None,
            remote_address: None,
            process_name: None,
            detected_by: DetectionMethod::Environment,
        }]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_remote_session_name_is_positive() {
        // テスト項目: SESSIONNAME が RDP- で始まる場合は陽性になる
        // given (前提条件):
        let probe = EnvironmentProbe::with_lookup(|name| match name {
            "SESSIONNAME" => Some("RDP-Tcp#12".to_string()),
            "USERNAME" => Some("alice".to_string()),
            _ => None,
        });

        // when (操作):
        let evidence = probe.collect().await.unwrap();

        // then (期待する結果):
        assert!(evidence.positive);
        assert_eq!(evidence.users.len(), 1);
        assert_eq!(evidence.users[0].username, "alice");
        assert_eq!(evidence.users[0].session_name, "RDP-Tcp#12");
        assert_eq!(evidence.users[0].detected_by, DetectionMethod::Environment);
    }

    #[tokio::test]
    async fn test_console_session_is_negative() {
        // テスト項目: コンソールセッションでは陰性になる
        // given (前提条件):
        let probe = EnvironmentProbe::with_lookup(|name| {
            (name == "SESSIONNAME").then(|| "Console".to_string())
        });

        // when (操作):
        let evidence = probe.collect().await.unwrap();

        // then (期待する結果):
        assert_eq!(evidence, Evidence::negative());
    }

    #[tokio::test]
    async fn test_missing_variable_is_negative() {
        // テスト項目: 環境変数が存在しない場合は陰性になる
        // given (前提条件):
        let probe = EnvironmentProbe::with_lookup(|_| None);

        // when (操作):
        let evidence = probe.collect().await.unwrap();

        // then (期待する結果):
        assert!(!evidence.positive);
    }

    #[test]
    fn test_is_remote_session_name() {
        // テスト項目: 接頭辞の判定が大文字小文字を区別せず、短い値でも panic しない
        // given (前提条件):

        // when (操作) / then (期待する結果):
        assert!(is_remote_session_name("RDP-Tcp#0"));
        assert!(is_remote_session_name("rdp-tcp#0"));
        assert!(!is_remote_session_name("Console"));
        assert!(!is_remote_session_name("RD"));
        assert!(!is_remote_session_name(""));
    }
}
