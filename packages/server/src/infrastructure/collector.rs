//! EvidenceCollector 実装
//!
//! 有効な検出方法（プローブ）を並行に実行し、結果を論理和で合成します。
//!
//! プローブの失敗・panic は全てここで吸収され、その方法は「証拠なし」として扱われます。

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;

use crate::{
    config::MonitorConfig,
    domain::{DetectionMethod, EvidenceCollector, RemoteUser, merge_users},
    infrastructure::{
        command::SystemCommandRunner,
        probe::{Evidence, EvidenceProbe, SysinfoProcessInspector, build_probes},
    },
};

/// Result of one probe run
struct ProbeReport {
    method: DetectionMethod,
    corroborating_only: bool,
    evidence: Option<Evidence>,
}

/// 複数のプローブを束ねる EvidenceCollector
pub struct CompositeEvidenceCollector {
    probes: Vec<Arc<dyn EvidenceProbe>>,
}

impl CompositeEvidenceCollector {
    pub fn new(probes: Vec<Arc<dyn EvidenceProbe>>) -> Self {
        Self { probes }
    }

    /// 設定に従って OS のコマンドとプロセス情報を使うプローブを構築
    pub fn from_config(config: &MonitorConfig) -> Self {
        let runner = Arc::new(SystemCommandRunner::new(config.command_timeout));
        let inspector = Arc::new(SysinfoProcessInspector::new());
        Self::new(build_probes(config, runner, inspector))
    }

    pub fn methods(&self) -> Vec<DetectionMethod> {
        self.probes.iter().map(|probe| probe.method()).collect()
    }

    /// 全プローブを並行に実行し、設定順にレポートを返す
    async fn gather(&self) -> Vec<ProbeReport> {
        let handles = self.probes.iter().map(|probe| {
            let probe = probe.clone();
            tokio::spawn(async move { probe.collect().await })
        });
        let results = join_all(handles).await;

        self.probes
            .iter()
            .zip(results)
            .map(|(probe, joined)| {
                let method = probe.method();
                let evidence = match joined {
                    Ok(Ok(evidence)) => {
                        tracing::debug!(
                            %method,
                            positive = evidence.positive,
                            users = evidence.users.len(),
                            "Detection method finished"
                        );
                        Some(evidence)
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(%method, error = %e, "Detection method skipped");
                        None
                    }
                    Err(e) => {
                        tracing::error!(%method, error = %e, "Detection method aborted");
                        None
                    }
                };
                ProbeReport {
                    method,
                    corroborating_only: probe.corroborating_only(),
                    evidence,
                }
            })
            .collect()
    }
}

/// 主要な方法のいずれかが陽性なら `true`。補助的な方法は単独では陽性にしない
fn combine(reports: &[ProbeReport]) -> bool {
    let is_positive = |report: &&ProbeReport| {
        report
            .evidence
            .as_ref()
            .is_some_and(|evidence| evidence.positive)
    };

    let primary = reports
        .iter()
        .filter(|report| !report.corroborating_only)
        .any(|report| is_positive(&report));
    let corroborating: Vec<DetectionMethod> = reports
        .iter()
        .filter(|report| report.corroborating_only)
        .filter(is_positive)
        .map(|report| report.method)
        .collect();

    if !corroborating.is_empty() {
        if primary {
            tracing::debug!(?corroborating, "Detection corroborated");
        } else {
            tracing::info!(
                ?corroborating,
                "Corroborating evidence ignored without a primary signal"
            );
        }
    }

    primary
}

#[async_trait]
impl EvidenceCollector for CompositeEvidenceCollector {
    async fn detect(&self) -> bool {
        combine(&self.gather().await)
    }

    async fn list_users(&self) -> Vec<RemoteUser> {
        let groups = self
            .gather()
            .await
            .into_iter()
            .filter_map(|report| report.evidence)
            .map(|evidence| evidence.users);
        merge_users(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ProbeError,
        infrastructure::probe::{Evidence, MockEvidenceProbe},
    };

    fn user(name: &str, method: DetectionMethod) -> RemoteUser {
        RemoteUser {
            username: name.to_string(),
            session_name: "rdp-tcp#0".to_string(),
            session_id: "2".to_string(),
            state: "Active".to_string(),
            connection_type: RemoteUser::CONNECTION_TYPE.to_string(),
            remote_ip: None,
            local_address: None,
            remote_address: None,
            process_name: None,
            detected_by: method,
        }
    }

    fn probe(
        method: DetectionMethod,
        corroborating_only: bool,
        result: fn() -> Result<Evidence, ProbeError>,
    ) -> Arc<dyn EvidenceProbe> {
        let mut mock = MockEvidenceProbe::new();
        mock.expect_method().return_const(method);
        mock.expect_corroborating_only()
            .return_const(corroborating_only);
        mock.expect_collect().returning(move || result());
        Arc::new(mock)
    }

    fn failing() -> Result<Evidence, ProbeError> {
        Err(ProbeError::Timeout {
            program: "query".to_string(),
            timeout: std::time::Duration::from_secs(5),
        })
    }

    fn negative() -> Result<Evidence, ProbeError> {
        Ok(Evidence::negative())
    }

    fn positive() -> Result<Evidence, ProbeError> {
        Ok(Evidence::from_users(vec![user(
            "alice",
            DetectionMethod::SessionTable,
        )]))
    }

    #[tokio::test]
    async fn test_detect_is_logical_or() {
        // テスト項目: いずれかの方法が陽性なら true になる
        // given (前提条件):
        let collector = CompositeEvidenceCollector::new(vec![
            probe(DetectionMethod::Network, false, negative),
            probe(DetectionMethod::SessionTable, false, positive),
        ]);

        // when (操作):
        let detected = collector.detect().await;

        // then (期待する結果):
        assert!(detected);
    }

    #[tokio::test]
    async fn test_detect_all_negative() {
        // テスト項目: 全ての方法が陰性なら false になる
        // given (前提条件):
        let collector = CompositeEvidenceCollector::new(vec![
            probe(DetectionMethod::Network, false, negative),
            probe(DetectionMethod::Environment, false, negative),
        ]);

        // when (操作):
        let detected = collector.detect().await;

        // then (期待する結果):
        assert!(!detected);
    }

    #[tokio::test]
    async fn test_failed_method_is_skipped() {
        // テスト項目: 失敗した方法はスキップされ、残りの方法で判定される
        // given (前提条件):
        let collector = CompositeEvidenceCollector::new(vec![
            probe(DetectionMethod::Network, false, failing),
            probe(DetectionMethod::SessionTable, false, positive),
        ]);

        // when (操作):
        let detected = collector.detect().await;
        let users = collector.list_users().await;

        // then (期待する結果):
        assert!(detected);
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_all_methods_failing_degrades_to_false() {
        // テスト項目: 全ての方法が失敗しても false と空リストに縮退する
        // given (前提条件):
        let collector = CompositeEvidenceCollector::new(vec![
            probe(DetectionMethod::Network, false, failing),
            probe(DetectionMethod::SessionTable, false, failing),
        ]);

        // when (操作):
        let detected = collector.detect().await;
        let users = collector.list_users().await;

        // then (期待する結果):
        assert!(!detected);
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_method_is_contained() {
        // テスト項目: プローブが panic しても呼び出し側には伝播しない
        // given (前提条件):
        let collector = CompositeEvidenceCollector::new(vec![
            probe(DetectionMethod::Network, false, || panic!("probe exploded")),
            probe(DetectionMethod::SessionTable, false, positive),
        ]);

        // when (操作):
        let detected = collector.detect().await;

        // then (期待する結果):
        assert!(detected);
    }

    #[tokio::test]
    async fn test_corroborating_method_alone_is_not_positive() {
        // テスト項目: 補助的な方法だけが陽性の場合は false になる
        // given (前提条件):
        let collector = CompositeEvidenceCollector::new(vec![
            probe(DetectionMethod::Network, false, negative),
            probe(DetectionMethod::ProcessCensus, true, || {
                Ok(Evidence {
                    positive: true,
                    users: Vec::new(),
                })
            }),
        ]);

        // when (操作):
        let detected = collector.detect().await;

        // then (期待する結果):
        assert!(!detected);
    }

    #[tokio::test]
    async fn test_list_users_deduplicates_across_methods() {
        // テスト項目: 複数の方法で検出された同じユーザーは一件にまとめられる
        // given (前提条件):
        let collector = CompositeEvidenceCollector::new(vec![
            probe(DetectionMethod::SessionTable, false, positive),
            probe(DetectionMethod::Environment, false, || {
                Ok(Evidence::from_users(vec![
                    user("ALICE", DetectionMethod::Environment),
                    user("carol", DetectionMethod::Environment),
                ]))
            }),
        ]);

        // when (操作):
        let users = collector.list_users().await;

        // then (期待する結果):
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].detected_by, DetectionMethod::SessionTable);
        assert_eq!(users[1].username, "carol");
    }

    #[test]
    fn test_from_config_builds_configured_methods() {
        // テスト項目: 設定に従ってプローブが構築される
        // given (前提条件):
        let config = MonitorConfig::default();

        // when (操作):
        let collector = CompositeEvidenceCollector::from_config(&config);

        // then (期待する結果):
        assert_eq!(collector.methods(), MonitorConfig::default_methods());
    }
}
