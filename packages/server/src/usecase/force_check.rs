//! UseCase: 即時ステータス確認
//!
//! 確認待ちを経ずに一回の検出結果をそのまま確定します。
//! 利用者が「今すぐ確認」を求めた場合に使い、誤検知のリスクを即時性と引き換えに受け入れます。

use std::sync::Arc;

use rdpwatch_shared::time::Clock;

use crate::domain::{
    ConnectionStateRepository, ConnectionStatus, EvidenceCollector, Timestamp, UpdateOutcome,
};

/// 即時ステータス確認のユースケース
pub struct ForceCheckUseCase {
    collector: Arc<dyn EvidenceCollector>,
    repository: Arc<dyn ConnectionStateRepository>,
    clock: Arc<dyn Clock>,
}

impl ForceCheckUseCase {
    /// 新しい ForceCheckUseCase を作成
    pub fn new(
        collector: Arc<dyn EvidenceCollector>,
        repository: Arc<dyn ConnectionStateRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            collector,
            repository,
            clock,
        }
    }

    /// 即時確認を実行
    pub async fn execute(&self) -> UpdateOutcome {
        let status = ConnectionStatus::from_detected(self.collector.detect().await);
        let now = Timestamp::new(self.clock.now_millis());

        if self.repository.commit(status, now).await {
            tracing::info!(status = %status, "Remote desktop status changed by forced check");
            UpdateOutcome::Committed(status)
        } else {
            UpdateOutcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockEvidenceCollector,
        infrastructure::repository::InMemoryConnectionStateRepository,
    };
    use rdpwatch_shared::time::FixedClock;

    fn collector_returning(detected: bool) -> Arc<MockEvidenceCollector> {
        let mut mock = MockEvidenceCollector::new();
        mock.expect_detect().times(1).return_const(detected);
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_force_check_commits_without_confirmation() {
        // テスト項目: 一回の検出で遷移が確定し、履歴が一件追加される
        // given (前提条件): 初期状態は未接続
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let usecase = ForceCheckUseCase::new(
            collector_returning(true),
            repository.clone(),
            Arc::new(FixedClock::new(1234)),
        );

        // when (操作):
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, UpdateOutcome::Committed(ConnectionStatus::Connected));
        let state = repository.get_state().await;
        assert!(state.is_connected());
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.last_checked_at, Some(Timestamp::new(1234)));
    }

    #[tokio::test]
    async fn test_force_check_same_status_adds_no_history() {
        // テスト項目: 状態が変わらなければ履歴は追加されず、確認時刻のみ更新される
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let usecase = ForceCheckUseCase::new(
            collector_returning(false),
            repository.clone(),
            Arc::new(FixedClock::new(55)),
        );

        // when (操作):
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, UpdateOutcome::Unchanged);
        let state = repository.get_state().await;
        assert!(state.history.is_empty());
        assert_eq!(state.last_checked_at, Some(Timestamp::new(55)));
    }
}
