//! UseCase: 確認付きステータス更新
//!
//! ## 状態遷移
//!
//! 1. 検出結果が確定済みのステータスと同じ → 確認時刻のみ更新
//! 2. 異なる → 確認待ち。一定時間待ってから再検出する
//!    - 再検出が一致 → 確定（ステータス更新 + 履歴追加）
//!    - 不一致 → ノイズとして破棄（確認時刻のみ更新）
//!
//! 確認待ちの状態は外部から観測できません。待機中もロックは保持しないため、
//! 読み手は常に遷移前か遷移後の状態だけを見ます。

use std::{sync::Arc, time::Duration};

use rdpwatch_shared::time::Clock;

use crate::domain::{
    ConnectionStateRepository, ConnectionStatus, EvidenceCollector, Evaluation, Resolution,
    Timestamp, UpdateOutcome,
    transition::{evaluate, resolve},
};

/// 確認付きステータス更新のユースケース
pub struct UpdateStatusUseCase {
    collector: Arc<dyn EvidenceCollector>,
    repository: Arc<dyn ConnectionStateRepository>,
    clock: Arc<dyn Clock>,
    /// 一回目と二回目の検出の間隔
    confirm_delay: Duration,
}

impl UpdateStatusUseCase {
    /// 新しい UpdateStatusUseCase を作成
    pub fn new(
        collector: Arc<dyn EvidenceCollector>,
        repository: Arc<dyn ConnectionStateRepository>,
        clock: Arc<dyn Clock>,
        confirm_delay: Duration,
    ) -> Self {
        Self {
            collector,
            repository,
            clock,
            confirm_delay,
        }
    }

    /// ステータス更新を実行
    ///
    /// 失敗することはなく、常に有効な（変化しないこともある）状態を残す
    pub async fn execute(&self) -> UpdateOutcome {
        let current = self.repository.current_status().await;
        let candidate = ConnectionStatus::from_detected(self.collector.detect().await);

        let candidate = match evaluate(current, candidate) {
            Evaluation::Steady => {
                self.repository.mark_checked(self.now()).await;
                return UpdateOutcome::Unchanged;
            }
            Evaluation::Pending(candidate) => candidate,
        };

        tracing::debug!(
            from = %current,
            to = %candidate,
            delay_ms = self.confirm_delay.as_millis() as u64,
            "Status change pending confirmation"
        );
        if !self.confirm_delay.is_zero() {
            tokio::time::sleep(self.confirm_delay).await;
        }
        let confirmed = ConnectionStatus::from_detected(self.collector.detect().await);

        match resolve(candidate, confirmed) {
            Resolution::Confirm(status) => {
                if self.repository.commit(status, self.now()).await {
                    tracing::info!(status = %status, "Remote desktop status changed");
                    UpdateOutcome::Committed(status)
                } else {
                    // A concurrent forced check already committed this status.
                    UpdateOutcome::Unchanged
                }
            }
            Resolution::Discard => {
                tracing::warn!(
                    candidate = %candidate,
                    confirmed = %confirmed,
                    "Status change not confirmed, treating as noise"
                );
                self.repository.mark_checked(self.now()).await;
                UpdateOutcome::Discarded(candidate)
            }
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{HISTORY_CAPACITY, MockEvidenceCollector},
        infrastructure::repository::InMemoryConnectionStateRepository,
    };
    use rdpwatch_shared::time::FixedClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 二回の検出が一致した場合のみ遷移が確定すること
    // - 不一致の場合は破棄され、確認時刻だけが更新されること
    // - 同じ状態の継続では履歴が追加されないこと
    // - 履歴の上限が守られること
    // ========================================

    /// 検出結果を順番に返すモックを作成
    fn scripted_collector(sequence: Vec<bool>) -> Arc<MockEvidenceCollector> {
        let mut detections = sequence.into_iter();
        let mut mock = MockEvidenceCollector::new();
        mock.expect_detect()
            .returning(move || detections.next().expect("detect called too often"));
        mock.expect_list_users().returning(Vec::new);
        Arc::new(mock)
    }

    fn create_usecase(
        collector: Arc<MockEvidenceCollector>,
        repository: Arc<InMemoryConnectionStateRepository>,
        now: i64,
    ) -> UpdateStatusUseCase {
        UpdateStatusUseCase::new(
            collector,
            repository,
            Arc::new(FixedClock::new(now)),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_steady_detection_only_refreshes_check_time() {
        // テスト項目: 状態が変わらなければ確認時刻のみ更新される
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let usecase = create_usecase(scripted_collector(vec![false]), repository.clone(), 500);

        // when (操作):
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, UpdateOutcome::Unchanged);
        let state = repository.get_state().await;
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert_eq!(state.last_checked_at, Some(Timestamp::new(500)));
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_transition_is_committed() {
        // テスト項目: 二回の検出が一致すると遷移が確定し、履歴が一件追加される
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let usecase = create_usecase(scripted_collector(vec![true, true]), repository.clone(), 1000);

        // when (操作):
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, UpdateOutcome::Committed(ConnectionStatus::Connected));
        let state = repository.get_state().await;
        assert!(state.is_connected());
        assert_eq!(state.history.len(), 1);
        assert_eq!(
            state.history.last().map(|e| e.status),
            Some(ConnectionStatus::Connected)
        );
    }

    #[tokio::test]
    async fn test_unconfirmed_transition_is_discarded() {
        // テスト項目: 確認の検出が一致しなければ破棄され、確認時刻は更新される
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let usecase = create_usecase(scripted_collector(vec![true, false]), repository.clone(), 2000);

        // when (操作):
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, UpdateOutcome::Discarded(ConnectionStatus::Connected));
        let state = repository.get_state().await;
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert_eq!(state.last_checked_at, Some(Timestamp::new(2000)));
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_connect_then_stay_connected() {
        // テスト項目: 検出列 [false, true, true, true] で二回目の tick に一度だけ遷移する
        // given (前提条件): tick 2 の確認検出も true
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let usecase = create_usecase(
            scripted_collector(vec![false, true, true, true, true]),
            repository.clone(),
            3000,
        );

        // when (操作):
        let outcomes = vec![
            usecase.execute().await,
            usecase.execute().await,
            usecase.execute().await,
            usecase.execute().await,
        ];

        // then (期待する結果):
        assert_eq!(
            outcomes,
            vec![
                UpdateOutcome::Unchanged,
                UpdateOutcome::Committed(ConnectionStatus::Connected),
                UpdateOutcome::Unchanged,
                UpdateOutcome::Unchanged,
            ]
        );
        let state = repository.get_state().await;
        assert!(state.is_connected());
        assert_eq!(state.history.len(), 1);
    }

    #[tokio::test]
    async fn test_scenario_flap_is_ignored() {
        // テスト項目: 検出列 [false, true, false] では状態が変わらず履歴も追加されない
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let collector = scripted_collector(vec![false, true, false]);

        // when (操作):
        let first = create_usecase(collector.clone(), repository.clone(), 10)
            .execute()
            .await;
        let after_first = repository.get_state().await.last_checked_at;
        let second = create_usecase(collector, repository.clone(), 20)
            .execute()
            .await;

        // then (期待する結果):
        assert_eq!(first, UpdateOutcome::Unchanged);
        assert_eq!(after_first, Some(Timestamp::new(10)));
        assert_eq!(second, UpdateOutcome::Discarded(ConnectionStatus::Connected));
        let state = repository.get_state().await;
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert_eq!(state.last_checked_at, Some(Timestamp::new(20)));
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_history_at_capacity_evicts_oldest() {
        // テスト項目: 履歴が上限のときに遷移が確定すると最古のエントリが削除される
        // given (前提条件): 50 件の履歴があり、最後のステータスは Disconnected
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        for i in 0..HISTORY_CAPACITY as i64 {
            let status = ConnectionStatus::from_detected(i % 2 == 0);
            repository.commit(status, Timestamp::new(i)).await;
        }
        assert_eq!(repository.get_history().await.len(), HISTORY_CAPACITY);
        let usecase = create_usecase(scripted_collector(vec![true, true]), repository.clone(), 9999);

        // when (操作):
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, UpdateOutcome::Committed(ConnectionStatus::Connected));
        let history = repository.get_history().await;
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history[0].timestamp, Timestamp::new(1));
        assert_eq!(history.last().map(|e| e.timestamp), Some(Timestamp::new(9999)));
    }

    #[tokio::test]
    async fn test_confirmation_waits_for_delay() {
        // テスト項目: 確認待ちの間は設定した時間だけ待機する
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let usecase = UpdateStatusUseCase::new(
            scripted_collector(vec![true, true]),
            repository,
            Arc::new(FixedClock::new(0)),
            Duration::from_millis(50),
        );

        // when (操作):
        let started = std::time::Instant::now();
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, UpdateOutcome::Committed(ConnectionStatus::Connected));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
