//! UseCase: 状態スナップショット取得
//!
//! 確定済みの状態に、その場で取り直したユーザー一覧を添えて返します。
//! ユーザー一覧はキャッシュしないため、呼び出しごとに収集が走ります。

use std::sync::Arc;

use crate::domain::{ConnectionStateRepository, EvidenceCollector, StatusSnapshot};

/// 状態スナップショット取得のユースケース
pub struct GetStatusUseCase {
    collector: Arc<dyn EvidenceCollector>,
    repository: Arc<dyn ConnectionStateRepository>,
}

impl GetStatusUseCase {
    /// 新しい GetStatusUseCase を作成
    pub fn new(
        collector: Arc<dyn EvidenceCollector>,
        repository: Arc<dyn ConnectionStateRepository>,
    ) -> Self {
        Self {
            collector,
            repository,
        }
    }

    /// スナップショット取得を実行（状態は変更しない）
    pub async fn execute(&self) -> StatusSnapshot {
        let users = self.collector.list_users().await;
        let state = self.repository.get_state().await;
        StatusSnapshot { state, users }
    }
}
