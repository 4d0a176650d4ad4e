//! UseCase: 履歴取得

use std::sync::Arc;

use crate::domain::{ConnectionStateRepository, HistoryEntry};

/// 履歴取得のユースケース
pub struct GetHistoryUseCase {
    repository: Arc<dyn ConnectionStateRepository>,
}

impl GetHistoryUseCase {
    /// 新しい GetHistoryUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionStateRepository>) -> Self {
        Self { repository }
    }

    /// 保持している全ての履歴を古い順に返す
    pub async fn execute(&self) -> Vec<HistoryEntry> {
        self.repository.get_history().await
    }
}
