//! InMemory ConnectionState Repository 実装
//!
//! ドメイン層が定義する ConnectionStateRepository trait の具体的な実装。
//! 永続化は行わず、プロセスの生存期間中だけ状態を保持します。
//!
//! 全ての読み書きは単一の Mutex で直列化されます。
//! ステータス更新・履歴追加・上限超過分の削除は一つのロック区間で行われるため、
//! 読み手が遷移の途中状態を観測することはありません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionState, ConnectionStateRepository, ConnectionStatus, HistoryEntry, Timestamp,
};

/// インメモリ ConnectionState Repository 実装
pub struct InMemoryConnectionStateRepository {
    /// ConnectionState ドメインモデル
    state: Arc<Mutex<ConnectionState>>,
}

impl InMemoryConnectionStateRepository {
    /// 新しい InMemoryConnectionStateRepository を作成
    pub fn new(state: Arc<Mutex<ConnectionState>>) -> Self {
        Self { state }
    }
}

impl Default for InMemoryConnectionStateRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(ConnectionState::new())))
    }
}

#[async_trait]
impl ConnectionStateRepository for InMemoryConnectionStateRepository {
    async fn get_state(&self) -> ConnectionState {
        let state = self.state.lock().await;
        state.clone()
    }

    async fn current_status(&self) -> ConnectionStatus {
        let state = self.state.lock().await;
        state.status
    }

    async fn mark_checked(&self, at: Timestamp) {
        let mut state = self.state.lock().await;
        state.mark_checked(at);
    }

    async fn commit(&self, status: ConnectionStatus, at: Timestamp) -> bool {
        let mut state = self.state.lock().await;
        state.commit(status, at)
    }

    async fn get_history(&self) -> Vec<HistoryEntry> {
        let state = self.state.lock().await;
        state.history.entries()
    }
}
