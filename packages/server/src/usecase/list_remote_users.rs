//! UseCase: リモートユーザー一覧取得
//!
//! トラッカーの状態とは独立に、その場でユーザー一覧を収集します。

use std::sync::Arc;

use rdpwatch_shared::time::Clock;

use crate::domain::{EvidenceCollector, RemoteUser, Timestamp};

/// 問い合わせ時刻付きのユーザー一覧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUserList {
    pub users: Vec<RemoteUser>,
    pub queried_at: Timestamp,
}

/// リモートユーザー一覧取得のユースケース
pub struct ListRemoteUsersUseCase {
    collector: Arc<dyn EvidenceCollector>,
    clock: Arc<dyn Clock>,
}

impl ListRemoteUsersUseCase {
    /// 新しい ListRemoteUsersUseCase を作成
    pub fn new(collector: Arc<dyn EvidenceCollector>, clock: Arc<dyn Clock>) -> Self {
        Self { collector, clock }
    }

    pub async fn execute(&self) -> RemoteUserList {
        let users = self.collector.list_users().await;
        RemoteUserList {
            users,
            queried_at: Timestamp::new(self.clock.now_millis()),
        }
    }
}
