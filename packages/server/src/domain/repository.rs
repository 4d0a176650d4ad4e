//! Repository trait 定義
//!
//! 接続状態の保存先へのインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use async_trait::async_trait;

use super::{ConnectionState, ConnectionStatus, HistoryEntry, Timestamp};

/// ConnectionState Repository trait
///
/// 各メソッドは一つのロック区間で完結し、読み手が遷移の途中状態を見ることはない。
#[async_trait]
pub trait ConnectionStateRepository: Send + Sync {
    /// 現在の状態のスナップショットを取得
    async fn get_state(&self) -> ConnectionState;

    /// 確定済みのステータスを取得
    async fn current_status(&self) -> ConnectionStatus;

    /// 最終確認時刻のみを更新
    async fn mark_checked(&self, at: Timestamp);

    /// ステータスを確定する（変化した場合は履歴追加と上限超過分の削除も同時に行う）
    ///
    /// 変化があった場合に `true` を返す
    async fn commit(&self, status: ConnectionStatus, at: Timestamp) -> bool;

    /// 保持している全ての履歴を古い順に取得
    async fn get_history(&self) -> Vec<HistoryEntry>;
}
