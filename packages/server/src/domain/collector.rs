//! EvidenceCollector trait 定義
//!
//! リモートデスクトップ接続の証拠を集める外部コラボレーターへのインターフェース。
//! 具体的な実装（コマンド実行、出力パース）は Infrastructure 層が提供します。

use async_trait::async_trait;

use super::entity::RemoteUser;

/// Evidence Collector trait
///
/// 実装は失敗を呼び出し側に伝播してはいけません。
/// 検出方法ごとの失敗は「証拠なし」として扱います。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvidenceCollector: Send + Sync {
    /// いずれかの検出方法が陽性なら `true`（論理和）
    async fn detect(&self) -> bool;

    /// 現在のリモートユーザー / 接続の一覧（重複除去済み）
    async fn list_users(&self) -> Vec<RemoteUser>;
}
