//! Server state shared by the HTTP handlers.

use std::sync::Arc;

use crate::{
    domain::Locale,
    usecase::{
        ForceCheckUseCase, GetHistoryUseCase, GetStatusUseCase, ListRemoteUsersUseCase,
        UpdateStatusUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// UpdateStatusUseCase（確認付き更新のユースケース）
    pub update_status_usecase: Arc<UpdateStatusUseCase>,
    /// ForceCheckUseCase（即時確認のユースケース）
    pub force_check_usecase: Arc<ForceCheckUseCase>,
    /// GetStatusUseCase（スナップショット取得のユースケース）
    pub get_status_usecase: Arc<GetStatusUseCase>,
    /// GetHistoryUseCase（履歴取得のユースケース）
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    /// ListRemoteUsersUseCase（ユーザー一覧取得のユースケース）
    pub list_remote_users_usecase: Arc<ListRemoteUsersUseCase>,
    /// Language of status phrases in responses
    pub locale: Locale,
}
