//! UseCase layer
//!
//! 一つの操作につき一つのユースケースを定義します。
//!
//! - `UpdateStatusUseCase`: 確認付きの定期更新（update）
//! - `ForceCheckUseCase`: 確認なしの即時更新（forceCheck）
//! - `GetStatusUseCase`: 状態と最新のユーザー一覧の取得（snapshot）
//! - `GetHistoryUseCase`: 保持している履歴の取得
//! - `ListRemoteUsersUseCase`: 状態に依存しないユーザー一覧の取得

mod force_check;
mod get_history;
mod get_status;
mod list_remote_users;
mod update_status;

pub use force_check::ForceCheckUseCase;
pub use get_history::GetHistoryUseCase;
pub use get_status::GetStatusUseCase;
pub use list_remote_users::{ListRemoteUsersUseCase, RemoteUserList};
pub use update_status::UpdateStatusUseCase;
