//! Domain layer
//!
//! 接続状態のモデルと、それに対するルールを定義します。
//!
//! - `value_object`: Timestamp, ConnectionStatus, Locale, DetectionMethod
//! - `entity`: ConnectionState, ConnectionHistory, HistoryEntry, RemoteUser
//! - `transition`: 確認付き状態遷移の純粋関数
//! - `collector` / `repository`: Infrastructure 層が実装する trait（依存性の逆転）

pub mod collector;
pub mod entity;
pub mod error;
pub mod repository;
pub mod transition;
pub mod value_object;

pub use collector::EvidenceCollector;
pub use entity::{
    ConnectionHistory, ConnectionState, HISTORY_CAPACITY, HistoryEntry, RemoteUser,
    StatusSnapshot, merge_users,
};
pub use error::{ParseVariantError, ProbeError};
pub use repository::ConnectionStateRepository;
pub use transition::{Evaluation, Resolution, UpdateOutcome};
pub use value_object::{ConnectionStatus, DetectionMethod, Locale, Timestamp};

#[cfg(test)]
pub use collector::MockEvidenceCollector;
