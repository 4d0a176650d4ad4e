//! Infrastructure layer
//!
//! ドメイン層が定義する trait の具体的な実装を提供します。
//!
//! - `command`: 外部コマンドの実行（タイムアウト付き）
//! - `parser`: 各コマンド出力のパーサー
//! - `probe`: 検出方法ごとの証拠収集
//! - `collector`: 検出方法を束ねる EvidenceCollector 実装
//! - `repository`: ConnectionStateRepository のインメモリ実装
//! - `dto`: HTTP レスポンス DTO

pub mod collector;
pub mod command;
pub mod dto;
pub mod parser;
pub mod probe;
pub mod repository;

pub use collector::CompositeEvidenceCollector;
pub use command::{CommandRunner, SystemCommandRunner};
pub use repository::InMemoryConnectionStateRepository;
