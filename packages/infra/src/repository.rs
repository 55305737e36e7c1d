//! # リポジトリ実装
//!
//! - **依存性逆転**: ハンドラはトレイト経由でリポジトリを使う
//! - **テスタビリティ**: ハンドラのテストでは `mock::MockTaskRepository` に差し替える

pub mod task_repository;

pub use task_repository::{PostgresTaskRepository, SEED_TASKS, TaskRepository};
