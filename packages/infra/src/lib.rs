//! # Taskboard インフラ層
//!
//! PostgreSQL との接続・通信を担当する。
//!
//! ## 責務
//!
//! - **接続ファクトリ**: リクエストごとに新しい接続を開き、必ず解放する
//! - **リポジトリ実装**: tasks テーブルへの SELECT / INSERT / DDL
//!
//! 接続プールは持たない。1 リクエスト = 1 接続で、接続がリクエストを
//! またいで再利用されることはない。
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続設定と接続ファクトリ
//! - [`error`] - インフラ層エラー定義
//! - `mock` - テスト用インメモリリポジトリ（`test-utils` feature）
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use taskboard_infra::{
//!     db::{DatabaseConfig, PgConnectionFactory},
//!     repository::{PostgresTaskRepository, TaskRepository},
//! };
//!
//! let factory = PgConnectionFactory::new(&DatabaseConfig::default());
//! let repository = PostgresTaskRepository::new(factory);
//! let tasks = repository.list_tasks().await?;
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
