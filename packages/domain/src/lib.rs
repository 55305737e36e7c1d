//! # Taskboard ドメイン層
//!
//! タスク（Task）エンティティと、その生成時に守るべきルールを定義する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層は DB や HTTP を知らない。永続化は infra 層、
//! レスポンス整形は api 層の責務とする。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層エラー定義
//! - [`task`] - タスクエンティティと生成用の値オブジェクト

pub mod error;
pub mod task;

pub use error::DomainError;
