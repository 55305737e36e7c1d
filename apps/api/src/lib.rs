//! # Taskboard API サーバー
//!
//! タスクを PostgreSQL に保存する最小構成の HTTP サービス。
//!
//! ## 構成
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Client    │────▶│ taskboard-  │────▶│ PostgreSQL  │
//! │ (curl 等)   │     │ api (5000)  │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! リクエストごとに新しい DB 接続を開き、レスポンスを返す前に必ず閉じる。
//!
//! ## モジュール構成
//!
//! - [`app`] - ルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//!
//! ## 依存関係
//!
//! - `taskboard_domain`: タスクと入力検証
//! - `taskboard_infra`: PostgreSQL 接続とリポジトリ
//! - `taskboard_shared`: レスポンス形式とトレーシング初期化

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
