//! # ヘルスチェックハンドラ
//!
//! プロセスの稼働状態を確認するためのエンドポイント。
//!
//! ## 用途
//!
//! - **コンテナオーケストレーター**: Kubernetes の liveness probe
//! - **監視システム**: 外部監視サービスからの死活監視
//!
//! データベースには接続しないため、DB 障害中も 200 を返す。
//! DB の疎通確認は `GET /db-test` で行う。
//!
//! ## レスポンス例
//!
//! ```json
//! { "status": "healthy" }
//! ```

use axum::Json;
use taskboard_shared::HealthResponse;

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
