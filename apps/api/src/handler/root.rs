//! # ルートハンドラ
//!
//! サービス名と稼働状態を返す。DB にはアクセスしない。

use axum::Json;
use serde::{Deserialize, Serialize};

/// `GET /` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    pub status:  String,
}

/// サービス情報エンドポイント
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Welcome to Taskboard".to_string(),
        status:  "running".to_string(),
    })
}
