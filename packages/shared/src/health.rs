//! # ヘルスチェック共通型

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// liveness probe 用。DB の状態は含めない。
///
/// ```
/// use taskboard_shared::HealthResponse;
///
/// let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
/// assert_eq!(json, r#"{"status":"healthy"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（常に `"healthy"`）
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
