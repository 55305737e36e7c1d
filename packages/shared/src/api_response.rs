//! # API レスポンスエンベロープ
//!
//! 成功レスポンスの統一形式 `{ "status": "success", ...payload }` を提供する。
//!
//! ペイロードのフィールドは `status` と同じ階層に展開される（`#[serde(flatten)]`）。
//! たとえばタスク一覧は `{ "status": "success", "tasks": [...] }` になる。

use serde::{Deserialize, Serialize};

/// レスポンスの処理結果
///
/// すべての JSON レスポンスの `status` フィールドに入る値。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// 処理成功
    Success,
    /// 処理失敗（[`ErrorResponse`](crate::ErrorResponse) で使用）
    Error,
}

/// 成功レスポンスの統一型
///
/// ## 使用例
///
/// ```
/// use serde::Serialize;
/// use taskboard_shared::ApiResponse;
///
/// #[derive(Serialize)]
/// struct Version {
///     version: String,
/// }
///
/// let response = ApiResponse::success(Version {
///     version: "PostgreSQL 16.2".to_string(),
/// });
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["status"], "success");
/// assert_eq!(json["version"], "PostgreSQL 16.2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(flatten)]
    pub body:   T,
}

impl<T> ApiResponse<T> {
    /// `status: "success"` のレスポンスを作成する
    pub fn success(body: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            body,
        }
    }
}
