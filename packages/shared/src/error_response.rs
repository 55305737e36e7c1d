//! # エラーレスポンス
//!
//! 全エンドポイント共通のエラー形式 `{ "status": "error", "message": "..." }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - HTTP ステータスコードはボディに含めない（レスポンスヘッダで表現する）
//! - `message` は人間可読な説明。DB 障害時は原因のテキストを埋め込む

use serde::{Deserialize, Serialize};

use crate::ResponseStatus;

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status:  ResponseStatus,
    pub message: String,
}

impl ErrorResponse {
    /// `status: "error"` のレスポンスを作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status:  ResponseStatus::Error,
            message: message.into(),
        }
    }

    /// 原因を埋め込んだメッセージでレスポンスを作成する
    ///
    /// `"{context}: {cause}"` 形式になる。
    pub fn with_cause(context: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(format!("{context}: {cause}"))
    }
}
