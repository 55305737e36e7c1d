//! # API エラーハンドリング
//!
//! ハンドラから返るエラーと、`{ "status": "error", "message": "..." }` 形式の
//! HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / JSON パース失敗  →  ApiError::Validation  →  400
//! InfraError（接続・クエリ）     →  ApiError::Database    →  500
//! ```
//!
//! DB 障害時のメッセージには原因のテキストをそのまま埋め込む
//! （例: `"Failed to retrieve tasks: connection refused"`）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskboard_domain::DomainError;
use taskboard_infra::InfraError;
use taskboard_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストが不正（400 Bad Request）
    ///
    /// メッセージはそのままクライアントに返る。
    #[error("{0}")]
    Validation(String),

    /// データベース操作の失敗（500 Internal Server Error）
    ///
    /// `context` はエンドポイントごとの接頭辞（例: `"Failed to create task"`）。
    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source:  InfraError,
    },

    /// ルートが存在しない（404 Not Found）
    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    /// DB エラーに文脈を付けて包む
    pub fn database(context: &'static str) -> impl FnOnce(InfraError) -> Self {
        move |source| Self::Database { context, source }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.message().to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
            ApiError::Database { context, source } => {
                tracing::error!(
                    error = %source,
                    span_trace = %source.span_trace(),
                    "{context}"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_cause(context, &source),
                )
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::new("Not Found")),
        };

        (status, Json(body)).into_response()
    }
}
