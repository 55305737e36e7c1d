//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターン:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: 接続エラーとクエリエラーの区別
//!
//! ## メッセージ
//!
//! `Display` は原因（`sqlx::Error`）のテキストをそのまま出力する。
//! API 層は `"Failed to retrieve tasks: {error}"` のように文脈を付けて
//! クライアントに返すため、ここでは接頭辞を付けない。

use std::{fmt, time::Duration};

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// `From<sqlx::Error>` やコンストラクタで生成した時点のスパン情報を
/// [`SpanTrace`] として保持する。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 接続エラー
    ///
    /// ホスト到達不可、認証失敗、データベースが存在しないなど。
    #[error("{0}")]
    Connection(#[source] sqlx::Error),

    /// 接続確立がタイムアウトした
    #[error("connection timed out after {}s", .0.as_secs())]
    ConnectTimeout(Duration),

    /// クエリエラー
    ///
    /// SQL の実行失敗、制約違反、行のデコード失敗など。
    #[error("{0}")]
    Query(#[source] sqlx::Error),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 接続段階で失敗したかどうか
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self.kind,
            InfraErrorKind::Connection(_) | InfraErrorKind::ConnectTimeout(_)
        )
    }

    /// 接続エラーを生成する
    pub fn connection(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Connection(source),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 接続タイムアウトエラーを生成する
    pub fn connect_timeout(timeout: Duration) -> Self {
        Self {
            kind:       InfraErrorKind::ConnectTimeout(timeout),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

// 接続確立後の sqlx::Error はすべてクエリエラーとして扱う。
// 接続確立時のエラーは db モジュールが InfraError::connection で明示的に包む。
impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Query(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
