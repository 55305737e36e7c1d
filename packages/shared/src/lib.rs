//! # Taskboard 共有ユーティリティ
//!
//! HTTP レスポンスの形式とトレーシング初期化を提供する。
//!
//! ## 設計方針
//!
//! - domain / infra には依存しない
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は api クレートの責務）

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod observability;

pub use api_response::{ApiResponse, ResponseStatus};
pub use error_response::ErrorResponse;
pub use health::HealthResponse;
