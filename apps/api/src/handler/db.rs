//! # データベース操作ハンドラ
//!
//! 疎通確認とスキーマ初期化のエンドポイント。
//!
//! - `GET /db-test`: `SELECT version()` を実行してサーバーのバージョンを返す
//! - `GET /init-db`: tasks テーブルを作成し、サンプルタスクを 3 件挿入する
//!
//! `/init-db` は冪等ではない。呼ぶたびにサンプルタスクが追加される。

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use taskboard_infra::repository::TaskRepository;
use taskboard_shared::ApiResponse;

use super::TaskState;
use crate::error::ApiError;

/// `GET /db-test` のペイロード
#[derive(Debug, Serialize, Deserialize)]
pub struct DbTestBody {
    pub message: String,
    pub version: String,
}

/// `GET /init-db` のペイロード
#[derive(Debug, Serialize, Deserialize)]
pub struct InitDbBody {
    pub message: String,
}

/// GET /db-test
#[tracing::instrument(skip_all)]
pub async fn db_test<R>(
    State(state): State<Arc<TaskState<R>>>,
) -> Result<Json<ApiResponse<DbTestBody>>, ApiError>
where
    R: TaskRepository,
{
    let version = state
        .repository
        .fetch_version()
        .await
        .map_err(ApiError::database("Database connection failed"))?;

    Ok(Json(ApiResponse::success(DbTestBody {
        message: "Database connection successful".to_string(),
        version,
    })))
}

/// GET /init-db
#[tracing::instrument(skip_all)]
pub async fn init_db<R>(
    State(state): State<Arc<TaskState<R>>>,
) -> Result<Json<ApiResponse<InitDbBody>>, ApiError>
where
    R: TaskRepository,
{
    state
        .repository
        .ensure_schema_and_seed()
        .await
        .map_err(ApiError::database("Database initialization failed"))?;

    tracing::info!("データベースを初期化しました");

    Ok(Json(ApiResponse::success(InitDbBody {
        message: "Database initialized with sample data".to_string(),
    })))
}
