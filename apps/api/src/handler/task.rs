//! # タスク API ハンドラ
//!
//! タスクの一覧取得と作成を行う。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 成功 | 失敗 |
//! |----------|------|------|------|
//! | GET | `/tasks` | 200 `{ status, tasks }` | 500 |
//! | POST | `/tasks` | 201 `{ status, message, task }` | 400 / 500 |
//!
//! POST のボディは検証してから DB に接続する。
//! 不正なボディや title 未入力では接続を開かない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use taskboard_domain::task::{NewTask, Task};
use taskboard_infra::repository::TaskRepository;
use taskboard_shared::ApiResponse;

use crate::error::ApiError;

/// タスク関連ハンドラの State
///
/// `/db-test` と `/init-db` も同じリポジトリを使う。
pub struct TaskState<R> {
    pub repository: R,
}

// --- リクエスト / レスポンス型 ---

/// タスク作成リクエスト
///
/// 検証は [`NewTask::new`] に任せるため、ここでは両方とも任意にしておく。
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub title:       Option<String>,
    pub description: Option<String>,
}

/// タスク DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id:          i32,
    pub title:       String,
    pub description: Option<String>,
    pub created_at:  Option<NaiveDateTime>,
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id:          task.id().as_i32(),
            title:       task.title().to_string(),
            description: task.description().map(str::to_string),
            created_at:  task.created_at(),
        }
    }
}

/// `GET /tasks` のペイロード
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListBody {
    pub tasks: Vec<TaskDto>,
}

/// `POST /tasks` のペイロード
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedTaskBody {
    pub message: String,
    pub task:    TaskDto,
}

// --- ハンドラ ---

/// GET /tasks
///
/// 全タスクを id 昇順で返す。
#[tracing::instrument(skip_all)]
pub async fn list_tasks<R>(
    State(state): State<Arc<TaskState<R>>>,
) -> Result<Json<ApiResponse<TaskListBody>>, ApiError>
where
    R: TaskRepository,
{
    let tasks = state
        .repository
        .list_tasks()
        .await
        .map_err(ApiError::database("Failed to retrieve tasks"))?;

    Ok(Json(ApiResponse::success(TaskListBody {
        tasks: tasks.iter().map(TaskDto::from).collect(),
    })))
}

/// POST /tasks
///
/// ## エラー
///
/// - 400: JSON として解釈できない、または title が未入力・空白のみ
/// - 500: DB 接続・INSERT の失敗
#[tracing::instrument(skip_all)]
pub async fn create_task<R>(
    State(state): State<Arc<TaskState<R>>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedTaskBody>>), ApiError>
where
    R: TaskRepository,
{
    let Json(req) = body.map_err(|rejection| {
        ApiError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;
    let new_task = NewTask::new(req.title, req.description)?;

    let task = state
        .repository
        .insert_task(&new_task)
        .await
        .map_err(ApiError::database("Failed to create task"))?;

    tracing::info!(task_id = %task.id(), "タスクを作成しました");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreatedTaskBody {
            message: "Task created successfully".to_string(),
            task:    TaskDto::from(&task),
        })),
    ))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, header},
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};
    use taskboard_infra::mock::MockTaskRepository;
    use tower::ServiceExt;

    use super::*;
    use crate::app::router;

    fn post_tasks(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/tasks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_tasks() -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri("/tasks")
            .body(Body::empty())
            .unwrap()
    }

    async fn send(sut: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = sut.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    // --- POST /tasks ---

    #[tokio::test]
    async fn test_create_task_titleとdescriptionを指定すると201で作成したタスクを返す() {
        // Given
        let repo = MockTaskRepository::new();
        let sut = router(repo.clone());

        // When
        let (status, json) = send(
            sut,
            post_tasks(r#"{"title": "Write report", "description": "Quarterly numbers"}"#),
        )
        .await;

        // Then
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Task created successfully");
        assert_eq!(json["task"]["id"], 1);
        assert_eq!(json["task"]["title"], "Write report");
        assert_eq!(json["task"]["description"], "Quarterly numbers");
        assert!(json["task"]["created_at"].is_string());
        assert_eq!(repo.tasks().len(), 1);
    }

    #[tokio::test]
    async fn test_create_task_descriptionを省略すると空文字で保存される() {
        let sut = router(MockTaskRepository::new());

        let (status, json) = send(sut, post_tasks(r#"{"title": "Buy milk"}"#)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["task"]["title"], "Buy milk");
        assert_eq!(json["task"]["description"], "");
        assert!(json["task"]["id"].as_i64().unwrap() > 0);
    }

    #[rstest]
    #[case::titleなし(r#"{"description": "no title"}"#)]
    #[case::空文字(r#"{"title": ""}"#)]
    #[case::空白のみ(r#"{"title": "   "}"#)]
    #[case::null(r#"{"title": null}"#)]
    #[tokio::test]
    async fn test_create_task_titleが未入力なら400でdbを呼ばない(#[case] body: &str) {
        // Given
        let repo = MockTaskRepository::new();
        let sut = router(repo.clone());

        // When
        let (status, json) = send(sut, post_tasks(body)).await;

        // Then
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({ "status": "error", "message": "Title is required" })
        );
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_task_jsonとして不正なボディは400でdbを呼ばない() {
        let repo = MockTaskRepository::new();
        let sut = router(repo.clone());

        let (status, json) = send(sut, post_tasks("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with("Invalid JSON body: "), "message: {message}");
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_task_db障害時は500で原因を含むメッセージを返す() {
        let sut = router(MockTaskRepository::unavailable("connection refused"));

        let (status, json) = send(sut, post_tasks(r#"{"title": "Buy milk"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["status"], "error");
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with("Failed to create task: "), "message: {message}");
        assert!(message.contains("connection refused"), "message: {message}");
    }

    // --- GET /tasks ---

    #[tokio::test]
    async fn test_list_tasks_作成したタスクをid昇順で返す() {
        // Given
        let repo = MockTaskRepository::new();
        for body in [r#"{"title": "first"}"#, r#"{"title": "second"}"#] {
            let (status, _) = send(router(repo.clone()), post_tasks(body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        // When
        let (status, json) = send(router(repo), get_tasks()).await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        let tasks = json["tasks"].as_array().unwrap();
        let ids: Vec<i64> = tasks.iter().map(|t| t["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(tasks[0]["title"], "first");
        assert_eq!(tasks[1]["title"], "second");
    }

    #[tokio::test]
    async fn test_list_tasks_タスクがなければ空配列を返す() {
        let sut = router(MockTaskRepository::new());

        let (status, json) = send(sut, get_tasks()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "status": "success", "tasks": [] }));
    }

    #[tokio::test]
    async fn test_list_tasks_db障害時は500を返す() {
        let sut = router(MockTaskRepository::unavailable("connection refused"));

        let (status, json) = send(sut, get_tasks()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["status"], "error");
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("Failed to retrieve tasks: ")
        );
    }

    #[test]
    fn test_task_dtoはcreated_atのnullをそのまま保持する() {
        let task = Task::from_db(
            taskboard_domain::task::TaskId::from_i32(8),
            "imported".to_string(),
            Some("from another client".to_string()),
            None,
        );

        let json = serde_json::to_value(TaskDto::from(&task)).unwrap();

        assert_eq!(json["created_at"], Value::Null);
        assert_eq!(json["title"], "imported");
    }

    #[test]
    fn test_task_dtoはdescriptionのnullをそのまま保持する() {
        let created_at = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let task = Task::from_db(
            taskboard_domain::task::TaskId::from_i32(7),
            "legacy".to_string(),
            None,
            Some(created_at),
        );

        let json = serde_json::to_value(TaskDto::from(&task)).unwrap();

        assert_eq!(
            json,
            json!({
                "id": 7,
                "title": "legacy",
                "description": null,
                "created_at": "2024-01-02T03:04:05"
            })
        );
    }
}
