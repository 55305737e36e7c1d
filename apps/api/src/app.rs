//! # ルーター構築
//!
//! 全エンドポイントを 1 つの [`Router`] にまとめる。
//! `main` とハンドラテストの両方がこの関数を使う。

use std::sync::Arc;

use axum::{Router, routing::get};
use taskboard_infra::repository::TaskRepository;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    error::ApiError,
    handler::{TaskState, create_task, db_test, health_check, index, init_db, list_tasks},
};

/// アプリケーションのルーターを構築する
///
/// | メソッド | パス |
/// |----------|------|
/// | GET | `/` |
/// | GET | `/health` |
/// | GET | `/db-test` |
/// | GET | `/init-db` |
/// | GET / POST | `/tasks` |
///
/// 未定義のパスは 404 `{ "status": "error", "message": "Not Found" }` を返す。
pub fn router<R>(repository: R) -> Router
where
    R: TaskRepository + 'static,
{
    let task_state = Arc::new(TaskState { repository });

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/db-test", get(db_test::<R>))
        .route("/init-db", get(init_db::<R>))
        .route("/tasks", get(list_tasks::<R>).post(create_task::<R>))
        .with_state(task_state)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

/// `host:port` にバインドする
///
/// `host` は IP アドレスでもホスト名（`localhost` など）でもよい。
pub async fn bind(server: &ServerConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind(server.addr()).await
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use taskboard_infra::mock::MockTaskRepository;
    use tower::ServiceExt;

    use super::*;

    async fn send(sut: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = sut.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_bindはホスト名でもバインドできる() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
        };

        let listener = bind(&server).await.unwrap();

        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_indexはサービス情報を返す() {
        let sut = router(MockTaskRepository::new());

        let (status, json) = send(sut, Method::GET, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({ "message": "Welcome to Taskboard", "status": "running" })
        );
    }

    #[tokio::test]
    async fn test_healthはdb障害中でも200を返しdbに触れない() {
        // Given
        let repo = MockTaskRepository::unavailable("connection refused");
        let sut = router(repo.clone());

        // When
        let (status, json) = send(sut, Method::GET, "/health").await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "status": "healthy" }));
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_未定義のパスは404のエラーjsonを返す() {
        let sut = router(MockTaskRepository::new());

        let (status, json) = send(sut, Method::GET, "/no-such-route").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({ "status": "error", "message": "Not Found" }));
    }

    #[tokio::test]
    async fn test_許可されていないメソッドは405を返す() {
        let sut = router(MockTaskRepository::new());

        let (status, _) = send(sut, Method::DELETE, "/tasks").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_db障害の後も後続のリクエストを処理できる() {
        // Given
        let sut = router(MockTaskRepository::unavailable("connection refused"));

        // When
        let (first, _) = send(sut.clone(), Method::GET, "/tasks").await;
        let (second, _) = send(sut.clone(), Method::GET, "/db-test").await;
        let (health, _) = send(sut, Method::GET, "/health").await;

        // Then
        assert_eq!(first, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(second, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(health, StatusCode::OK);
    }
}
