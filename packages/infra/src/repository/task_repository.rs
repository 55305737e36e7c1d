//! # TaskRepository
//!
//! tasks テーブルの操作を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **1 操作 = 1 接続**: 各メソッドは [`PgConnectionFactory::with_connection`] で
//!   接続を開き、結果にかかわらず解放する
//! - **プレースホルダ束縛**: ユーザー入力は必ず `$1`, `$2` で束縛し、
//!   SQL 文字列に埋め込まない
//! - **列名でのマッピング**: 行は [`sqlx::FromRow`] で列名から構造体に変換する

use async_trait::async_trait;
use chrono::NaiveDateTime;
use taskboard_domain::task::{NewTask, Task, TaskId};

use crate::{db::PgConnectionFactory, error::InfraError};

/// `ensure_schema_and_seed` が投入するサンプルタスク（title, description）
pub const SEED_TASKS: [(&str, &str); 3] = [
    ("Task 1", "Description for task 1"),
    ("Task 2", "Description for task 2"),
    ("Task 3", "Description for task 3"),
];

// tasks テーブルにはプライマリキー以外の一意制約がないため、
// ON CONFLICT DO NOTHING が働く衝突は起こらず、呼ぶたびにシード行が追加される。
const SCHEMA_AND_SEED_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id SERIAL PRIMARY KEY,
    title VARCHAR(100) NOT NULL,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

INSERT INTO tasks (title, description)
VALUES
    ('Task 1', 'Description for task 1'),
    ('Task 2', 'Description for task 2'),
    ('Task 3', 'Description for task 3')
ON CONFLICT DO NOTHING;
"#;

/// タスクリポジトリトレイト
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// データベースのバージョン文字列を取得する
    async fn fetch_version(&self) -> Result<String, InfraError>;

    /// tasks テーブルがなければ作成し、シード行を 3 件挿入する
    ///
    /// DDL と INSERT を 1 回のラウンドトリップで送る。
    async fn ensure_schema_and_seed(&self) -> Result<(), InfraError>;

    /// 全タスクを id 昇順で取得する
    async fn list_tasks(&self) -> Result<Vec<Task>, InfraError>;

    /// タスクを挿入し、DB が採番した id と created_at を含む行を返す
    async fn insert_task(&self, new_task: &NewTask) -> Result<Task, InfraError>;
}

/// tasks テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id:          i32,
    title:       String,
    description: Option<String>,
    created_at:  Option<NaiveDateTime>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task::from_db(
            TaskId::from_i32(row.id),
            row.title,
            row.description,
            row.created_at,
        )
    }
}

/// PostgreSQL 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    factory: PgConnectionFactory,
}

impl PostgresTaskRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(factory: PgConnectionFactory) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn fetch_version(&self) -> Result<String, InfraError> {
        self.factory
            .with_connection(|conn| {
                Box::pin(async move {
                    sqlx::query_scalar::<_, String>("SELECT version()")
                        .fetch_one(conn)
                        .await
                })
            })
            .await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn ensure_schema_and_seed(&self) -> Result<(), InfraError> {
        self.factory
            .with_connection(|conn| {
                Box::pin(async move {
                    let result = sqlx::Executor::execute(conn, sqlx::raw_sql(SCHEMA_AND_SEED_SQL)).await?;
                    tracing::debug!(
                        rows_affected = result.rows_affected(),
                        "スキーマを確認しシード行を挿入しました"
                    );
                    Ok::<_, sqlx::Error>(())
                })
            })
            .await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn list_tasks(&self) -> Result<Vec<Task>, InfraError> {
        let rows: Vec<TaskRow> = self
            .factory
            .with_connection(|conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, TaskRow>(
                        r#"
                        SELECT id, title, description, created_at
                        FROM tasks
                        ORDER BY id ASC
                        "#,
                    )
                    .fetch_all(conn)
                    .await
                })
            })
            .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert_task(&self, new_task: &NewTask) -> Result<Task, InfraError> {
        let title = new_task.title().as_str().to_owned();
        let description = new_task.description().to_owned();

        let row: TaskRow = self
            .factory
            .with_connection(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, TaskRow>(
                        r#"
                        INSERT INTO tasks (title, description)
                        VALUES ($1, $2)
                        RETURNING id, title, description, created_at
                        "#,
                    )
                    .bind(title)
                    .bind(description)
                    .fetch_one(conn)
                    .await
                })
            })
            .await?;

        tracing::debug!(task_id = row.id, "タスクを作成しました");
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_postgres_task_repositoryはsendとsyncを実装している() {
        assert_send_sync::<PostgresTaskRepository>();
        assert_send_sync::<Box<dyn TaskRepository>>();
    }

    #[test]
    fn test_シードsqlは定数のシード行をすべて含む() {
        for (title, description) in SEED_TASKS {
            assert!(
                SCHEMA_AND_SEED_SQL.contains(&format!("('{title}', '{description}')")),
                "シード SQL に {title} が含まれること"
            );
        }
        assert!(SCHEMA_AND_SEED_SQL.contains("ON CONFLICT DO NOTHING"));
    }
}
