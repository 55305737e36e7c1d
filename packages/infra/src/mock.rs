//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! taskboard-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use taskboard_domain::task::{NewTask, Task, TaskId};

use crate::{
    error::InfraError,
    repository::{SEED_TASKS, TaskRepository},
};

/// モックが返すバージョン文字列
pub const MOCK_VERSION: &str = "PostgreSQL 16.0 (mock)";

// ===== MockTaskRepository =====

/// インメモリの TaskRepository
///
/// `id` は 1 から順に採番する。`unavailable` で作成すると全操作が接続エラーを返す。
/// `Clone` したインスタンスは状態を共有する。
#[derive(Clone, Default)]
pub struct MockTaskRepository {
    tasks:       Arc<Mutex<Vec<Task>>>,
    calls:       Arc<AtomicUsize>,
    unavailable: Option<String>,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全操作が `message` を原因とする接続エラーで失敗するモック
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            unavailable: Some(message.into()),
            ..Self::default()
        }
    }

    /// いずれかの操作が呼ばれた回数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 保存済みタスクのスナップショット
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    fn begin(&self) -> Result<(), InfraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.unavailable {
            Some(message) => Err(InfraError::connection(sqlx::Error::Protocol(
                message.clone(),
            ))),
            None => Ok(()),
        }
    }

    fn push(&self, title: &str, description: Option<&str>) -> Task {
        let mut tasks = self.tasks.lock().unwrap();
        let id = i32::try_from(tasks.len()).unwrap() + 1;
        let task = Task::from_db(
            TaskId::from_i32(id),
            title.to_string(),
            description.map(str::to_string),
            Some(Utc::now().naive_utc()),
        );
        tasks.push(task.clone());
        task
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn fetch_version(&self) -> Result<String, InfraError> {
        self.begin()?;
        Ok(MOCK_VERSION.to_string())
    }

    async fn ensure_schema_and_seed(&self) -> Result<(), InfraError> {
        self.begin()?;
        for (title, description) in SEED_TASKS {
            self.push(title, Some(description));
        }
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, InfraError> {
        self.begin()?;
        Ok(self.tasks())
    }

    async fn insert_task(&self, new_task: &NewTask) -> Result<Task, InfraError> {
        self.begin()?;
        Ok(self.push(new_task.title().as_str(), Some(new_task.description())))
    }
}
