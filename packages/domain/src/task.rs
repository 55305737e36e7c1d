//! # タスク
//!
//! Taskboard が扱う唯一のエンティティ。
//!
//! ## ライフサイクル
//!
//! タスクは作成されたら永続化されるだけで、更新・削除は行わない。
//! `id` と `created_at` はデータベースが採番・付与する。
//!
//! ## 使用例
//!
//! ```rust
//! use taskboard_domain::task::NewTask;
//!
//! // リクエストボディから生成（title 必須、description 任意）
//! let new_task = NewTask::new(Some("Buy milk".to_string()), None)?;
//! assert_eq!(new_task.title().as_str(), "Buy milk");
//! assert_eq!(new_task.description(), "");
//!
//! // title が空ならバリデーションエラー
//! assert!(NewTask::new(Some("   ".to_string()), None).is_err());
//! # Ok::<(), taskboard_domain::DomainError>(())
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use crate::DomainError;

/// title 未入力時のメッセージ（クライアントにそのまま返る）
pub const TITLE_REQUIRED_MESSAGE: &str = "Title is required";

// =========================================================================
// TaskId
// =========================================================================

/// タスクの一意識別子
///
/// `SERIAL` カラムの値。DB が採番し、再利用されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(i32);

impl TaskId {
    pub fn from_i32(value: i32) -> Self {
        Self(value)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// TaskTitle
// =========================================================================

/// タスクのタイトル（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列・空白のみではない
///
/// 入力値はトリムせずそのまま保持する。作成レスポンスで入力と同じ値を返すため。
/// 文字数上限（`VARCHAR(100)`）は DB 側の制約に任せる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation(TITLE_REQUIRED_MESSAGE.to_string()));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =========================================================================
// NewTask
// =========================================================================

/// 作成リクエストを検証済みの形にしたもの
///
/// 永続化前のタスク。`id` と `created_at` はまだ持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title:       TaskTitle,
    description: String,
}

impl NewTask {
    /// 未検証の入力から作成する
    ///
    /// `title` が `None`・空・空白のみなら [`DomainError::Validation`]。
    /// `description` が `None` なら空文字列になる。
    pub fn new(title: Option<String>, description: Option<String>) -> Result<Self, DomainError> {
        let title = title
            .ok_or_else(|| DomainError::Validation(TITLE_REQUIRED_MESSAGE.to_string()))
            .and_then(TaskTitle::new)?;

        Ok(Self {
            title,
            description: description.unwrap_or_default(),
        })
    }

    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

// =========================================================================
// Task
// =========================================================================

/// 永続化済みのタスク
///
/// `description` はスキーマ上 NULL 可能なため `Option` で保持する。
/// このサービス経由で作成したタスクは常に `Some`（未指定なら空文字列）。
/// `created_at` も DEFAULT 付きの NULL 可能カラムのため `Option` で保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id:          TaskId,
    title:       String,
    description: Option<String>,
    created_at:  Option<NaiveDateTime>,
}

impl Task {
    /// DB の行から復元する
    pub fn from_db(
        id: TaskId,
        title: String,
        description: Option<String>,
        created_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            created_at,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_new_taskはtitleとdescriptionをそのまま保持する() {
        let sut = NewTask::new(
            Some("New Task".to_string()),
            Some("New Description".to_string()),
        )
        .unwrap();

        assert_eq!(sut.title().as_str(), "New Task");
        assert_eq!(sut.description(), "New Description");
    }

    #[test]
    fn test_new_taskはdescription未指定なら空文字列になる() {
        let sut = NewTask::new(Some("Buy milk".to_string()), None).unwrap();

        assert_eq!(sut.description(), "");
    }

    #[test]
    fn test_new_taskはtitle未指定ならバリデーションエラー() {
        let result = NewTask::new(None, Some("no title".to_string()));

        assert_eq!(
            result,
            Err(DomainError::Validation("Title is required".to_string()))
        );
    }

    #[rstest]
    #[case::空文字列("")]
    #[case::空白のみ("   ")]
    #[case::タブと改行("\t\n")]
    fn test_task_titleは空白のみを拒否する(#[case] input: &str) {
        let result = TaskTitle::new(input);

        assert_eq!(
            result,
            Err(DomainError::Validation(TITLE_REQUIRED_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_task_titleは前後の空白をトリムしない() {
        let sut = TaskTitle::new("  padded  ").unwrap();

        assert_eq!(sut.as_str(), "  padded  ");
    }

    #[test]
    fn test_taskはcreated_atがnullの行も復元できる() {
        let sut = Task::from_db(TaskId::from_i32(1), "x".to_string(), None, None);

        assert_eq!(sut.created_at(), None);
        assert_eq!(sut.description(), None);
    }

    #[test]
    fn test_task_idはdisplayで数値を出力する() {
        assert_eq!(TaskId::from_i32(42).to_string(), "42");
    }
}
