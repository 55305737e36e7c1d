//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、検証はドメイン層、SQL はインフラ層に委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── root.rs     # GET /
//!     ├── health.rs   # GET /health
//!     ├── db.rs       # GET /db-test, GET /init-db
//!     └── task.rs     # GET /tasks, POST /tasks
//! ```

pub mod db;
pub mod health;
pub mod root;
pub mod task;

pub use db::{db_test, init_db};
pub use health::health_check;
pub use root::index;
pub use task::{TaskState, create_task, list_tasks};
