//! # PostgreSQL 接続管理
//!
//! リクエスト単位の接続ファクトリを提供する。
//!
//! ## 設計方針
//!
//! - **接続プールなし**: [`PgConnectionFactory::connect`] は呼び出しごとに新しい
//!   TCP 接続を確立する。接続は 1 リクエストが排他的に所有し、再利用しない
//! - **スコープ付き取得**: [`ScopedConnection`] はドロップ時にソケットを閉じる。
//!   正常系では [`ScopedConnection::release`] で Terminate を送ってから閉じる
//! - **設定は起動時に一度だけ**: [`DatabaseConfig`] を明示的に渡し、
//!   接続時に環境変数を読み直さない
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use taskboard_infra::db::{DatabaseConfig, PgConnectionFactory};
//!
//! let factory = PgConnectionFactory::new(&DatabaseConfig::default());
//!
//! // 成功・失敗どちらの経路でも接続が解放される
//! let version: String = factory
//!     .with_connection(|conn| {
//!         Box::pin(async move {
//!             sqlx::query_scalar("SELECT version()").fetch_one(conn).await
//!         })
//!     })
//!     .await?;
//! ```

use std::{
    fmt,
    future::Future,
    ops::{Deref, DerefMut},
    pin::Pin,
    time::Duration,
};

use sqlx::{Connection, PgConnection, postgres::PgConnectOptions};

use crate::error::InfraError;

/// 接続確立タイムアウトのデフォルト値
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// [`PgConnectionFactory::with_connection`] に渡すクロージャが返す Future
pub type ConnectionFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, sqlx::Error>> + Send + 'c>>;

// =============================================================================
// DatabaseConfig
// =============================================================================

/// データベース接続設定
///
/// | フィールド | デフォルト |
/// |------------|------------|
/// | `host` | `postgres` |
/// | `database` | `postgres` |
/// | `user` | `postgres` |
/// | `password` | `postgres` |
/// | `port` | `5432` |
/// | `connect_timeout` | 5 秒 |
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host:            String,
    pub database:        String,
    pub user:            String,
    pub password:        String,
    pub port:            u16,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host:            "postgres".to_string(),
            database:        "postgres".to_string(),
            user:            "postgres".to_string(),
            password:        "postgres".to_string(),
            port:            5432,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl DatabaseConfig {
    /// sqlx の接続オプションに変換する
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
            .application_name("taskboard")
    }
}

// パスワードをログに出さない
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"********")
            .field("port", &self.port)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

// =============================================================================
// PgConnectionFactory
// =============================================================================

/// 接続ファクトリ
///
/// 接続オプションだけを保持し、共有可変状態を持たない。
/// `Clone` して複数のリクエストから同時に使ってよい。
#[derive(Clone)]
pub struct PgConnectionFactory {
    options:         PgConnectOptions,
    connect_timeout: Duration,
}

impl PgConnectionFactory {
    /// 設定からファクトリを作成する
    pub fn new(config: &DatabaseConfig) -> Self {
        Self::from_options(config.connect_options(), config.connect_timeout)
    }

    /// 接続オプションから直接作成する（`#[sqlx::test]` の `PgConnectOptions` 用）
    pub fn from_options(options: PgConnectOptions, connect_timeout: Duration) -> Self {
        Self {
            options,
            connect_timeout,
        }
    }

    /// 新しい接続を確立する
    ///
    /// # エラー
    ///
    /// - 到達不可・認証失敗・DB 不在: [`InfraErrorKind::Connection`](crate::InfraErrorKind::Connection)
    /// - タイムアウト超過: [`InfraErrorKind::ConnectTimeout`](crate::InfraErrorKind::ConnectTimeout)
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(host = %self.options.get_host(), port = self.options.get_port())
    )]
    pub async fn connect(&self) -> Result<ScopedConnection, InfraError> {
        let conn = tokio::time::timeout(self.connect_timeout, PgConnection::connect_with(&self.options))
            .await
            .map_err(|_| InfraError::connect_timeout(self.connect_timeout))?
            .map_err(InfraError::connection)?;

        tracing::debug!("データベース接続を確立しました");
        Ok(ScopedConnection { conn })
    }

    /// 接続を開いて `op` を実行し、結果にかかわらず接続を解放する
    ///
    /// `op` のエラーはクエリエラー（[`InfraErrorKind::Query`](crate::InfraErrorKind::Query)）になる。
    pub async fn with_connection<T, F>(&self, op: F) -> Result<T, InfraError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> ConnectionFuture<'c, T> + Send,
    {
        let mut conn = self.connect().await?;
        let result = op(&mut *conn).await;
        conn.release().await;
        Ok(result?)
    }
}

// PgConnectOptions の Debug はパスワードを含むため、接続先だけを出す
impl fmt::Debug for PgConnectionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgConnectionFactory")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .field("database", &self.options.get_database())
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ScopedConnection
// =============================================================================

/// 1 リクエストが所有する DB 接続
///
/// `Deref<Target = PgConnection>` により sqlx のエグゼキュータとして使える。
/// `release()` を呼ばずにドロップしてもソケットは閉じられる（Terminate は送られない）。
pub struct ScopedConnection {
    conn: PgConnection,
}

impl ScopedConnection {
    /// サーバーに Terminate を送って接続を閉じる
    ///
    /// 閉じる際の失敗は接続がすでに使えないことを意味するだけなので、
    /// ログに残して呼び出し元には返さない。
    pub async fn release(self) {
        match self.conn.close().await {
            Ok(()) => tracing::debug!("データベース接続を解放しました"),
            Err(e) => tracing::warn!(error = %e, "データベース接続のクローズに失敗しました"),
        }
    }
}

impl Deref for ScopedConnection {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
