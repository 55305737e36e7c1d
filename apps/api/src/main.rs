//! # Taskboard API サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `APP_HOST` / `APP_PORT` | `0.0.0.0` / `5000` | バインドアドレス |
//! | `DB_*` | [`taskboard_api::config`] を参照 | PostgreSQL 接続先 |
//! | `LOG_FORMAT` | `pretty` | `json` または `pretty` |
//! | `RUST_LOG` | `info,taskboard=debug,tower_http=debug` | ログフィルタ |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p taskboard-api
//!
//! # ローカルの PostgreSQL に接続
//! DB_HOST=localhost cargo run -p taskboard-api --release
//! ```

use anyhow::Context as _;
use taskboard_api::{
    app::{bind, router},
    config::AppConfig,
};
use taskboard_infra::{db::PgConnectionFactory, repository::PostgresTaskRepository};
use taskboard_shared::observability::{LogFormat, init_tracing};

/// Taskboard API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(LogFormat::from_env());

    // 設定読み込み
    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.database,
        "Taskboard API サーバーを起動します: {}",
        config.server.addr()
    );

    // 接続はリクエストごとに開くため、ここでは DB に接続しない
    let factory = PgConnectionFactory::new(&config.database);
    let repository = PostgresTaskRepository::new(factory);

    let app = router(repository);

    let listener = bind(&config.server)
        .await
        .with_context(|| format!("{} へのバインドに失敗しました", config.server.addr()))?;
    tracing::info!("Taskboard API サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Taskboard API サーバーを停止しました");
    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗しました");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
