//! # アプリケーション設定
//!
//! 起動時に一度だけ環境変数から設定を読み込む。
//! 接続のたびに環境変数を読み直すことはしない。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `APP_HOST` | `0.0.0.0` | バインドアドレス |
//! | `APP_PORT` | `5000` | ポート番号 |
//! | `DB_HOST` | `postgres` | データベースホスト |
//! | `DB_NAME` | `postgres` | データベース名 |
//! | `DB_USER` | `postgres` | ユーザー名 |
//! | `DB_PASSWORD` | `postgres` | パスワード |
//! | `DB_PORT` | `5432` | データベースポート |
//! | `DB_CONNECT_TIMEOUT_SECS` | `5` | 接続確立のタイムアウト（秒） |
//!
//! 数値として解釈できない値は [`ConfigError`] になり、サーバーは起動しない。

use std::{env, time::Duration};

use taskboard_infra::db::DatabaseConfig;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 数値として解釈できない値
    #[error("{name} の値が不正です: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// HTTP サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` 形式のアドレス
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// アプリケーション全体の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server:   ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// `lookup` が `None` を返した変数はデフォルト値を使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = DatabaseConfig::default();
        let string_or = |name: &str, default: String| lookup(name).unwrap_or(default);

        let server = ServerConfig {
            host: string_or("APP_HOST", "0.0.0.0".to_string()),
            port: parse_or(&lookup, "APP_PORT", 5000)?,
        };

        let database = DatabaseConfig {
            host:            string_or("DB_HOST", defaults.host),
            database:        string_or("DB_NAME", defaults.database),
            user:            string_or("DB_USER", defaults.user),
            password:        string_or("DB_PASSWORD", defaults.password),
            port:            parse_or(&lookup, "DB_PORT", defaults.port)?,
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )?),
        };

        Ok(Self { server, database })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_環境変数がなければデフォルト値を使う() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(
            config.server,
            ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            }
        );
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.server.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_環境変数の値が反映される() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "8080"),
            ("DB_HOST", "db"),
            ("DB_NAME", "tasks"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "secret"),
            ("DB_PORT", "15432"),
            ("DB_CONNECT_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert_eq!(
            config.database,
            DatabaseConfig {
                host:            "db".to_string(),
                database:        "tasks".to_string(),
                user:            "app".to_string(),
                password:        "secret".to_string(),
                port:            15432,
                connect_timeout: Duration::from_secs(10),
            }
        );
    }

    #[rstest]
    #[case("DB_PORT", "not-a-port")]
    #[case("DB_PORT", "70000")]
    #[case("APP_PORT", "")]
    #[case("DB_CONNECT_TIMEOUT_SECS", "-1")]
    fn test_数値でない値は設定エラーになる(#[case] name: &'static str, #[case] value: &str) {
        let err = AppConfig::from_lookup(lookup_from(&[(name, value)])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name,
                value: value.to_string(),
            }
        );
    }
}
