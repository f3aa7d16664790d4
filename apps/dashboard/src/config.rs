//! # Dashboard 設定
//!
//! 環境変数から Dashboard サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// Dashboard サーバーの設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// PostgreSQL 接続 URL
    pub database_url: String,
    /// 認証フローのページ
    pub auth_pages:   AuthPages,
}

/// 認証フローで利用者を誘導するページ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPages {
    /// 未認証の利用者を送るサインインページ
    pub sign_in: String,
}

impl Default for AuthPages {
    fn default() -> Self {
        Self {
            sign_in: "/login".to_string(),
        }
    }
}

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("POSTGRES_URL が設定されていません")]
    MissingDatabaseUrl,

    #[error("APP_PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let database_url = var("POSTGRES_URL").ok_or(ConfigError::MissingDatabaseUrl)?;
        let port = match var("APP_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            auth_pages: AuthPages {
                sign_in: var("AUTH_SIGN_IN_PAGE").unwrap_or_else(|| AuthPages::default().sign_in),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_未指定の項目はデフォルト値になる() {
        let config = load(&[("POSTGRES_URL", "postgres://localhost/acme")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "postgres://localhost/acme");
        assert_eq!(config.auth_pages.sign_in, "/login");
    }

    #[test]
    fn test_環境変数の値で上書きできる() {
        let config = load(&[
            ("POSTGRES_URL", "postgres://db/acme"),
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "8080"),
            ("AUTH_SIGN_IN_PAGE", "/signin"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth_pages.sign_in, "/signin");
    }

    #[rstest]
    #[case::未設定(&[])]
    #[case::空文字(&[("POSTGRES_URL", "")])]
    fn test_postgres_urlがなければエラー(#[case] vars: &[(&str, &str)]) {
        assert_eq!(load(vars).unwrap_err(), ConfigError::MissingDatabaseUrl);
    }

    #[rstest]
    #[case("abc")]
    #[case("70000")]
    #[case("-1")]
    fn test_不正なポート番号はエラー(#[case] port: &str) {
        let result = load(&[("POSTGRES_URL", "postgres://db/acme"), ("APP_PORT", port)]);

        assert_eq!(result.unwrap_err(), ConfigError::InvalidPort(port.to_string()));
    }
}
