pub mod error;

pub use error::*;

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// エンドポイント未指定時のデフォルト
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/v1";

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "DIRT_ENDPOINT";

/// API トークンを供給する環境変数
pub const TOKEN_ENV: &str = "DIRT_TOKEN";

/// 全リクエストに適用される固定タイムアウト
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// プロバイダ設定
///
/// プロセス起動時に一度だけ [`ProviderConfig::resolve`] で組み立て、
/// 以降は参照で Transport Client に渡す。コア側で環境変数は読まない。
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// REST バックエンドのベースアドレス（末尾の `/` は除去済み）
    pub endpoint: String,

    /// Bearer トークン
    pub token: Option<String>,
}

/// オーケストレータから渡される未解決のプロバイダブロック
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderBlock {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl ProviderConfig {
    /// 設定を解決する
    ///
    /// 各フィールドの優先順位:
    /// 1. 明示的に指定された値
    /// 2. 環境変数 (DIRT_ENDPOINT / DIRT_TOKEN)。空文字は未設定扱い
    /// 3. デフォルト (エンドポイントのみ)
    pub fn resolve(endpoint: Option<String>, token: Option<String>) -> Result<Self> {
        let endpoint = endpoint
            .or_else(|| env_value(ENDPOINT_ENV))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let token = token.or_else(|| env_value(TOKEN_ENV));

        Self::new(endpoint, token)
    }

    /// 環境変数を参照せずに設定を作る
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        let token = token.filter(|t| !t.is_empty());

        Ok(Self { endpoint, token })
    }

    /// JSON のプロバイダブロックから解決する（未指定フィールドは環境変数→デフォルト）
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let block: ProviderBlock = serde_json::from_value(value)?;
        Self::resolve(block.endpoint, block.token)
    }

    /// トークンが設定されているか
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn normalize_endpoint(raw: String) -> Result<String> {
    let invalid = |reason: &str| ConfigError::InvalidEndpoint {
        endpoint: raw.clone(),
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(&raw).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("http または https のみ対応しています"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("ホストがありません"));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_resolve_defaults() {
        temp_env::with_vars_unset([ENDPOINT_ENV, TOKEN_ENV], || {
            let config = ProviderConfig::resolve(None, None).unwrap();
            assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
            assert!(config.token.is_none());
        });
    }

    #[test]
    #[serial]
    fn test_resolve_from_env() {
        temp_env::with_vars(
            [
                (ENDPOINT_ENV, Some("https://dirt.example.com/v1/")),
                (TOKEN_ENV, Some("env-token")),
            ],
            || {
                let config = ProviderConfig::resolve(None, None).unwrap();
                assert_eq!(config.endpoint, "https://dirt.example.com/v1");
                assert_eq!(config.token.as_deref(), Some("env-token"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_explicit_wins_over_env() {
        temp_env::with_vars(
            [
                (ENDPOINT_ENV, Some("https://env.example.com/v1")),
                (TOKEN_ENV, Some("env-token")),
            ],
            || {
                let config = ProviderConfig::resolve(
                    Some("http://127.0.0.1:9000/v1".to_string()),
                    Some("explicit".to_string()),
                )
                .unwrap();
                assert_eq!(config.endpoint, "http://127.0.0.1:9000/v1");
                assert_eq!(config.token.as_deref(), Some("explicit"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_empty_env_is_unset() {
        temp_env::with_vars([(ENDPOINT_ENV, Some("")), (TOKEN_ENV, Some(""))], || {
            let config = ProviderConfig::resolve(None, None).unwrap();
            assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
            assert!(!config.has_token());
        });
    }

    #[test]
    #[serial]
    fn test_from_value() {
        temp_env::with_vars_unset([ENDPOINT_ENV, TOKEN_ENV], || {
            let config = ProviderConfig::from_value(serde_json::json!({
                "endpoint": "http://localhost:1234/v1",
                "token": "abc"
            }))
            .unwrap();
            assert_eq!(config.endpoint, "http://localhost:1234/v1");
            assert_eq!(config.token.as_deref(), Some("abc"));

            let err = ProviderConfig::from_value(serde_json::json!({ "region": "x" }));
            assert!(matches!(err, Err(ConfigError::Json(_))));
        });
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = ProviderConfig::new("localhost:8080", None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));

        let err = ProviderConfig::new("ftp://example.com", None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config =
            ProviderConfig::new(DEFAULT_ENDPOINT, Some("super-secret".to_string())).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
