use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("無効なエンドポイント '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("プロバイダ設定の JSON が不正です: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
