use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set or empty")]
    Missing(&'static str),

    #[error("REDIS_CACHE_TTL not set")]
    MissingCacheTtl,

    #[error("invalid REDIS_CACHE_TTL value: {0:?}")]
    InvalidCacheTtl(String),
}

/// 缓存过期时间（秒）
///
/// 保存原始配置值，每次请求时重新校验。
#[derive(Debug, Clone, Default)]
pub struct CacheTtl(Option<String>);

impl CacheTtl {
    pub fn new(raw: Option<String>) -> Self {
        Self(raw)
    }

    pub fn duration(&self) -> Result<Duration, ConfigError> {
        let raw = self.0.as_deref().ok_or(ConfigError::MissingCacheTtl)?;
        // 不去除空白，" 60 " 视为无效
        raw.parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidCacheTtl(raw.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_key: String,
    pub cache_ttl: CacheTtl,
    pub email_from: Option<String>,
    pub email_password: Option<String>,
    pub email_target: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // ENV_FILE 指定配置文件，否则读取当前目录的 .env
        match env::var("ENV_FILE") {
            Ok(path) if !path.is_empty() => {
                if let Err(e) = dotenv::from_filename(&path) {
                    tracing::warn!(path = %path, error = %e, "Failed to load env file");
                }
            }
            _ => {
                dotenv::dotenv().ok();
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            database_max_connections: get("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            redis_url: required("REDIS_URL")?,
            server_host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: get("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_key: required("API_KEY")?,
            cache_ttl: CacheTtl::new(get("REDIS_CACHE_TTL")),
            email_from: get("EMAIL_FROM"),
            email_password: get("EMAIL_PASSWORD"),
            email_target: get("EMAIL_TARGET"),
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: get("SMTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
        })
    }
}
