use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use redis::{AsyncCommands, Client as RedisClient};

use super::errors::{CacheError, CacheResult};

/// 键值缓存
///
/// `get` 用 `Ok(None)` 表示键不存在，与连接或命令错误区分开。
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = CacheResult<Option<String>>> + Send;

    /// 写入缓存，`ttl` 为零时不设置过期时间
    fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = CacheResult<()>> + Send;
}

/// 基于 Redis 的缓存
#[derive(Clone)]
pub struct RedisCache {
    client: Arc<RedisClient>,
}

impl RedisCache {
    pub fn new(client: Arc<RedisClient>) -> Self {
        Self { client }
    }

    async fn connection(&self) -> CacheResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }

    /// 启动时检查 Redis 是否可用
    pub async fn ping(&self) -> CacheResult<String> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis PING failed: {}", e)))?;
        Ok(pong)
    }
}

impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis GET failed: {}", e)))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.connection().await?;
        let result: redis::RedisResult<()> = if ttl.is_zero() {
            conn.set(key, value).await
        } else {
            conn.set_ex(key, value, ttl.as_secs()).await
        };
        result.map_err(|e| CacheError::Backend(format!("Redis SET failed: {}", e)))
    }
}
