use cache::{ReadThroughResolver, RedisCache};
use config::Config;
use database::{Entity, PgStore};
use notify::Notifier;
use redis::Client as RedisClient;
use sqlx::PgPool;
use std::sync::Arc;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod result;
pub mod router;
pub mod routes;

#[cfg(test)]
mod test_support;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub cache: RedisCache,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(pool: PgPool, redis: Arc<RedisClient>, config: Config) -> Self {
        Self {
            pool,
            cache: RedisCache::new(redis),
            notifier: Notifier::from_config(&config),
            config,
        }
    }

    pub fn store<E: Entity>(&self) -> PgStore<E> {
        PgStore::new(self.pool.clone())
    }

    pub fn resolver<E: Entity>(&self) -> ReadThroughResolver<PgStore<E>, RedisCache> {
        ReadThroughResolver::new(
            self.store::<E>(),
            self.cache.clone(),
            self.config.cache_ttl.clone(),
        )
    }
}
