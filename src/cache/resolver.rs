//! 读穿透解析器
//!
//! 所有实体的 GET 请求共用同一套缓存旁路流程：先查缓存，未命中时查库，
//! 再把完整响应写回缓存。写操作不会清理缓存，新记录要等到 TTL 过期后
//! 才会出现在缓存的结果里；查不到的记录也不会被缓存。

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use super::errors::CacheError;
use super::keys::derive_key;
use super::store::CacheStore;
use crate::config::{CacheTtl, ConfigError};
use crate::database::{EntityStore, StoreError};
use crate::result::{ApiResponse, Envelope, Payload};

/// 可缓存的记录类型，`ENTITY_TYPE` 作为缓存键前缀
pub trait Cacheable: Serialize + DeserializeOwned + Send + Sync + 'static {
    const ENTITY_TYPE: &'static str;
}

/// 记录不存在的两种情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// 按 id 查询没有结果
    Record,
    /// 集合为空
    Empty,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Cache(#[from] CacheError),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("no content found ({0:?})")]
    NotFound(NotFoundKind),
}

impl From<StoreError> for ResolveError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ResolveError::NotFound(NotFoundKind::Record),
            other => ResolveError::Store(other),
        }
    }
}

/// 结果来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    CacheHit,
    CacheMissResolved,
}

#[derive(Debug)]
pub struct Resolved<E> {
    pub envelope: Envelope<E>,
    pub resolution: Resolution,
}

/// 单个实体类型的缓存旁路读取
#[derive(Clone)]
pub struct ReadThroughResolver<S, C> {
    store: S,
    cache: C,
    ttl: CacheTtl,
}

impl<S, C> ReadThroughResolver<S, C>
where
    S: EntityStore,
    C: CacheStore,
{
    pub fn new(store: S, cache: C, ttl: CacheTtl) -> Self {
        Self { store, cache, ttl }
    }

    /// 当前配置的缓存过期时间
    pub fn ttl(&self) -> Result<Duration, ConfigError> {
        self.ttl.duration()
    }

    /// 按 id 读取单条记录，`id` 为空时读取全部记录
    pub async fn resolve(&self, id: Option<&str>) -> Result<Resolved<S::Record>, ResolveError> {
        let entity = <S::Record as Cacheable>::ENTITY_TYPE;

        // TTL 无效时不访问缓存和数据库
        let ttl = self.ttl()?;

        let id = id.filter(|id| !id.is_empty());
        let key = derive_key(entity, id);

        if let Some(cached) = self.cache.get(&key).await? {
            debug!(key = %key, "Cache hit");
            let envelope = serde_json::from_str::<Envelope<S::Record>>(&cached)
                .map_err(|e| CacheError::Decode(e.to_string()))?;
            return Ok(Resolved {
                envelope,
                resolution: Resolution::CacheHit,
            });
        }
        debug!(key = %key, "Cache miss");

        let payload = match id {
            Some(id) => Payload::One(self.store.find_by_id(id).await?),
            None => Payload::Many(self.store.find_all().await?),
        };
        if payload.is_empty() {
            return Err(ResolveError::NotFound(NotFoundKind::Empty));
        }

        let envelope = ApiResponse::ok(payload);
        let json =
            serde_json::to_string(&envelope).map_err(|e| CacheError::Encode(e.to_string()))?;

        // 数据已经从库里拿到，写缓存失败只记录日志
        match self.cache.set(&key, &json, ttl).await {
            Ok(()) => debug!(key = %key, ttl_secs = ttl.as_secs(), "Key saved to cache"),
            Err(e) => warn!(key = %key, error = %e, "Failed to save key to cache"),
        }

        Ok(Resolved {
            envelope,
            resolution: Resolution::CacheMissResolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::project::Project;
    use crate::test_support::{MemoryCache, MemoryStore, UnreachableCache, sample_project};

    fn ttl(raw: &str) -> CacheTtl {
        CacheTtl::new(Some(raw.to_string()))
    }

    fn resolver<C: CacheStore>(
        store: &MemoryStore,
        cache: &C,
        raw_ttl: &str,
    ) -> ReadThroughResolver<MemoryStore, C>
    where
        C: Clone,
    {
        ReadThroughResolver::new(store.clone(), cache.clone(), ttl(raw_ttl))
    }

    #[tokio::test]
    async fn test_miss_then_hit_queries_store_once() {
        let store = MemoryStore::with_records(vec![sample_project(3)]);
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "60");

        let first = resolver.resolve(Some("3")).await.unwrap();
        assert_eq!(first.resolution, Resolution::CacheMissResolved);
        assert_eq!(first.envelope.response_code, 200);
        assert_eq!(first.envelope.data, Payload::One(sample_project(3)));
        assert!(cache.contains("project:3"));

        let second = resolver.resolve(Some("3")).await.unwrap();
        assert_eq!(second.resolution, Resolution::CacheHit);
        assert_eq!(second.envelope, first.envelope);
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn test_hit_and_miss_serialize_identically() {
        let store = MemoryStore::with_records(vec![sample_project(1), sample_project(2)]);
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "60");

        let miss = resolver.resolve(None).await.unwrap();
        let hit = resolver.resolve(None).await.unwrap();

        let miss_json = serde_json::to_string(&miss.envelope).unwrap();
        let hit_json = serde_json::to_string(&hit.envelope).unwrap();
        assert_eq!(miss_json, hit_json);
        assert_eq!(cache.raw("project:all").as_deref(), Some(miss_json.as_str()));
    }

    #[tokio::test]
    async fn test_collection_and_single_use_separate_keys() {
        let store = MemoryStore::with_records(vec![sample_project(1), sample_project(2)]);
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "60");

        let all = resolver.resolve(Some("")).await.unwrap();
        assert_eq!(
            all.envelope.data,
            Payload::Many(vec![sample_project(1), sample_project(2)])
        );
        assert!(cache.contains("project:all"));

        let one = resolver.resolve(Some("2")).await.unwrap();
        assert_eq!(one.resolution, Resolution::CacheMissResolved);
        assert_eq!(one.envelope.data, Payload::One(sample_project(2)));
        assert_eq!(store.query_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let store = MemoryStore::with_records(vec![sample_project(3)]);
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "60");

        resolver.resolve(Some("3")).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        let within = resolver.resolve(Some("3")).await.unwrap();
        assert_eq!(within.resolution, Resolution::CacheHit);

        tokio::time::advance(Duration::from_secs(31)).await;
        let expired = resolver.resolve(Some("3")).await.unwrap();
        assert_eq!(expired.resolution, Resolution::CacheMissResolved);
        assert_eq!(store.query_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_expires() {
        let store = MemoryStore::with_records(vec![sample_project(3)]);
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "0");

        resolver.resolve(Some("3")).await.unwrap();
        tokio::time::advance(Duration::from_secs(86_400)).await;
        let later = resolver.resolve(Some("3")).await.unwrap();
        assert_eq!(later.resolution, Resolution::CacheHit);
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_record_is_never_cached() {
        let store = MemoryStore::with_records(vec![sample_project(3)]);
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "60");

        for _ in 0..2 {
            let err = resolver.resolve(Some("99")).await.unwrap_err();
            assert!(matches!(err, ResolveError::NotFound(NotFoundKind::Record)));
        }
        assert_eq!(store.query_count(), 2);
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_collection_is_not_found_and_not_cached() {
        let store = MemoryStore::default();
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "60");

        let err = resolver.resolve(None).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(NotFoundKind::Empty)));
        assert!(!cache.contains("project:all"));
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_ttl_touches_nothing() {
        let store = MemoryStore::with_records(vec![sample_project(3)]);
        let cache = MemoryCache::new();

        for raw in [None, Some("abc"), Some("-1")] {
            let resolver = ReadThroughResolver::new(
                store.clone(),
                cache.clone(),
                CacheTtl::new(raw.map(str::to_string)),
            );
            let err = resolver.resolve(Some("3")).await.unwrap_err();
            assert!(matches!(err, ResolveError::Config(_)));
        }
        assert_eq!(cache.read_count(), 0);
        assert_eq!(cache.write_count(), 0);
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn test_cache_read_error_skips_store() {
        let store = MemoryStore::with_records(vec![sample_project(3)]);
        let resolver = ReadThroughResolver::new(store.clone(), UnreachableCache, ttl("60"));

        let err = resolver.resolve(Some("3")).await.unwrap_err();
        assert!(matches!(err, ResolveError::Cache(CacheError::Connection(_))));
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_surfaced() {
        let store = MemoryStore::with_records(vec![sample_project(3)]);
        let cache = MemoryCache::new();
        cache.put_raw("project:3", "{not json");
        let resolver = resolver(&store, &cache, "60");

        let err = resolver.resolve(Some("3")).await.unwrap_err();
        assert!(matches!(err, ResolveError::Cache(CacheError::Decode(_))));
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn test_cache_write_failure_does_not_fail_request() {
        let store = MemoryStore::with_records(vec![sample_project(3)]);
        let cache = MemoryCache::with_failing_writes();
        let resolver = resolver(&store, &cache, "60");

        for _ in 0..2 {
            let resolved = resolver.resolve(Some("3")).await.unwrap();
            assert_eq!(resolved.resolution, Resolution::CacheMissResolved);
        }
        assert_eq!(store.query_count(), 2);
    }

    #[tokio::test]
    async fn test_store_error_is_propagated_and_not_cached() {
        let store = MemoryStore::failing();
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "60");

        let err = resolver.resolve(None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Store(StoreError::Database(_))));
        assert_eq!(store.query_count(), 1);
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_writes_leave_cached_collection_stale() {
        let store = MemoryStore::with_records(vec![sample_project(1)]);
        let cache = MemoryCache::new();
        let resolver = resolver(&store, &cache, "60");

        resolver.resolve(None).await.unwrap();
        store.insert(sample_project(2)).await.unwrap();

        let stale = resolver.resolve(None).await.unwrap();
        assert_eq!(stale.resolution, Resolution::CacheHit);
        assert_eq!(stale.envelope.data, Payload::Many(vec![sample_project(1)]));
        assert_eq!(store.query_count(), 1);
    }

    #[test]
    fn test_entity_type_prefix() {
        assert_eq!(<Project as Cacheable>::ENTITY_TYPE, "project");
    }
}
