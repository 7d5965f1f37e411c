// 测试用的内存缓存和内存存储

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::time::Instant;

use crate::cache::{CacheError, CacheResult, CacheStore};
use crate::database::{EntityStore, StoreError, StoreResult};
use crate::routes::project::Project;

pub fn sample_project(id: i64) -> Project {
    let at = Utc
        .with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    Project {
        id,
        created_at: at,
        updated_at: at,
        image_title: format!("Screenshot {}", id),
        image: format!("https://img.example.com/{}.png", id),
        project_title: format!("Project {}", id),
        project_description: "A small side project".to_string(),
        repository_link: format!("https://github.com/example/project-{}", id),
    }
}

/// 带过期时间的内存缓存，时间取自 tokio 时钟
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, (String, Option<Instant>)>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    fail_writes: bool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), None));
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// 成功写入的次数
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().unwrap();
        let expired = matches!(entries.get(key), Some((_, Some(at))) if Instant::now() >= *at);
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        if self.fail_writes {
            return Err(CacheError::Backend("read-only replica".to_string()));
        }
        let expires_at = (!ttl.is_zero()).then(|| Instant::now() + ttl);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expires_at));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 无法连接的缓存
#[derive(Clone, Copy)]
pub struct UnreachableCache;

impl CacheStore for UnreachableCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }
}

/// 记录查询次数的内存项目存储
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<Project>>>,
    queries: Arc<AtomicUsize>,
    fail: bool,
}

impl MemoryStore {
    pub fn with_records(records: Vec<Project>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            ..Self::default()
        }
    }

    /// 每次查询都返回数据库错误
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn begin_query(&self) -> StoreResult<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

impl EntityStore for MemoryStore {
    type Record = Project;
    type Draft = Project;

    async fn insert(&self, draft: Project) -> StoreResult<Project> {
        self.records.lock().unwrap().push(draft.clone());
        Ok(draft)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Project> {
        self.begin_query()?;
        let id: i64 = id.parse().map_err(|_| StoreError::NotFound)?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_all(&self) -> StoreResult<Vec<Project>> {
        self.begin_query()?;
        Ok(self.records.lock().unwrap().clone())
    }
}
