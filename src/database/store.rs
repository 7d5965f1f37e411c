use std::future::Future;
use std::marker::PhantomData;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use thiserror::Error;

use crate::cache::Cacheable;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 持久化的内容类型
///
/// 每张表都带 `deleted_at` 软删除列，查询时会排除已删除的行。
pub trait Entity: Cacheable + for<'r> FromRow<'r, PgRow> + Unpin {
    const TABLE: &'static str;

    /// 查询时选取的列，需与 `FromRow` 字段一致
    const COLUMNS: &'static str;

    /// 创建请求体
    type Draft: Send + 'static;

    fn insert(
        pool: &PgPool,
        draft: Self::Draft,
    ) -> impl Future<Output = Result<Self, sqlx::Error>> + Send;
}

/// 以数字 id 标识记录的存储
pub trait EntityStore: Send + Sync {
    type Record: Cacheable;
    type Draft: Send;

    fn insert(&self, draft: Self::Draft)
    -> impl Future<Output = StoreResult<Self::Record>> + Send;

    /// 找不到记录时返回 `StoreError::NotFound`
    fn find_by_id(&self, id: &str) -> impl Future<Output = StoreResult<Self::Record>> + Send;

    fn find_all(&self) -> impl Future<Output = StoreResult<Vec<Self::Record>>> + Send;
}

/// PostgreSQL 实体存储
pub struct PgStore<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgStore<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for PgStore<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<E: Entity> EntityStore for PgStore<E> {
    type Record = E;
    type Draft = E::Draft;

    async fn insert(&self, draft: E::Draft) -> StoreResult<E> {
        Ok(E::insert(&self.pool, draft).await?)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<E> {
        // 非数字 id 不可能存在
        let Ok(id) = id.parse::<i64>() else {
            return Err(StoreError::NotFound);
        };

        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            E::COLUMNS,
            E::TABLE
        );
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn find_all(&self) -> StoreResult<Vec<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE deleted_at IS NULL ORDER BY id",
            E::COLUMNS,
            E::TABLE
        );
        let records = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(records)
    }
}
