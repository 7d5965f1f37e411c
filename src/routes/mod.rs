pub mod about;
pub mod contact;
pub mod project;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::AppState;
use crate::cache::{CacheStore, Cacheable, ReadThroughResolver, ResolveError};
use crate::database::{Entity, EntityStore};
use crate::error::ApiError;
use crate::result::Envelope;

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// 空 id 表示查询全部；非数字 id 不可能存在，直接返回 404
    ///
    /// 数字 id 统一成规范写法，`007`、`+7` 和 `7` 使用同一个缓存键。
    pub fn selector(&self) -> Result<Option<String>, ApiError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(id) => id
                .parse::<i64>()
                .map(|id| Some(id.to_string()))
                .map_err(|_| ApiError::NotFound("Content not found")),
        }
    }
}

/// 三种内容共用的读接口
pub async fn get_entity<E: Entity>(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Envelope<E>>, ApiError> {
    read_entity(&state.resolver::<E>(), &query).await
}

pub async fn read_entity<S, C>(
    resolver: &ReadThroughResolver<S, C>,
    query: &IdQuery,
) -> Result<Json<Envelope<S::Record>>, ApiError>
where
    S: EntityStore,
    C: CacheStore,
{
    // TTL 配置错误优先于 id 校验
    resolver.ttl().map_err(ResolveError::from)?;
    let id = query.selector()?;

    let resolved = resolver.resolve(id.as_deref()).await?;
    tracing::debug!(
        entity = <S::Record as Cacheable>::ENTITY_TYPE,
        resolution = ?resolved.resolution,
        records = resolved.envelope.data.len(),
        "Resolved read request"
    );
    Ok(Json(resolved.envelope))
}
