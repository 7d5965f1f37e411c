use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::cache::Cacheable;
use crate::database::Entity;

/// 个人简介
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAboutRequest {
    pub content: String,
}

impl Cacheable for About {
    const ENTITY_TYPE: &'static str = "about";
}

impl Entity for About {
    const TABLE: &'static str = "abouts";
    const COLUMNS: &'static str = "id, created_at, updated_at, content";
    type Draft = CreateAboutRequest;

    async fn insert(pool: &PgPool, draft: CreateAboutRequest) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, About>(
            r#"
            INSERT INTO abouts (content, created_at, updated_at)
            VALUES ($1, NOW(), NOW())
            RETURNING id, created_at, updated_at, content
            "#,
        )
        .bind(draft.content)
        .fetch_one(pool)
        .await
    }
}
