use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::cache::Cacheable;
use crate::database::Entity;

/// 访客留言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Cacheable for Contact {
    const ENTITY_TYPE: &'static str = "contact";
}

impl Entity for Contact {
    const TABLE: &'static str = "contacts";
    const COLUMNS: &'static str = "id, created_at, updated_at, name, email, subject, message";
    type Draft = CreateContactRequest;

    async fn insert(pool: &PgPool, draft: CreateContactRequest) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, subject, message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id, created_at, updated_at, name, email, subject, message
            "#,
        )
        .bind(draft.name)
        .bind(draft.email)
        .bind(draft.subject)
        .bind(draft.message)
        .fetch_one(pool)
        .await
    }
}
