use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::cache::Cacheable;
use crate::database::Entity;

/// 项目描述的最大长度（字符）
pub const MAX_PROJECT_DESCRIPTION: usize = 270;

/// 作品集项目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_title: String,
    pub image: String,
    pub project_title: String,
    pub project_description: String,
    pub repository_link: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub image_title: String,
    pub image: String,
    pub project_title: String,
    pub project_description: String,
    pub repository_link: String,
}

impl CreateProjectRequest {
    pub fn description_too_long(&self) -> bool {
        self.project_description.chars().count() > MAX_PROJECT_DESCRIPTION
    }
}

impl Cacheable for Project {
    const ENTITY_TYPE: &'static str = "project";
}

impl Entity for Project {
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static str = "id, created_at, updated_at, image_title, image, \
                                   project_title, project_description, repository_link";
    type Draft = CreateProjectRequest;

    async fn insert(pool: &PgPool, draft: CreateProjectRequest) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                image_title, image, project_title, project_description, repository_link,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING
                id, created_at, updated_at, image_title, image,
                project_title, project_description, repository_link
            "#,
        )
        .bind(draft.image_title)
        .bind(draft.image)
        .bind(draft.project_title)
        .bind(draft.project_description)
        .bind(draft.repository_link)
        .fetch_one(pool)
        .await
    }
}
