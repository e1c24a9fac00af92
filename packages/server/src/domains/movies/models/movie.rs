use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::MovieId;

/// Movie row - owned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Movie {
    pub async fn find_by_id(id: MovieId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_ids(ids: &[MovieId], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM movies WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a movie row (seeding and tests)
    pub async fn insert(name: &str, image: Option<&str>, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO movies (id, name, image) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(MovieId::new())
        .bind(name)
        .bind(image)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
