use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{Role, UserId};

/// User row - owned by the account service
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Display fields attached to reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub user_name: String,
    pub profile_image: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            profile_image: user.profile_image,
        }
    }
}

// =============================================================================
// SQL Queries
// =============================================================================

impl User {
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a user row (seeding and tests; accounts are normally created upstream)
    pub async fn insert(
        user_name: &str,
        email: &str,
        profile_image: Option<&str>,
        role: Role,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, user_name, email, profile_image, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(user_name)
        .bind(email)
        .bind(profile_image)
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

impl UserProfile {
    /// Batch-load display profiles for review enrichment
    pub async fn find_by_ids(ids: &[UserId], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, user_name, profile_image FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
