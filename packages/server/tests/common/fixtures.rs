//! Seed rows for Postgres-backed tests

use review_core::common::Role;
use review_core::domains::movies::Movie;
use review_core::domains::users::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a user with a unique email
pub async fn seed_user(pool: &PgPool, user_name: &str) -> User {
    let email = format!("{}-{}@example.com", user_name, Uuid::new_v4());
    User::insert(user_name, &email, Some("avatar.png"), Role::User, pool)
        .await
        .expect("Failed to seed user")
}

pub async fn seed_movie(pool: &PgPool, name: &str) -> Movie {
    Movie::insert(name, Some("poster.jpg"), pool)
        .await
        .expect("Failed to seed movie")
}
