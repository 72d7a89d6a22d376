use serde::Serialize;
use sqlx::FromRow;
use time::PrimitiveDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,              // Argon2 hash, never exposed
    pub created_at: PrimitiveDateTime, // UTC, set by the store
}
