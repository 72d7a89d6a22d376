use crate::auth::repo_types::User;
use sqlx::SqlitePool;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Insert a user whose password is already hashed; returns the new `user_id`.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> sqlx::Result<i64> {
        let done = sqlx::query(
            r#"
            INSERT INTO users (username, email, password)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(done.last_insert_rowid())
    }

    #[cfg(test)]
    pub async fn count_by_email(db: &SqlitePool, email: &str) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(db)
            .await
    }
}
