use sqlx::SqlitePool;

use super::dto::SearchHistoryItem;

/// Insert a history row stamped by the store; returns the new `history_id`.
pub async fn insert(db: &SqlitePool, user_id: i64, tool_name: &str) -> sqlx::Result<i64> {
    let done = sqlx::query(
        r#"
        INSERT INTO search_history (user_id, tool_name)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(tool_name)
    .execute(db)
    .await?;
    Ok(done.last_insert_rowid())
}

/// All history of one user, newest first.
pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<SearchHistoryItem>> {
    sqlx::query_as::<_, SearchHistoryItem>(
        r#"
        SELECT tool_name, search_time
          FROM search_history
         WHERE user_id = ?
         ORDER BY search_time DESC, history_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::repo_types::User, db};

    async fn pool_with_users() -> SqlitePool {
        let db = db::memory_pool().await;
        db::init_schema(&db).await.unwrap();
        User::create(&db, "alice", "alice@x.com", "h").await.unwrap();
        User::create(&db, "bob", "bob@x.com", "h").await.unwrap();
        db
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let db = pool_with_users().await;
        assert_eq!(insert(&db, 1, "scanner").await.unwrap(), 1);
        assert_eq!(insert(&db, 2, "fuzzer").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn lists_newest_first_and_only_own_rows() {
        let db = pool_with_users().await;
        insert(&db, 1, "first").await.unwrap();
        insert(&db, 2, "bobs").await.unwrap();
        insert(&db, 1, "second").await.unwrap();
        sqlx::query(
            "INSERT INTO search_history (user_id, tool_name, search_time) VALUES (1, 'old', '2000-01-01 00:00:00')",
        )
        .execute(&db)
        .await
        .unwrap();

        let names: Vec<String> = list_by_user(&db, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.tool_name)
            .collect();
        assert_eq!(names, vec!["second", "first", "old"]);
    }

    #[tokio::test]
    async fn empty_history_is_empty_vec() {
        let db = pool_with_users().await;
        assert!(list_by_user(&db, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_for_unknown_user_fails() {
        let db = pool_with_users().await;
        assert!(insert(&db, 99, "scanner").await.is_err());
    }
}
