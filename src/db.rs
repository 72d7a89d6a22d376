use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_SEARCH_HISTORY: &str = r#"
    CREATE TABLE IF NOT EXISTS search_history (
        history_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        tool_name TEXT NOT NULL,
        search_time DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users (user_id)
    )
"#;

/// Opens a pool on the SQLite file named by `database_url`, creating the file if needed.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url {database_url}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .context("connect to database")?;
    Ok(pool)
}

/// Creates `users` and `search_history` if they are absent.
///
/// Both statements run in one transaction, so a failure leaves the store as it was.
pub async fn init_schema(db: &SqlitePool) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("begin schema tx")?;
    sqlx::query(CREATE_USERS)
        .execute(&mut *tx)
        .await
        .context("create users table")?;
    sqlx::query(CREATE_SEARCH_HISTORY)
        .execute(&mut *tx)
        .await
        .context("create search_history table")?;
    tx.commit().await.context("commit schema tx")?;
    Ok(())
}

/// Single-connection in-memory store; every connection to `:memory:` is a separate database.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("memory url parses")
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite")
}
