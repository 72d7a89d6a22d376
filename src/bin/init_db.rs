use std::process::ExitCode;

use automata::{app::init_tracing, config::DEFAULT_DATABASE_URL, db};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());

    match run(&database_url).await {
        Ok(()) => {
            tracing::info!(%database_url, "database tables created successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, %database_url, "error creating tables");
            ExitCode::FAILURE
        }
    }
}

async fn run(database_url: &str) -> anyhow::Result<()> {
    let pool = db::connect(database_url).await?;
    let result = db::init_schema(&pool).await;
    pool.close().await;
    result
}
