use automata::{
    app::{build_app, init_tracing, serve},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let app_state = AppState::init().await?;
    let config = app_state.config.clone();
    tracing::info!(database_url = %config.database_url, "connected to database");

    serve(build_app(app_state), &config).await
}
