use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use bangbang::bangbang_config::ServerConfig;
use bangbang::bangbang_db::{init_db_pool, run_migrations};
use bangbang::logging::init_tracing;
use bangbang::router::init_router;
use bangbang::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Dropping the guards stops the file writers.
    let _guards = init_tracing()?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::from_env(pool);
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
