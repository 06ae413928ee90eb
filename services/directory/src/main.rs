use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use directory_core::config::Config as _;
use directory_core::tracing::init_tracing;
use directory_migration::{Migrator, MigratorTrait};

use directory::config::DirectoryConfig;
use directory::router::build_router;
use directory::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = DirectoryConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None).await.context("run migrations")?;
        info!("migrations applied");
    }

    let state = AppState { db };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.directory_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("directory service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
