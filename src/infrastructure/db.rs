use crate::infrastructure::config::PoolSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        "connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .connect(database_url)
        .await
}

/// Connects and brings the schema up to date.
pub async fn connect_and_migrate(
    database_url: &str,
    settings: &PoolSettings,
) -> anyhow::Result<DbPool> {
    let pool = create_pool(database_url, settings).await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}
