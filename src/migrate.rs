//! Database migration utilities

use mealvote::Config;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions};
use sqlx_migrator::migrator::{Migrate, Plan};

/// Create the database if needed and apply every pending migration
#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!(url = %config.database.url, "database does not exist, creating");
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    let mut conn = pool.acquire().await?;
    mealvote_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    drop(conn);

    pool.close().await;

    tracing::info!("migrations completed");

    Ok(())
}

/// Drop the database if it exists and recreate it with migrations
#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!(url = %config.database.url, "dropping existing database");
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("database does not exist, nothing to drop");
    }

    migrate(config).await
}
