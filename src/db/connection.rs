use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::default_registry;
use crate::config::DatabaseConfig;

/// Opens the pool for `cfg.url` and makes sure the schema exists before
/// returning.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let providers = default_registry()?;
    let provider = providers.resolve(&cfg.url)?;

    info!(provider = provider.id().as_str(), "connecting to database");
    let db = provider
        .connect(cfg)
        .await
        .context("failed to connect to database")?;
    provider
        .post_connect(&db, cfg)
        .await
        .context("failed to prepare database connection")?;

    migrate(&db).await?;
    Ok(db)
}

pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry("todo_backend::db::entities::*")
        .sync(db)
        .await
        .context("failed to migrate database schema")?;
    Ok(())
}
