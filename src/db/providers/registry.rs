use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};

use crate::config::DatabaseConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbProviderId {
    Postgres,
    MySql,
    Sqlite,
}

impl DbProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            DbProviderId::Postgres => "postgres",
            DbProviderId::MySql => "mysql",
            DbProviderId::Sqlite => "sqlite",
        }
    }

    /// Backend named by the scheme of a connection url.
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.trim().split_once(':')?;
        match scheme.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(DbProviderId::Postgres),
            "mysql" => Some(DbProviderId::MySql),
            "sqlite" => Some(DbProviderId::Sqlite),
            _ => None,
        }
    }
}

#[async_trait]
pub trait DbProvider: Send + Sync {
    fn id(&self) -> DbProviderId;
    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection>;
    /// Per-backend session setup, run once after the pool is open.
    async fn post_connect(&self, _db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        Ok(())
    }
}

/// Pool settings shared by every backend.
pub fn pool_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);
    options
}

#[derive(Default)]
pub struct DbProviders {
    providers: HashMap<DbProviderId, Arc<dyn DbProvider>>,
}

impl DbProviders {
    pub fn with_provider(mut self, provider: Arc<dyn DbProvider>) -> Result<Self> {
        match self.providers.entry(provider.id()) {
            Entry::Occupied(slot) => bail!("{} provider registered twice", slot.key().as_str()),
            Entry::Vacant(slot) => {
                slot.insert(provider);
            }
        }
        Ok(self)
    }

    /// Provider for the backend named by `url`. Error messages carry the
    /// scheme at most, never credentials or hosts.
    pub fn resolve(&self, url: &str) -> Result<Arc<dyn DbProvider>> {
        let id = DbProviderId::from_url(url).with_context(|| {
            format!(
                "unsupported database url scheme '{}'; expected postgres://, postgresql://, mysql:// or sqlite:",
                shown_scheme(url)
            )
        })?;
        self.providers
            .get(&id)
            .cloned()
            .with_context(|| format!("no {} provider registered", id.as_str()))
    }
}

fn shown_scheme(url: &str) -> &str {
    match url.trim().split_once("://") {
        Some((scheme, _)) if !scheme.contains(['@', '/']) => scheme,
        _ => "<none>",
    }
}
