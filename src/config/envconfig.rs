use std::{collections::HashMap, path::Path};

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";
    const LIST_SEPARATOR: &'static str = ",";
    /// Keys (lowercase, dotted) whose values are comma separated lists.
    const LIST_KEYS: &'static [&'static str] = &[];

    fn load_dotenv() {
        // Load .env from crate root (falls back to current dir if missing)
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();
        Self::from_source(None)
    }

    /// Builds the config from an explicit variable map instead of the process
    /// environment. Keys carry the same `APP_` prefix as real variables.
    fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_source(Some(vars))
    }

    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let mut environment = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .list_separator(Self::LIST_SEPARATOR)
            .try_parsing(true)
            .source(vars);
        for key in Self::LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }

        let settings = config_rs::Config::builder()
            .add_source(environment)
            .build()
            .context("failed to read environment variables for config")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::EnvConfig;
    use crate::config::{AppConfig, Environment, defaults};

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn loads_defaults_with_only_database_url() {
        let cfg = AppConfig::from_vars(vars(&[("APP_DATABASE__URL", "sqlite::memory:")]))
            .expect("config should load");

        assert_eq!(cfg.general.host, defaults::DEFAULT_HOST);
        assert_eq!(cfg.general.port, defaults::DEFAULT_PORT);
        assert_eq!(cfg.general.environment, Environment::Development);
        assert_eq!(cfg.logging.rust_log, defaults::DEFAULT_RUST_LOG);
        let database = cfg.database().expect("database config");
        assert_eq!(database.url, "sqlite::memory:");
        assert_eq!(database.max_connections, defaults::DEFAULT_DB_MAX_CONNECTIONS);
        assert_eq!(cfg.cors.allowed_origins, vec!["http://localhost:4321"]);
    }

    #[test]
    fn reads_nested_values_and_lists() {
        let cfg = AppConfig::from_vars(vars(&[
            ("APP_DATABASE__URL", "postgres://localhost/todos"),
            ("APP_GENERAL__PORT", "9090"),
            ("APP_GENERAL__ENVIRONMENT", "production"),
            (
                "APP_CORS__ALLOWED_ORIGINS",
                "http://localhost:4321,https://todo.example.com",
            ),
        ]))
        .expect("config should load");

        assert_eq!(cfg.general.port, 9090);
        assert_eq!(cfg.general.environment, Environment::Production);
        assert_eq!(
            cfg.cors.allowed_origins,
            vec!["http://localhost:4321", "https://todo.example.com"]
        );
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let err = AppConfig::from_vars(HashMap::new()).expect_err("config should fail");
        assert!(format!("{err:#}").contains("database.url is required"));
    }

    #[test]
    fn rejects_invalid_port() {
        let err = AppConfig::from_vars(vars(&[
            ("APP_DATABASE__URL", "sqlite::memory:"),
            ("APP_GENERAL__PORT", "not-a-port"),
        ]))
        .expect_err("config should fail");
        assert!(format!("{err:#}").contains("failed to deserialize"));
    }
}
