use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    match cfg.database.as_ref() {
        None => errors.push("database.url is required (set APP_DATABASE__URL)".to_string()),
        Some(database) => {
            if database.url.trim().is_empty() {
                errors.push("database.url must not be empty".to_string());
            }

            if database.max_connections == 0 {
                errors.push("database.max_connections must be > 0".to_string());
            }

            if database.min_idle > database.max_connections {
                errors.push(format!(
                    "database.min_idle ({}) must be <= database.max_connections ({})",
                    database.min_idle, database.max_connections
                ));
            }
        }
    }

    let cors = &cfg.cors;
    let cors_lists = [
        ("cors.allowed_origins", &cors.allowed_origins),
        ("cors.allowed_methods", &cors.allowed_methods),
        ("cors.allowed_headers", &cors.allowed_headers),
        ("cors.expose_headers", &cors.expose_headers),
    ];
    for (key, values) in cors_lists {
        if values.iter().any(|value| value.trim().is_empty()) {
            errors.push(format!("{key} must not contain empty entries"));
        }
        if cors.allow_credentials && values.iter().any(|value| value.trim() == "*") {
            errors.push(format!(
                "{key} must not contain '*' when cors.allow_credentials is true"
            ));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
