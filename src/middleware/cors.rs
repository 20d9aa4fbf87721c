use std::time::Duration;

use anyhow::{Context, Result, bail};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer, ExposeHeaders};

use crate::config::CorsConfig;

const WILDCARD: &str = "*";

pub fn cors_layer(cfg: &CorsConfig) -> Result<CorsLayer> {
    let has_wildcard = [
        &cfg.allowed_origins,
        &cfg.allowed_methods,
        &cfg.allowed_headers,
        &cfg.expose_headers,
    ]
    .iter()
    .any(|values| is_wildcard(values));
    if cfg.allow_credentials && has_wildcard {
        bail!("cors wildcards cannot be combined with allow_credentials");
    }

    let origins = if is_wildcard(&cfg.allowed_origins) {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(parse_all(&cfg.allowed_origins, |value| {
            HeaderValue::from_str(value).context("invalid cors origin")
        })?)
    };

    let methods = if is_wildcard(&cfg.allowed_methods) {
        AllowMethods::from(Any)
    } else {
        AllowMethods::list(parse_all(&cfg.allowed_methods, |value| {
            Method::from_bytes(value.to_ascii_uppercase().as_bytes())
                .context("invalid cors method")
        })?)
    };

    let headers = if is_wildcard(&cfg.allowed_headers) {
        AllowHeaders::from(Any)
    } else {
        AllowHeaders::list(parse_all(&cfg.allowed_headers, parse_header_name)?)
    };

    let exposed = if is_wildcard(&cfg.expose_headers) {
        ExposeHeaders::from(Any)
    } else {
        ExposeHeaders::list(parse_all(&cfg.expose_headers, parse_header_name)?)
    };

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .expose_headers(exposed)
        .allow_credentials(cfg.allow_credentials)
        .max_age(Duration::from_secs(cfg.max_age_secs)))
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value.trim() == WILDCARD)
}

fn parse_header_name(value: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(value.as_bytes()).context("invalid cors header name")
}

fn parse_all<T>(values: &[String], parse: impl Fn(&str) -> Result<T>) -> Result<Vec<T>> {
    values
        .iter()
        .map(|value| {
            let value = value.trim();
            parse(value).with_context(|| format!("'{value}'"))
        })
        .collect()
}
