pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 2;

pub const DEFAULT_CORS_ALLOWED_ORIGINS: &[&str] = &["http://localhost:4321"];
pub const DEFAULT_CORS_ALLOWED_METHODS: &[&str] =
    &["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];
pub const DEFAULT_CORS_ALLOWED_HEADERS: &[&str] =
    &["Origin", "Content-Type", "Accept", "Authorization"];
pub const DEFAULT_CORS_EXPOSE_HEADERS: &[&str] = &["Content-Length"];
pub const DEFAULT_CORS_ALLOW_CREDENTIALS: bool = true;
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 12 * 60 * 60;
