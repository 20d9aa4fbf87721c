use std::net::SocketAddr;

use anyhow::Context;

use todo_backend::{
    config::{AppConfig, LoggingConfig},
    db::connection,
    logging::init_tracing,
    routes::app,
    services::ServiceContext,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env();
    // Install logging before reporting a config error.
    match cfg.as_ref() {
        Ok(cfg) => init_tracing(&cfg.logging),
        Err(_) => init_tracing(&LoggingConfig::default()),
    }
    let cfg = cfg?;

    let db = connection::connect(cfg.database()?).await?;
    let services = ServiceContext::new(&db);

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .context("invalid host/port")?;
    let environment = cfg.general.environment;
    let state = AppState::new(cfg, services);
    let app = app(state)?;

    tracing::info!("starting server on {} ({})", addr, environment);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .context("server stopped")?;
    Ok(())
}
