use tracing_subscriber::{fmt, EnvFilter};

use greenhouse_core::Db;
use greenhouse_service::config::Config;
use greenhouse_service::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cfg = Config::from_env()?;
    let db = Db::open(&cfg.db_path)?;
    let state = AppState::new(db);
    let app = build_router(state);

    let addr = format!("{}:{}", cfg.host, cfg.port);
    tracing::info!(
        core_version = %greenhouse_core::version(),
        db = %cfg.db_path.display(),
        addr = %addr,
        "starting greenhouse-service"
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
