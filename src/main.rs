use anyhow::Context;
use tracing_subscriber::EnvFilter;

use employee_forms::api::{self, AppState};
use employee_forms::config::StoreBackend;
use employee_forms::{config, database, is_production};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Employee Forms API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }

    if is_production!() && config.store.backend == StoreBackend::Memory {
        tracing::warn!("Memory store selected in production; data is lost on restart");
    }

    let store = database::open_store(config)
        .await
        .context("failed to open store")?;

    let app = api::app(AppState::new(store, config.security.jwt_secret.as_str()), config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
