use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parent_copilot_backend::ai::gemini::GeminiModel;
use parent_copilot_backend::ai::AiService;
use parent_copilot_backend::config::AppConfig;
use parent_copilot_backend::routes::{api_router, AppState};
use parent_copilot_backend::scheduler::ReminderSweeper;
use parent_copilot_backend::storage::JsonStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    info!("Opening data store at {}", config.data_file.display());
    let store = JsonStore::open(&config.data_file)?;

    if config.gemini_api_key.is_none() {
        info!("No GEMINI_API_KEY configured; AI endpoints will serve fallback content");
    }
    let model = GeminiModel::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    let ai = AiService::new(Arc::new(model));

    ReminderSweeper::new(store.clone()).spawn();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    let mut app = api_router(AppState { store, ai }).layer(cors);
    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown handler: {e}");
        return;
    }
    info!("Shutting down");
}
