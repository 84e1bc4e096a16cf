use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use commeria::config::AppConfig;
use commeria::db;
use commeria::services::ai::ollama::OllamaProvider;
use commeria::services::catalog::CatalogClient;
use commeria::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    tracing::info!(
        "using Ollama (url: {}, model: {})",
        config.ollama_url,
        config.ollama_model
    );
    let llm = OllamaProvider::new(
        config.ollama_url.clone(),
        config.ollama_model.clone(),
        config.llm_timeout,
    )?;
    let catalog = CatalogClient::new(config.catalog_url.clone(), config.catalog_timeout)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        llm: Box::new(llm),
        catalog,
    });

    let app = commeria::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
