mod catalog;
mod config;
mod db;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use catalog::{CatalogService, PgCatalogSource};
use config::AppConfig;
use error::ErrorCode;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!(".env not present; using process environment"),
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }

    let config = AppConfig::from_env()
        .inspect_err(|e| tracing::error!(code = e.error_code(), error = %e, "invalid configuration"))?;
    let pool = db::init_pool(&config.database_url, config.db_max_connections)?;

    let catalog = CatalogService::new(Arc::new(PgCatalogSource::new(pool)), config.catalog.clone());

    // Warm the cache so the first request is usually a hit.
    let warm = catalog.clone();
    tokio::spawn(async move {
        match warm.list().await {
            Ok(models) => tracing::info!(count = models.len(), "catalog warmed"),
            Err(e) => tracing::warn!(error = %e, "catalog warm-up failed; will retry on demand"),
        }
    });

    let app = routes::app(state::AppState::new(catalog));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, "roomforge listening");
    axum::serve(listener, app).await?;
    Ok(())
}
