//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hosts the furniture catalog read model over HTTP. Every route is a thin
//! consumer of `CatalogService`; the service decides freshness and
//! de-duplication, the handlers only pick a policy and shape the response.

pub mod furniture;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::CacheStatus;
use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/furniture", get(furniture::list_furniture))
        .route("/api/furniture/invalidate", post(furniture::invalidate_furniture))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    /// Catalog cache status; `None` until the first fetch starts.
    pub catalog: Option<CacheStatus>,
}

/// `GET /healthz`: liveness plus the catalog cache status.
async fn healthz(State(state): State<AppState>) -> Json<Health> {
    Json(Health { status: "ok", catalog: state.catalog.status() })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
