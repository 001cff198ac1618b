//! Furniture catalog routes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::{FetchError, FurnitureModel, by_category};
use crate::error::ErrorBody;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Serve the cached copy immediately and refresh in the background.
    pub stale: Option<bool>,
    /// Only models in this category, in catalog order.
    pub category_id: Option<Uuid>,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

/// `GET /api/furniture`: the normalized catalog in store order.
pub async fn list_furniture(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<FurnitureModel>>, ApiError> {
    let catalog = if params.stale.unwrap_or(false) {
        state.catalog.list_stale_while_revalidate().await
    } else {
        state.catalog.list().await
    }
    .map_err(fetch_error_response)?;

    let models = match params.category_id {
        Some(category_id) => by_category(&catalog, category_id)
            .into_iter()
            .cloned()
            .collect(),
        None => catalog.to_vec(),
    };
    Ok(Json(models))
}

/// `POST /api/furniture/invalidate`: mark the catalog stale.
pub async fn invalidate_furniture(State(state): State<AppState>) -> StatusCode {
    state.catalog.invalidate();
    StatusCode::NO_CONTENT
}

pub(crate) fn fetch_error_to_status(err: &FetchError) -> StatusCode {
    match err {
        FetchError::Query(_) | FetchError::Decode(_) => StatusCode::BAD_GATEWAY,
        FetchError::Aborted(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn fetch_error_response(err: FetchError) -> ApiError {
    tracing::warn!(error = %err, "furniture list failed");
    (fetch_error_to_status(&err), Json(ErrorBody::from_error(&err)))
}

#[cfg(test)]
#[path = "furniture_test.rs"]
mod tests;
