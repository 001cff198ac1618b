//! Remote catalog source: the query joining furniture to categories.
//!
//! DESIGN
//! ======
//! `CatalogSource` is the seam between the catalog service and the remote
//! store. The production implementation runs one inner-join query against
//! Postgres; tests substitute an in-process source. A failed query is an
//! `Err`, never an empty vector, so "no furniture" and "store down" stay
//! distinguishable.

use sqlx::PgPool;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

/// Errors produced while fetching the catalog.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The query could not be executed (connection, pool, SQL error).
    #[error("catalog query failed: {0}")]
    Query(String),

    /// The query ran but a row could not be decoded.
    #[error("catalog row decode failed: {0}")]
    Decode(String),

    /// The fetch task ended without producing a result.
    #[error("catalog fetch aborted: {0}")]
    Aborted(String),
}

impl From<sqlx::Error> for FetchError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
                Self::Decode(err.to_string())
            }
            other => Self::Query(other.to_string()),
        }
    }
}

impl crate::error::ErrorCode for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Query(_) => "E_CATALOG_QUERY",
            Self::Decode(_) => "E_CATALOG_DECODE",
            Self::Aborted(_) => "E_CATALOG_ABORTED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Query(_) | Self::Aborted(_))
    }
}

/// One furniture row joined to its category, exactly as the store returns it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FurnitureRow {
    pub id: Uuid,
    pub name: String,
    pub model_type: Option<String>,
    pub default_scale: Option<serde_json::Value>,
    pub default_color: Option<String>,
    pub model_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_premium: Option<bool>,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
}

/// Query access to the remote catalog store.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every furniture row joined to its category, in store order.
    async fn fetch_furniture(&self) -> Result<Vec<FurnitureRow>, FetchError>;
}

// =============================================================================
// POSTGRES
// =============================================================================

/// `default_scale` goes through `to_jsonb` so both `float8[]` and `jsonb`
/// columns decode the same way. No `ORDER BY`: store order is preserved.
const FURNITURE_QUERY: &str = "SELECT f.id, f.name, f.model_type, to_jsonb(f.default_scale) AS default_scale,
        f.default_color, f.model_url, f.thumbnail_url, f.is_premium, f.category_id,
        c.name AS category_name, c.icon AS category_icon
 FROM furniture_models f
 INNER JOIN model_categories c ON c.id = f.category_id";

/// Catalog source backed by the shared Postgres pool.
#[derive(Clone)]
pub struct PgCatalogSource {
    pool: PgPool,
}

impl PgCatalogSource {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogSource for PgCatalogSource {
    async fn fetch_furniture(&self) -> Result<Vec<FurnitureRow>, FetchError> {
        let rows = sqlx::query_as::<_, FurnitureRow>(FURNITURE_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
