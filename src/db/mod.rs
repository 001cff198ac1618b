//! Database pool initialization.
//!
//! SYSTEM CONTEXT
//! ==============
//! The furniture catalog lives in a Postgres database owned by another
//! service. This process only reads from it, so no migrations run here.
//! The pool connects lazily: an unreachable store at startup surfaces as a
//! catalog fetch error instead of stopping the process.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the shared `PostgreSQL` pool without opening a connection.
///
/// # Errors
///
/// Returns an error if `database_url` cannot be parsed.
pub fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)
}
