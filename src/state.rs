//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the catalog service; the service owns its cache and the
//! source it fetches from, so cloning the state is cheap.

use crate::catalog::CatalogService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use tokio::sync::Notify;
    use uuid::Uuid;

    use super::*;
    use crate::catalog::source::FurnitureRow;
    use crate::catalog::{CatalogConfig, CatalogSource, FetchError};

    /// Scripted in-process catalog source.
    ///
    /// Each fetch pops the next scripted response; once the script runs out
    /// it keeps answering with `fallback`. With a gate installed, every fetch
    /// parks until `release()` is called, which holds it in flight.
    pub struct MockSource {
        responses: Mutex<VecDeque<Result<Vec<FurnitureRow>, FetchError>>>,
        fallback: Vec<FurnitureRow>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl MockSource {
        #[must_use]
        pub fn new(fallback: Vec<FurnitureRow>) -> Self {
            Self { responses: Mutex::new(VecDeque::new()), fallback, calls: AtomicUsize::new(0), gate: None }
        }

        #[must_use]
        pub fn gated(mut self) -> Self {
            self.gate = Some(Arc::new(Notify::new()));
            self
        }

        #[must_use]
        pub fn then(self, response: Result<Vec<FurnitureRow>, FetchError>) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Let one parked fetch finish.
        pub fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }
    }

    #[async_trait::async_trait]
    impl CatalogSource for MockSource {
        async fn fetch_furniture(&self) -> Result<Vec<FurnitureRow>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let next = self.responses.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(self.fallback.clone()))
        }
    }

    /// A complete row as the store would return it.
    #[must_use]
    pub fn furniture_row(name: &str) -> FurnitureRow {
        FurnitureRow {
            id: Uuid::new_v4(),
            name: name.into(),
            model_type: Some("chair".into()),
            default_scale: Some(json!([1.0, 1.0, 1.0])),
            default_color: Some("#8b5a2b".into()),
            model_url: None,
            thumbnail_url: None,
            is_premium: Some(false),
            category_id: Uuid::new_v4(),
            category_name: Some("Seating".into()),
            category_icon: Some("armchair".into()),
        }
    }

    /// A row with every optional column null.
    #[must_use]
    pub fn sparse_row(name: &str) -> FurnitureRow {
        FurnitureRow {
            model_type: None,
            default_scale: None,
            default_color: None,
            is_premium: None,
            category_name: None,
            category_icon: None,
            ..furniture_row(name)
        }
    }

    /// Catalog service over `source` with default freshness windows.
    #[must_use]
    pub fn catalog_with(source: Arc<MockSource>) -> CatalogService {
        CatalogService::new(source, CatalogConfig::default())
    }

    /// App state over `source` with default freshness windows.
    #[must_use]
    pub fn test_app_state(source: Arc<MockSource>) -> AppState {
        AppState::new(catalog_with(source))
    }

    /// Yield until `source` has seen `n` fetches, so a gated fetch is known
    /// to be parked in flight.
    pub async fn wait_for_calls(source: &MockSource, n: usize) {
        for _ in 0..1_000 {
            if source.calls() >= n {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("source saw {} calls, expected {n}", source.calls());
    }
}
