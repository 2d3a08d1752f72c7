use std::sync::Arc;

use sitepulse_core::{config::Config, store::VisitStore};

use crate::geo::Geolocate;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// Both collaborators sit behind traits so integration tests can swap in an
/// in-memory store and a canned geolocator.
pub struct AppState {
    /// The visit log backend. There is deliberately no in-memory cache in
    /// front of it; every request round-trips through the store.
    pub store: Arc<dyn VisitStore>,

    /// IP → approximate-location lookup. Offline, best-effort.
    pub geo: Arc<dyn Geolocate>,

    /// Parsed configuration, loaded once at startup from environment variables.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn VisitStore>, geo: Arc<dyn Geolocate>, config: Config) -> Self {
        Self {
            store,
            geo,
            config: Arc::new(config),
        }
    }
}
