//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::inference::InferenceBackend;

/// Shared application state passed to all handlers.
///
/// The backend is loaded once at startup and shared read-only; `None` means
/// the load failed and every prediction request is answered with the
/// unavailable error until the process restarts.
#[derive(Clone)]
pub struct AppState {
    /// Loaded inference backend, if startup succeeded
    pub backend: Option<Arc<dyn InferenceBackend>>,
    /// Immutable service configuration
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Create a new application state with the given backend and config.
    pub fn new(backend: Option<Arc<dyn InferenceBackend>>, config: ServiceConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}
