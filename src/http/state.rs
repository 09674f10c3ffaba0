//! Application state for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use crate::services::PredictionService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Prediction engine instance.
    pub service: Arc<PredictionService>,
    /// Artificial delay applied to predict endpoints for demo realism.
    pub simulated_latency: Duration,
}

impl AppState {
    /// Create a new application state with the given prediction service.
    pub fn new(service: Arc<PredictionService>) -> Self {
        Self {
            service,
            simulated_latency: Duration::ZERO,
        }
    }

    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }
}
