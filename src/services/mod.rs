//! Service layer for business logic.
//!
//! This module sits between the HTTP handlers and the domain models:
//! synthetic light-curve generation, SHAP-style explanation, the
//! prediction service that ties them together, and the published model
//! metrics.

pub mod explainer;

pub mod light_curve;

pub mod metrics;

pub mod prediction;

pub use metrics::model_metrics;
pub use prediction::{PredictionError, PredictionService, MODEL_VERSION};
