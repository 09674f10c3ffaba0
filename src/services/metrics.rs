//! Model performance metrics.
//!
//! A static snapshot from the last offline validation run. Updated by hand
//! when the model is re-validated; there is no live metric collection.

use chrono::NaiveDate;

use crate::api::ModelMetrics;

use super::prediction::MODEL_VERSION;

/// The current published metrics.
pub fn model_metrics() -> ModelMetrics {
    ModelMetrics {
        accuracy: 0.92,
        precision: 0.89,
        recall: 0.94,
        f1_score: 0.91,
        total_predictions: 847,
        exoplanets_found: 312,
        false_positives: 89,
        validation_date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap_or_default(),
        model_version: MODEL_VERSION.to_string(),
        dataset: "Kepler + K2 + TESS".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = model_metrics();
        assert_eq!(metrics.accuracy, 0.92);
        assert_eq!(metrics.f1_score, 0.91);
        assert_eq!(metrics.total_predictions, 847);
        assert_eq!(metrics.model_version, MODEL_VERSION);
        assert!(metrics.exoplanets_found + metrics.false_positives <= metrics.total_predictions);
    }
}
