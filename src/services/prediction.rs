//! Prediction service.
//!
//! This is the hot-swap point for a real model: the interface (sample id in,
//! [`AnalysisResponse`] out) stays stable while the implementation is
//! currently a synthetic generator. Classification follows the catalog's
//! ground truth, confidence is derived from a stable per-sample hash, and
//! the explanation comes from the SHAP-style explainer.

use std::collections::BTreeMap;
use std::time::Instant;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{
    AnalysisMetadata, AnalysisResponse, AnomalyKind, Classification, SampleCatalog, SampleRecord,
    TruthLabel,
};

use super::explainer;
use super::light_curve::{self, GeneratedCurve, NoiseSource};

/// Version tag reported with every prediction.
pub const MODEL_VERSION: &str = "CosmicNet-v1.0";

const DEFAULT_PERIOD_DAYS: f64 = 10.0;
const DEFAULT_TRANSIT_DEPTH: f64 = 0.01;
const DEFAULT_TRANSIT_DURATION_HOURS: f64 = 3.0;

/// Prediction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// The requested sample id is not in the catalog.
    #[error("Sample {0} not found")]
    UnknownSample(String),
}

/// Stateless analysis engine over the built-in catalog.
#[derive(Debug, Clone)]
pub struct PredictionService {
    catalog: &'static SampleCatalog,
}

impl Default for PredictionService {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionService {
    pub fn new() -> Self {
        Self {
            catalog: SampleCatalog::builtin(),
        }
    }

    pub fn catalog(&self) -> &SampleCatalog {
        self.catalog
    }

    /// Analyze a catalog sample.
    pub fn predict(&self, sample_id: &str) -> Result<AnalysisResponse, PredictionError> {
        let started = Instant::now();
        let sample = self
            .catalog
            .get(sample_id)
            .ok_or_else(|| PredictionError::UnknownSample(sample_id.to_string()))?;

        let mut response = self.predict_sample(sample);
        response.processing_time_ms = started.elapsed().as_millis() as u64;
        response.sanitize();
        Ok(response)
    }

    /// Analyze an uploaded file.
    ///
    /// File contents are not parsed yet; the upload's SHA-256 digest routes
    /// deterministically to a catalog sample whose prediction stands in for
    /// the real analysis.
    pub fn predict_upload(&self, contents: &[u8]) -> Result<AnalysisResponse, PredictionError> {
        let digest = Sha256::digest(contents);
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        let index = (u64::from_be_bytes(bytes) as usize) % self.catalog.len();

        let sample_id = self
            .catalog
            .iter()
            .nth(index)
            .map(|s| s.id)
            .unwrap_or("noise-003");

        tracing::debug!(
            checksum = %hex::encode(digest),
            sample_id,
            "routing upload to catalog sample"
        );
        self.predict(sample_id)
    }

    fn predict_sample(&self, sample: &SampleRecord) -> AnalysisResponse {
        let hash = stable_hash(sample.id);
        let mut noise = NoiseSource::from_label(sample.id);

        let (curve, classification, confidence) = match sample.truth {
            TruthLabel::Confirmed => {
                let params = &sample.params;
                let curve = light_curve::confirmed_planet(
                    &mut noise,
                    params.period_days.unwrap_or(DEFAULT_PERIOD_DAYS),
                    params.transit_depth.unwrap_or(DEFAULT_TRANSIT_DEPTH),
                    params
                        .transit_duration_hours
                        .unwrap_or(DEFAULT_TRANSIT_DURATION_HOURS),
                    params.planet_radius_earth,
                );
                let confidence = 0.90 + (hash % 8) as f64 / 100.0;
                (curve, Classification::Exoplanet, confidence)
            }
            TruthLabel::Candidate => {
                let curve = light_curve::candidate(&mut noise);
                // Candidates split: most read as planets at reduced
                // confidence, the rest as ambiguous rejections.
                let bucket = hash % 100;
                if bucket < 70 {
                    let confidence = 0.60 + (bucket % 20) as f64 / 100.0;
                    (curve, Classification::Exoplanet, confidence)
                } else {
                    let confidence = 0.55 + (bucket % 15) as f64 / 100.0;
                    (curve, Classification::NoPlanet, confidence)
                }
            }
            TruthLabel::FalsePositive => {
                let curve = light_curve::false_positive(
                    &mut noise,
                    sample.params.anomaly.unwrap_or(AnomalyKind::Noise),
                );
                let confidence = 0.85 + (hash % 12) as f64 / 100.0;
                (curve, Classification::NoPlanet, confidence)
            }
        };

        self.assemble(sample, curve, classification, confidence)
    }

    fn assemble(
        &self,
        sample: &SampleRecord,
        curve: GeneratedCurve,
        classification: Classification,
        confidence: f64,
    ) -> AnalysisResponse {
        let mut class_probabilities = BTreeMap::new();
        class_probabilities.insert(classification.as_str().to_string(), confidence);
        class_probabilities.insert(
            classification.other().as_str().to_string(),
            1.0 - confidence,
        );

        let shap = explainer::explain(
            &curve.flux,
            &curve.time,
            classification,
            confidence,
            &curve.transits,
        );

        AnalysisResponse {
            classification,
            confidence_score: confidence,
            class_probabilities,
            light_curve_data: curve.flux,
            time_points: curve.time,
            highlighted_regions: curve.transits,
            analysis: AnalysisMetadata {
                orbital_period: sample.params.period_days,
                transit_duration: sample.params.transit_duration_hours,
                planet_radius: sample.params.planet_radius_earth,
                star_name: sample.name.to_string(),
                discovery_method: "Transit".to_string(),
            },
            shap_explanation: Some(shap),
            model_version: MODEL_VERSION.to_string(),
            processing_time_ms: 0,
        }
    }
}

/// Platform-independent hash of a sample id (first 8 bytes of SHA-256).
fn stable_hash(value: &str) -> u64 {
    let digest = Sha256::digest(value.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
