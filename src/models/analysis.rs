//! Analysis result types.
//!
//! These types define the wire shape of a prediction: the binary verdict,
//! the synthetic light curve, detected transit regions, and the optional
//! SHAP-style explanation. They are serialized as-is by the HTTP layer and
//! deserialized unchanged by the API client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Exoplanet,
    NoPlanet,
}

impl Classification {
    /// Wire name of the class, as used in `class_probabilities` keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Exoplanet => "exoplanet",
            Classification::NoPlanet => "no_planet",
        }
    }

    /// The opposite class.
    pub fn other(&self) -> Classification {
        match self {
            Classification::Exoplanet => Classification::NoPlanet,
            Classification::NoPlanet => Classification::Exoplanet,
        }
    }
}

/// A detected transit window, expressed as indices into the light curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitRegion {
    pub start_index: usize,
    pub end_index: usize,
    /// Maximum flux dip inside the window, as a fraction of baseline.
    pub depth: f64,
}

/// Descriptive metadata shown alongside the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Orbital period in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbital_period: Option<f64>,
    /// Transit duration in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_duration: Option<f64>,
    /// Planet radius in Earth radii.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet_radius: Option<f64>,
    pub star_name: String,
    pub discovery_method: String,
}

/// One high-importance time span in the explanation, for display ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionRegion {
    /// Start of the span in days.
    pub start_time: f64,
    /// End of the span in days.
    pub end_time: f64,
    /// Mean signed contribution over the span.
    pub importance: f64,
    pub contribution_percent: f64,
}

/// SHAP-style explainability payload.
///
/// `feature_importance` aligns index-for-index with the light curve's
/// `time_points`. Positive values support the predicted class, negative
/// values oppose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapExplanation {
    pub feature_importance: Vec<f64>,
    pub top_contributing_regions: Vec<ContributionRegion>,
    pub explanation_summary: String,
    /// Expected model output with no feature information.
    pub base_value: f64,
    /// Final model output for this signal.
    pub predicted_value: f64,
}

/// Complete analysis result for one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub classification: Classification,
    /// Confidence in the predicted class, in [0, 1].
    pub confidence_score: f64,
    /// Probability per class name; the two entries sum to 1.
    pub class_probabilities: BTreeMap<String, f64>,
    /// Normalized flux values.
    pub light_curve_data: Vec<f64>,
    /// Time in days, aligned with `light_curve_data`.
    pub time_points: Vec<f64>,
    #[serde(default)]
    pub highlighted_regions: Vec<TransitRegion>,
    pub analysis: AnalysisMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shap_explanation: Option<ShapExplanation>,
    pub model_version: String,
    pub processing_time_ms: u64,
}

/// Replace non-finite values so the response always serializes to valid JSON.
///
/// NaN becomes 0.0 and infinities saturate at +/-1e10.
pub fn sanitize_value(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else if v.is_infinite() {
        if v > 0.0 {
            1e10
        } else {
            -1e10
        }
    } else {
        v
    }
}

fn sanitize_all(values: &mut [f64]) {
    for v in values.iter_mut() {
        *v = sanitize_value(*v);
    }
}

impl AnalysisResponse {
    /// Sanitize every float field in place.
    ///
    /// Mirrors the final safety pass the service applies before
    /// serialization; synthetic data should never produce non-finite
    /// values, but a malformed response must not poison the JSON encoder.
    pub fn sanitize(&mut self) {
        self.confidence_score = sanitize_value(self.confidence_score);
        for p in self.class_probabilities.values_mut() {
            *p = sanitize_value(*p);
        }
        sanitize_all(&mut self.light_curve_data);
        sanitize_all(&mut self.time_points);
        for region in &mut self.highlighted_regions {
            region.depth = sanitize_value(region.depth);
        }
        if let Some(shap) = &mut self.shap_explanation {
            sanitize_all(&mut shap.feature_importance);
            shap.base_value = sanitize_value(shap.base_value);
            shap.predicted_value = sanitize_value(shap.predicted_value);
            for region in &mut shap.top_contributing_regions {
                region.start_time = sanitize_value(region.start_time);
                region.end_time = sanitize_value(region.end_time);
                region.importance = sanitize_value(region.importance);
                region.contribution_percent = sanitize_value(region.contribution_percent);
            }
        }
    }
}
