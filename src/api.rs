//! Public API surface.
//!
//! This file consolidates the wire types for the HTTP API: request and
//! response bodies shared by the server handlers and the API client.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{
    AnalysisMetadata, AnalysisResponse, Classification, ContributionRegion, ShapExplanation,
    TransitRegion,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hard cap on upload size, enforced by the client before any network call
/// and again by the server.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted upload extensions. Advisory — file contents are not parsed.
pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 4] = [".csv", ".fits", ".txt", ".json"];

/// Whether a file name carries one of the accepted extensions
/// (case-insensitive).
pub fn has_allowed_extension(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ALLOWED_UPLOAD_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Error body returned by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Request body for analyzing a pre-loaded signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRequest {
    /// Id of the stellar signal to analyze.
    pub sample_id: String,
}

/// One catalog entry as exposed to clients. Ground-truth labels stay
/// server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Response for the sample listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleListResponse {
    pub samples: Vec<SampleSummary>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service.
    pub status: String,
    pub service: String,
    pub version: String,
    pub model_status: String,
}

/// Model performance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub total_predictions: u64,
    pub exoplanets_found: u64,
    pub false_positives: u64,
    pub validation_date: NaiveDate,
    pub model_version: String,
    pub dataset: String,
}
