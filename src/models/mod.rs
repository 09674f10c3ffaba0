//! Domain model types.
//!
//! This module contains the analysis result types shared between the
//! prediction service, the HTTP layer, and the API client, plus the
//! built-in sample catalog the demo backend predicts against.

pub mod analysis;
pub mod catalog;

pub use analysis::{
    AnalysisMetadata, AnalysisResponse, Classification, ContributionRegion, ShapExplanation,
    TransitRegion,
};
pub use catalog::{AnomalyKind, SampleCatalog, SampleParams, SampleRecord, TruthLabel};
