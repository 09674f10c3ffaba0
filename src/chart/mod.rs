//! Chart rendering core.
//!
//! Deterministically maps a time series (plus optional highlight intervals,
//! or a signed contribution series) to a technology-neutral [`PlotSpec`]: a
//! description of scales, pixel-space points, and shapes sufficient for any
//! drawing layer to render. The renderers are pure functions — no network,
//! no storage, no hidden state — so identical inputs always produce
//! bit-identical output, and every precondition violation surfaces as a
//! [`ChartError`] instead of a silently wrong plot.

pub mod contribution;
pub mod error;
pub mod flux;
pub mod plot;

pub use contribution::render_contribution_chart;
pub use error::ChartError;
pub use flux::render_flux_chart;
pub use plot::{
    HighlightRect, Interpolation, LinearScale, PlotPoint, PlotSpec, RegionSign, SignedRegion,
};

use crate::models::ContributionRegion;

/// Ordered sequence of (time, value) pairs.
///
/// Time values are expected to be non-decreasing but this is not enforced:
/// the renderer draws points in the order given, and re-sorting would
/// misrepresent the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    /// Time axis, in days.
    pub time: Vec<f64>,
    /// Measured value at each time point.
    pub value: Vec<f64>,
}

impl TimeSeries {
    pub fn new(time: Vec<f64>, value: Vec<f64>) -> Self {
        Self { time, value }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// A sub-range of a series to mark visually, as inclusive indices into the
/// time axis. Valid iff `start_index <= end_index < series.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightInterval {
    pub start_index: usize,
    pub end_index: usize,
}

/// Signed per-time-point contributions toward the classification outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSeries {
    /// Time axis, aligned index-for-index with `value`.
    pub time: Vec<f64>,
    /// Signed contribution at each time point.
    pub value: Vec<f64>,
    /// Expected model output with no feature information.
    pub base_value: f64,
    /// Final model output.
    pub predicted_value: f64,
    /// Highest-impact spans, for display ranking only — not geometry.
    pub top_regions: Vec<ContributionRegion>,
}

/// Shared input validation for both renderers.
///
/// Rejects empty or mismatched arrays, fewer than two points, non-finite
/// samples, and a non-positive container width.
pub(crate) fn validate_input(
    time: &[f64],
    value: &[f64],
    container_width: f64,
) -> Result<(), ChartError> {
    if time.len() != value.len() {
        return Err(ChartError::InvalidInput(format!(
            "time and value lengths differ: {} vs {}",
            time.len(),
            value.len()
        )));
    }
    if time.len() < 2 {
        return Err(ChartError::InvalidInput(format!(
            "series must contain at least 2 points, got {}",
            time.len()
        )));
    }
    if !(container_width.is_finite() && container_width > 0.0) {
        return Err(ChartError::InvalidInput(format!(
            "container width must be positive and finite, got {container_width}"
        )));
    }
    if let Some(i) = time.iter().position(|t| !t.is_finite()) {
        return Err(ChartError::InvalidInput(format!(
            "non-finite time value at index {i}"
        )));
    }
    if let Some(i) = value.iter().position(|v| !v.is_finite()) {
        return Err(ChartError::InvalidInput(format!(
            "non-finite sample value at index {i}"
        )));
    }
    Ok(())
}
