//! Plot geometry primitives.
//!
//! A [`PlotSpec`] is an abstract description of a rendered chart: the pixel
//! dimensions of the plot area, the data domains backing each axis, the
//! scaled point list, and any highlight rectangles or signed area regions.
//! It carries everything a drawing layer needs and nothing about how the
//! drawing is performed.

use serde::{Deserialize, Serialize};

/// Fixed plot height in pixels.
pub const PLOT_HEIGHT: f64 = 260.0;
/// Total horizontal margin (axis labels and padding) subtracted from the
/// container width.
pub const HORIZONTAL_MARGINS: f64 = 60.0;
/// Lower bound on the plot width regardless of container size.
pub const MIN_PLOT_WIDTH: f64 = 100.0;
/// Fractional slack applied to the flux value domain so extremes are not
/// drawn exactly on the plot edge.
pub const FLUX_DOMAIN_SLACK: f64 = 0.001;
/// Absolute fallback pad for value domains the multiplicative slack cannot
/// expand (all-zero series).
pub const FALLBACK_DOMAIN_PAD: f64 = 0.001;
/// Headroom factor above the largest absolute contribution value.
pub const CONTRIBUTION_HEADROOM: f64 = 1.15;
/// Floor for the contribution half-domain when every value is zero.
pub const MIN_CONTRIBUTION_SCALE: f64 = 1e-3;

/// Linear mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a data value into the pixel range.
    ///
    /// A degenerate domain (min == max) maps every value to the range
    /// midpoint rather than dividing by zero.
    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// How the drawing layer should interpolate between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Monotone cubic interpolation: smooth, no overshoot between samples.
    Monotone,
}

/// A shaded rectangle spanning the full vertical extent of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightRect {
    /// Left edge in pixels.
    pub x0: f64,
    /// Right edge in pixels.
    pub x1: f64,
}

/// Which side of the zero line a contribution region occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSign {
    /// Samples with value >= 0; filled upward from the zero line.
    NonNegative,
    /// Samples with value < 0; filled downward from the zero line.
    Negative,
}

/// One maximal run of same-sign contribution samples, rendered as a filled
/// area anchored at the zero line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedRegion {
    pub sign: RegionSign,
    /// First sample index of the run (inclusive).
    pub start_index: usize,
    /// Last sample index of the run (inclusive).
    pub end_index: usize,
    /// Scaled samples of the run, in input order.
    pub points: Vec<PlotPoint>,
}

/// Complete plot description produced by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    /// Drawable width in pixels.
    pub plot_width: f64,
    /// Drawable height in pixels.
    pub plot_height: f64,
    /// Data domain backing the horizontal axis.
    pub x_domain: (f64, f64),
    /// Data domain backing the vertical axis.
    pub y_domain: (f64, f64),
    /// Every series sample scaled to pixel space, in input order.
    pub points: Vec<PlotPoint>,
    pub interpolation: Interpolation,
    /// Highlighted sub-intervals (flux chart only).
    pub highlights: Vec<HighlightRect>,
    /// Signed area regions (contribution chart only).
    pub regions: Vec<SignedRegion>,
    /// Pixel row of value zero, when the chart draws a zero line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_line_y: Option<f64>,
}

/// Plot width for a given container: container minus fixed margins, never
/// below the minimum.
pub(crate) fn plot_width_for(container_width: f64) -> f64 {
    (container_width - HORIZONTAL_MARGINS).max(MIN_PLOT_WIDTH)
}

/// Minimum and maximum over a non-empty slice, in one pass.
pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}
