//! Flux-over-time chart renderer.

use super::error::ChartError;
use super::plot::{
    min_max, plot_width_for, HighlightRect, Interpolation, LinearScale, PlotPoint, PlotSpec,
    FALLBACK_DOMAIN_PAD, FLUX_DOMAIN_SLACK, PLOT_HEIGHT,
};
use super::{validate_input, HighlightInterval, TimeSeries};

/// Render a light curve with highlighted sub-intervals.
///
/// The horizontal scale maps `[min(time), max(time)]` onto `[0, plot_width]`;
/// the vertical scale maps the slack-padded value extent onto
/// `[plot_height, 0]` so larger flux draws higher. Points are emitted in
/// input order — out-of-order time values produce a visually crossing line,
/// which is intentional passthrough rather than an error.
///
/// Fails with [`ChartError::InvalidInput`] on empty, mismatched, too-short,
/// or non-finite input, and with [`ChartError::InvalidHighlight`] if any
/// interval does not satisfy `start_index <= end_index < len`. On failure
/// nothing is emitted; a previously rendered plot is the caller's to keep.
pub fn render_flux_chart(
    series: &TimeSeries,
    highlights: &[HighlightInterval],
    container_width: f64,
) -> Result<PlotSpec, ChartError> {
    validate_input(&series.time, &series.value, container_width)?;

    let len = series.len();
    for (index, interval) in highlights.iter().enumerate() {
        if interval.start_index > interval.end_index || interval.end_index >= len {
            return Err(ChartError::InvalidHighlight {
                index,
                start_index: interval.start_index,
                end_index: interval.end_index,
                series_len: len,
            });
        }
    }

    let plot_width = plot_width_for(container_width);
    let (t_min, t_max) = min_max(&series.time);
    let x_scale = LinearScale::new((t_min, t_max), (0.0, plot_width));

    let (v_min, v_max) = min_max(&series.value);
    let y_domain = flux_domain(v_min, v_max);
    let y_scale = LinearScale::new(y_domain, (PLOT_HEIGHT, 0.0));

    let points = series
        .time
        .iter()
        .zip(&series.value)
        .map(|(&t, &v)| PlotPoint {
            x: x_scale.apply(t),
            y: y_scale.apply(v),
        })
        .collect();

    let highlight_rects = highlights
        .iter()
        .map(|h| HighlightRect {
            x0: x_scale.apply(series.time[h.start_index]),
            x1: x_scale.apply(series.time[h.end_index]),
        })
        .collect();

    Ok(PlotSpec {
        plot_width,
        plot_height: PLOT_HEIGHT,
        x_domain: (t_min, t_max),
        y_domain,
        points,
        interpolation: Interpolation::Monotone,
        highlights: highlight_rects,
        regions: Vec::new(),
        zero_line_y: None,
    })
}

/// Value domain for the vertical axis: `[min * (1 - eps), max * (1 + eps)]`.
///
/// Multiplicative slack contracts instead of expanding when an extreme is
/// zero or negative; each bound falls back to an absolute pad so the domain
/// always covers the data with a non-zero band.
fn flux_domain(v_min: f64, v_max: f64) -> (f64, f64) {
    let mut lo = v_min * (1.0 - FLUX_DOMAIN_SLACK);
    let mut hi = v_max * (1.0 + FLUX_DOMAIN_SLACK);
    if lo >= v_min {
        lo = v_min - FALLBACK_DOMAIN_PAD;
    }
    if hi <= v_max {
        hi = v_max + FALLBACK_DOMAIN_PAD;
    }
    (lo, hi)
}
