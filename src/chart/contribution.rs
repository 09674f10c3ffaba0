//! Signed contribution-over-time chart renderer.

use super::error::ChartError;
use super::plot::{
    min_max, plot_width_for, Interpolation, LinearScale, PlotPoint, PlotSpec, RegionSign,
    SignedRegion, CONTRIBUTION_HEADROOM, MIN_CONTRIBUTION_SCALE, PLOT_HEIGHT,
};
use super::{validate_input, ContributionSeries};

/// Render a contribution series as filled areas split at the zero line.
///
/// The vertical domain is symmetric around zero — `[-1.15 * M, 1.15 * M]`
/// with `M = max(|min|, |max|)` — so the zero line sits centered and
/// positive and negative contributions stay visually comparable. An
/// all-zero series floors `M` at a small positive constant instead of
/// collapsing the domain.
///
/// The series is partitioned by the sign of each individual sample:
/// `value >= 0` belongs to a non-negative region, `value < 0` to a negative
/// one, and contiguous runs of equal sign become one filled area anchored
/// at the zero line. Adjacent samples of different sign therefore produce
/// adjacent but distinct regions meeting at the zero crossing.
pub fn render_contribution_chart(
    contrib: &ContributionSeries,
    container_width: f64,
) -> Result<PlotSpec, ChartError> {
    validate_input(&contrib.time, &contrib.value, container_width)?;

    let plot_width = plot_width_for(container_width);
    let (t_min, t_max) = min_max(&contrib.time);
    let x_scale = LinearScale::new((t_min, t_max), (0.0, plot_width));

    let (v_min, v_max) = min_max(&contrib.value);
    let mut max_abs = v_min.abs().max(v_max.abs());
    if max_abs == 0.0 {
        max_abs = MIN_CONTRIBUTION_SCALE;
    }
    let half_domain = max_abs * CONTRIBUTION_HEADROOM;
    let y_domain = (-half_domain, half_domain);
    let y_scale = LinearScale::new(y_domain, (PLOT_HEIGHT, 0.0));

    let points: Vec<PlotPoint> = contrib
        .time
        .iter()
        .zip(&contrib.value)
        .map(|(&t, &v)| PlotPoint {
            x: x_scale.apply(t),
            y: y_scale.apply(v),
        })
        .collect();

    let regions = sign_regions(&contrib.value, &points);

    Ok(PlotSpec {
        plot_width,
        plot_height: PLOT_HEIGHT,
        x_domain: (t_min, t_max),
        y_domain,
        points,
        interpolation: Interpolation::Monotone,
        highlights: Vec::new(),
        regions,
        zero_line_y: Some(y_scale.apply(0.0)),
    })
}

fn sign_of(v: f64) -> RegionSign {
    if v >= 0.0 {
        RegionSign::NonNegative
    } else {
        RegionSign::Negative
    }
}

/// Split samples into maximal runs of equal sign.
fn sign_regions(values: &[f64], points: &[PlotPoint]) -> Vec<SignedRegion> {
    let mut regions = Vec::new();
    let mut start = 0;
    let mut current = sign_of(values[0]);

    for i in 1..=values.len() {
        let run_ends = i == values.len() || sign_of(values[i]) != current;
        if run_ends {
            regions.push(SignedRegion {
                sign: current,
                start_index: start,
                end_index: i - 1,
                points: points[start..i].to_vec(),
            });
            if i < values.len() {
                start = i;
                current = sign_of(values[i]);
            }
        }
    }

    regions
}
