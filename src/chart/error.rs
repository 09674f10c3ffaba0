//! Chart rendering errors.

use thiserror::Error;

/// Precondition violations surfaced by the chart renderers.
///
/// These are never coerced into a "best effort" plot: a malformed series or
/// an out-of-range highlight would mislead the scientific interpretation,
/// so the caller gets an error and must show a degraded state instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The series or container geometry failed validation.
    #[error("invalid chart input: {0}")]
    InvalidInput(String),

    /// A highlight interval does not fit the series it indexes into.
    #[error(
        "invalid highlight interval #{index}: \
         indices {start_index}..={end_index} out of range for {series_len} points"
    )]
    InvalidHighlight {
        /// Position of the offending interval in the input slice.
        index: usize,
        start_index: usize,
        end_index: usize,
        series_len: usize,
    },
}
