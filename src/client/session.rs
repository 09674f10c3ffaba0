//! Analysis session: the results orchestrator.
//!
//! Holds the current analysis view state — idle, loading, a composed
//! result, or an error — and serializes request completion through a
//! generation counter: every new request invalidates the tokens of earlier
//! ones, so a stale in-flight response can never overwrite newer state.
//!
//! A completed response is composed into an [`AnalysisView`]: the raw
//! response plus rendered flux and contribution plots. Chart failures
//! degrade the view (missing plot, error recorded) rather than discarding
//! the result.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::AnalysisResponse;
use crate::chart::{
    render_contribution_chart, render_flux_chart, ChartError, ContributionSeries,
    HighlightInterval, PlotSpec, TimeSeries,
};

use super::error::ClientError;
use super::upload::validate_upload;
use super::ApiClient;

/// View state of the current analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// A well-formed result is held.
    Result(Box<AnalysisView>),
    /// The last request failed, with a user-facing message.
    Error(String),
}

/// A composed result: the backend response plus rendered plots.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub response: AnalysisResponse,
    /// Light curve with highlighted transit windows; `None` when rendering
    /// failed.
    pub flux_chart: Option<PlotSpec>,
    /// SHAP contribution chart; `None` when absent or rendering failed.
    pub contribution_chart: Option<PlotSpec>,
    /// First chart failure encountered, for display as a degraded state.
    pub chart_error: Option<ChartError>,
}

impl AnalysisView {
    /// Render both charts for a response at the given container width.
    pub fn compose(response: AnalysisResponse, container_width: f64) -> Self {
        let series = TimeSeries::new(
            response.time_points.clone(),
            response.light_curve_data.clone(),
        );
        let highlights: Vec<HighlightInterval> = response
            .highlighted_regions
            .iter()
            .map(|r| HighlightInterval {
                start_index: r.start_index,
                end_index: r.end_index,
            })
            .collect();

        let mut chart_error = None;
        let flux_chart = match render_flux_chart(&series, &highlights, container_width) {
            Ok(spec) => Some(spec),
            Err(err) => {
                chart_error = Some(err);
                None
            }
        };

        let contribution_chart = response.shap_explanation.as_ref().and_then(|shap| {
            let contrib = ContributionSeries {
                time: response.time_points.clone(),
                value: shap.feature_importance.clone(),
                base_value: shap.base_value,
                predicted_value: shap.predicted_value,
                top_regions: shap.top_contributing_regions.clone(),
            };
            match render_contribution_chart(&contrib, container_width) {
                Ok(spec) => Some(spec),
                Err(err) => {
                    chart_error.get_or_insert(err);
                    None
                }
            }
        });

        Self {
            response,
            flux_chart,
            contribution_chart,
            chart_error,
        }
    }

    /// Whether any chart failed to render.
    pub fn is_degraded(&self) -> bool {
        self.chart_error.is_some()
    }
}

/// Token identifying one request; completion with a superseded token is
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
}

#[derive(Debug)]
struct Inner {
    state: AnalysisState,
    generation: u64,
}

/// The orchestrator itself.
#[derive(Debug)]
pub struct AnalysisSession {
    inner: Mutex<Inner>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: AnalysisState::Idle,
                generation: 0,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AnalysisState {
        self.inner.lock().state.clone()
    }

    /// Whether a request is currently in flight. The UI disables the
    /// triggering controls while this is true.
    pub fn is_loading(&self) -> bool {
        matches!(self.inner.lock().state, AnalysisState::Loading)
    }

    /// Enter `Loading` and return the token for this request.
    ///
    /// Tokens from earlier requests become stale immediately.
    pub fn begin_request(&self) -> RequestToken {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.state = AnalysisState::Loading;
        RequestToken {
            generation: inner.generation,
        }
    }

    /// Accept a response for the given request. Returns `false` (and leaves
    /// state untouched) when the token has been superseded.
    pub fn complete(
        &self,
        token: RequestToken,
        response: AnalysisResponse,
        container_width: f64,
    ) -> bool {
        let view = AnalysisView::compose(response, container_width);
        let mut inner = self.inner.lock();
        if token.generation != inner.generation {
            tracing::debug!(
                stale = token.generation,
                current = inner.generation,
                "discarding stale analysis response"
            );
            return false;
        }
        inner.state = AnalysisState::Result(Box::new(view));
        true
    }

    /// Record a failure for the given request. Returns `false` when the
    /// token has been superseded.
    pub fn fail(&self, token: RequestToken, error: &ClientError) -> bool {
        let mut inner = self.inner.lock();
        if token.generation != inner.generation {
            tracing::debug!(
                stale = token.generation,
                current = inner.generation,
                "discarding stale analysis failure"
            );
            return false;
        }
        inner.state = AnalysisState::Error(error.user_message());
        true
    }
}

/// What to analyze.
#[derive(Debug, Clone)]
pub enum AnalysisRequest {
    /// A pre-loaded catalog signal.
    Sample { sample_id: String },
    /// A user-supplied file.
    Upload {
        file_name: String,
        contents: Vec<u8>,
    },
}

/// The prediction calls the orchestrator needs; implemented by
/// [`ApiClient`] and by test doubles.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn predict(&self, sample_id: &str) -> Result<AnalysisResponse, ClientError>;

    async fn predict_upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<AnalysisResponse, ClientError>;
}

#[async_trait]
impl PredictionApi for ApiClient {
    async fn predict(&self, sample_id: &str) -> Result<AnalysisResponse, ClientError> {
        ApiClient::predict(self, sample_id).await
    }

    async fn predict_upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<AnalysisResponse, ClientError> {
        ApiClient::predict_upload(self, file_name, contents).await
    }
}

/// Drive one analysis request to completion.
///
/// Inputs are validated locally first: an empty selection or a rejected
/// file fails the session without any API call. Returns `true` when this
/// request's outcome was applied (i.e. it was not superseded mid-flight).
pub async fn run_analysis(
    api: &dyn PredictionApi,
    session: &AnalysisSession,
    request: AnalysisRequest,
    container_width: f64,
) -> bool {
    let token = session.begin_request();

    let result = match request {
        AnalysisRequest::Sample { sample_id } => {
            if sample_id.trim().is_empty() {
                Err(ClientError::InvalidRequest {
                    message: "Please select a signal to analyze.".to_string(),
                })
            } else {
                api.predict(&sample_id).await
            }
        }
        AnalysisRequest::Upload {
            file_name,
            contents,
        } => match validate_upload(&file_name, contents.len()) {
            Ok(()) => api.predict_upload(&file_name, contents).await,
            Err(err) => Err(err),
        },
    };

    match result {
        Ok(response) => session.complete(token, response, container_width),
        Err(err) => session.fail(token, &err),
    }
}
