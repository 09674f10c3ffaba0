//! HTTP API client.
//!
//! Thin wrapper over the five backend calls: list samples, predict by
//! sample id, predict by uploaded file, fetch metrics, and health check.
//! Each call is a single best-effort attempt with a fixed timeout — no
//! retries, no caching, no request deduplication. Failures map to
//! [`ClientError`] and carry the server's detail message when one was
//! provided.

pub mod error;
pub mod session;
pub mod upload;

pub use error::ClientError;
pub use session::{
    run_analysis, AnalysisRequest, AnalysisSession, AnalysisState, AnalysisView, PredictionApi,
    RequestToken,
};
pub use upload::validate_upload;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::api::{
    AnalysisResponse, ApiError, HealthResponse, ModelMetrics, SampleListResponse, SignalRequest,
};

/// Fixed per-call timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the analysis backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `/` — service health.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get_json("/").await
    }

    /// GET `/api/samples` — list the pre-loaded signals.
    pub async fn list_samples(&self) -> Result<SampleListResponse, ClientError> {
        self.get_json("/api/samples").await
    }

    /// POST `/api/predict` — analyze a catalog sample.
    pub async fn predict(&self, sample_id: &str) -> Result<AnalysisResponse, ClientError> {
        let request = SignalRequest {
            sample_id: sample_id.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/predict"))
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;
        parse_response(response).await
    }

    /// POST `/api/predict/upload` — analyze an uploaded file.
    ///
    /// Validates name and size locally; an oversized or mistyped file is
    /// rejected before any network traffic.
    pub async fn predict_upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<AnalysisResponse, ClientError> {
        upload::validate_upload(file_name, contents.len())?;

        let part = reqwest::multipart::Part::bytes(contents).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.url("/api/predict/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;
        parse_response(response).await
    }

    /// GET `/api/metrics` — published model performance.
    pub async fn metrics(&self) -> Result<ModelMetrics, ClientError> {
        self.get_json("/api/metrics").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(map_send_error)?;
        parse_response(response).await
    }
}

fn map_send_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout {
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    } else {
        ClientError::Transport {
            message: err.to_string(),
        }
    }
}

/// Turn a response into a typed body, or an error carrying the server's
/// detail message when the status is non-success.
async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .json::<ApiError>()
            .await
            .ok()
            .map(|body| body.message);
        return Err(ClientError::HttpStatus {
            status: status.as_u16(),
            detail,
        });
    }

    response.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            ClientError::Timeout {
                timeout_secs: REQUEST_TIMEOUT_SECS,
            }
        } else {
            ClientError::Decode {
                message: e.to_string(),
            }
        }
    })
}
