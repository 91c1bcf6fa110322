//! HTTP routes and handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::time::Instant;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, error, info};
use uuid::Uuid;

use lexiserve_core::{Error, HealthStatus, RawTextRequest};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .route("/process", post(process))
        .fallback(fallback)
        .layer(RequestBodyLimitLayer::new(state.config.limits.max_body_bytes))
        .with_state(state)
}

/// Readiness probe: 200 only once the pipeline is loaded
async fn health(State(state): State<AppState>) -> Response {
    let status = state.health.status();

    let body = match state.model_name() {
        Some(model) => json!({ "status": status, "model": model }),
        None => json!({ "status": status }),
    };

    let code = if status == HealthStatus::Ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(body)).into_response()
}

/// Render Prometheus metrics from the recorder handle in state
async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Main inference handler
async fn process(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    metrics::counter!("lexiserve_requests_total").increment(1);

    // Readiness barrier: no inference work before the pipeline exists
    let Some(pipeline) = state.pipeline() else {
        return Err(AppError::Service(Error::NotReady));
    };

    let raw: RawTextRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    let request = raw
        .validate(&state.config.limits.request_limits())
        .map_err(Error::from)?;

    debug!(%request_id, chars = request.text.chars().count(), "admitted process request");

    let start = Instant::now();
    let result = match tokio::time::timeout(
        state.config.limits.request_timeout(),
        pipeline.infer(&request),
    )
    .await
    {
        Ok(inner) => inner?,
        Err(_) => return Err(AppError::Service(Error::Timeout)),
    };

    metrics::histogram!("lexiserve_inference_latency_us")
        .record(start.elapsed().as_micros() as f64);
    info!(
        %request_id,
        translations = result.translations.len(),
        latency_us = result.processing_time_us,
        "process request complete"
    );

    Ok(Json(result).into_response())
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    /// Body was not valid JSON for the expected shape
    InvalidBody(String),

    /// Error raised by validation, the barrier, or the engine
    Service(Error),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::Service(err)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Service(err) => match err {
                Error::Validation(_) => StatusCode::BAD_REQUEST,
                Error::NotReady => StatusCode::SERVICE_UNAVAILABLE,
                Error::Timeout => StatusCode::GATEWAY_TIMEOUT,
                Error::ModelLoad(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidBody(_) => "invalid_body",
            AppError::Service(err) => err.code(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match &self {
            AppError::InvalidBody(msg) => msg.clone(),
            AppError::Service(err) => err.to_string(),
        };

        if status.is_server_error() {
            error!(code, %message, "request failed");
        } else {
            debug!(code, %message, "request rejected");
        }
        metrics::counter!("lexiserve_errors_total", "code" => code).increment(1);

        // Stable code + human-readable message only; internal detail
        // stays in the logs
        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}
