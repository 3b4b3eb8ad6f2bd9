//! HTTP front-end for the summarization pipeline.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{bili::AudioFetcher, Summarizer, SummaryPipeline, Transcriber};

/// Required prefix for accepted video URLs.
const VIDEO_URL_PREFIX: &str = "https://www.bilibili.com/video";

/// Response envelope for the summary endpoint.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryResponse {
    fn ok(summary: String) -> Self {
        Self {
            success: true,
            summary: Some(summary),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            error: Some(message.into()),
        }
    }
}

/// Builds the application router around an already-constructed pipeline.
///
/// The pipeline is injected as shared state; nothing here is lazily
/// initialized on first request.
pub fn router<F, T, S>(pipeline: Arc<SummaryPipeline<F, T, S>>) -> Router
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/summary_bili", post(summary_bili_handler::<F, T, S>))
        .route("/api/health", get(health_handler))
        .with_state(pipeline)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Binds and serves the API until the process is stopped.
pub async fn serve<F, T, S>(
    pipeline: Arc<SummaryPipeline<F, T, S>>,
    port: u16,
) -> anyhow::Result<()>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let app = router(pipeline);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(port, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn summary_bili_handler<F, T, S>(
    State(pipeline): State<Arc<SummaryPipeline<F, T, S>>>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let Some(url) = payload.get("url").and_then(|u| u.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(SummaryResponse::err("invalid request: missing url field")),
        );
    };

    if !url.starts_with(VIDEO_URL_PREFIX) {
        return (
            StatusCode::BAD_REQUEST,
            Json(SummaryResponse::err(
                "invalid url: expected a bilibili video link",
            )),
        );
    }

    let custom_prompt = payload.get("prompt").and_then(|p| p.as_str());
    tracing::info!(url, "Received summary request");

    match pipeline.summarize_video(url, custom_prompt).await {
        Ok(summary) => (StatusCode::OK, Json(SummaryResponse::ok(summary))),
        Err(e) => {
            tracing::error!(error = %e, "Pipeline run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SummaryResponse::err(e.to_string())),
            )
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
