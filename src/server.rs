//! HTTP API.
//!
//! Three routes on a single axum router:
//!
//! - `GET /upload-url?filename=` — presigned upload URL + storage key
//! - `POST /generate` — run the generation pipeline, return a result URL
//! - `GET /health` — liveness probe
//!
//! Responses use camelCase field names. Every handler failure maps to a
//! plain-text 500 carrying the error message; the API has no other error
//! statuses. CORS allows any origin, method, and header — callers are
//! browser frontends served from arbitrary hosts.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::models::{UploadGrant, UseCase};
use crate::pipeline::Pipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Wrapper turning any `anyhow::Error` into a plain-text 500 response.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

#[derive(Deserialize)]
pub struct UploadUrlParams {
    filename: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    keys: Vec<String>,
    use_case: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    result_url: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn upload_url(
    State(state): State<AppState>,
    Query(params): Query<UploadUrlParams>,
) -> Result<Json<UploadGrant>, AppError> {
    let grant = state.pipeline.prepare_upload(&params.filename).await?;
    Ok(Json(grant))
}

async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let use_case = UseCase::parse(&request.use_case);
    let result_url = state.pipeline.generate(&request.keys, use_case).await?;
    Ok(Json(GenerateResponse { result_url }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn build_router(pipeline: Arc<Pipeline>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/upload-url", get(upload_url))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .layer(cors)
        .with_state(AppState { pipeline })
}

pub async fn run_server(config: &Config, pipeline: Arc<Pipeline>) -> anyhow::Result<()> {
    let app = build_router(pipeline);
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    println!("listening on {}", config.server.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
