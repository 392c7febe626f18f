//! HTTP surface for the job intel agent.
//!
//! Two endpoints mirror the submit/poll contract: POST starts a
//! workflow and returns its query id immediately, GET reports current
//! status by id.

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use job_intel::{AgentError, JobIntel, SearchRequest};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Build the application router.
pub fn build_app(agent: JobIntel) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/search-jobs", post(submit_search))
        .route("/api/search-jobs/:id", get(search_status))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(agent)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn submit_search(
    State(agent): State<JobIntel>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = agent.submit(request).await?;
    Ok(Json(json!({ "search_query_id": id })))
}

async fn search_status(
    State(agent): State<JobIntel>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    match agent.status(id).await? {
        Some(report) => Ok(Json(report).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("search query {id} not found") })),
        )
            .into_response()),
    }
}

/// Maps agent errors onto HTTP status codes.
struct ApiError(AgentError);

impl From<AgentError> for ApiError {
    fn from(e: AgentError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AgentError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
