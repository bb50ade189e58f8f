//! JSON endpoints the dealer and admin dashboards call to render inquiry threads.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use motormart_common::views::{ViewDistribution, MAX_DISTRIBUTION_DAYS};
use motormart_common::{RawInquiry, ThreadConfig};

use crate::api::{
    ErrorResponse, HealthResponse, ReplyRequest, ReplyResponse, ThreadResponse, ViewsRequest,
    ViewsResponse,
};

pub struct AppState {
    pub config: ThreadConfig,
    pub views: Box<dyn ViewDistribution + Send + Sync>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn unprocessable(error: impl ToString) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn thread_handler(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawInquiry>,
) -> Result<Json<ThreadResponse>, ApiError> {
    match ThreadResponse::build(raw, &state.config) {
        Ok(response) => {
            info!(
                inquiry = %response.id,
                messages = response.messages.len(),
                "thread rebuilt"
            );
            Ok(Json(response))
        }
        Err(e) => {
            warn!("rejected inquiry: {e}");
            Err(unprocessable(e))
        }
    }
}

async fn reply_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let author = request.author;
    ReplyResponse::build(request, &state.config)
        .map(|response| {
            info!(?author, "message appended");
            Json(response)
        })
        .map_err(|e| {
            warn!(?author, "append rejected: {e}");
            unprocessable(e)
        })
}

async fn views_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ViewsRequest>,
) -> Result<Json<ViewsResponse>, ApiError> {
    let days = request.days;
    ViewsResponse::build(request, state.views.as_ref())
        .map(Json)
        .ok_or_else(|| {
            unprocessable(format!(
                "days must be at most {MAX_DISTRIBUTION_DAYS}, got {days}"
            ))
        })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/thread", post(thread_handler))
        .route("/reply", post(reply_handler))
        .route("/views", post(views_handler))
        .layer(cors)
        .with_state(state)
}
