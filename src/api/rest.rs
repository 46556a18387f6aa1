use axum::{
    Router,
    routing::{get, post},
    extract::{State, Json},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use crate::observability::metrics::{PriceMetrics, PublishedStats};
use crate::poller::TicketPoller;

pub struct ApiState {
    pub poller: Arc<TicketPoller>,
    pub metrics: Arc<PriceMetrics>,
}

pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/poll", post(poll_now))
        .route("/api/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Runs one cycle before answering. No business logic of its own.
async fn poll_now(State(state): State<Arc<ApiState>>) -> &'static str {
    tracing::info!("On-demand poll requested");
    state.poller.run_cycle().await;
    "polled"
}

async fn get_stats(
    State(state): State<Arc<ApiState>>,
) -> Json<BTreeMap<String, PublishedStats>> {
    Json(state.metrics.snapshot())
}

async fn metrics(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        ).into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
