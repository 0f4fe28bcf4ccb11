// src/routes/mod.rs
pub mod webhook;

use crate::state::SharedState;
use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use webhook::{
    get_metrics_handler, health_handler, home_handler, send_message_handler, webhook_handler,
};

pub fn create_router(state: SharedState) -> Router {
    let admin_routes = Router::new()
        .route("/metrics", get(get_metrics_handler))
        .route("/send", post(send_message_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(home_handler))
        .route("/webhook", post(webhook_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // API Key check.
    match req.headers().get("x-admin-key") {
        Some(val) if val == state.admin_key.as_str() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
