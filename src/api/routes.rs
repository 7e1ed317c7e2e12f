use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // The agent is a local control surface only
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:1420".parse::<HeaderValue>().unwrap(),
            "http://127.0.0.1:1420".parse::<HeaderValue>().unwrap(),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::agent_status))
        // Automation commands, one route per bridge operation
        .route("/automation/click", post(handlers::click))
        .route("/automation/swipe", post(handlers::swipe))
        .route("/automation/back", post(handlers::back))
        .route("/automation/home", post(handlers::home))
        .route("/automation/recents", post(handlers::recents))
        .route("/automation/click_text", post(handlers::click_text))
        .route("/automation/input_text", post(handlers::input_text))
        .route("/automation/hierarchy", get(handlers::dump_hierarchy))
        .route("/automation/screenshot", get(handlers::screenshot))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
