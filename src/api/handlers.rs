//! HTTP handlers for the embedded control agent.
//!
//! Each automation route maps 1:1 onto a [`CommandBridge`] command and
//! always answers 200 with a [`CommandResult`]; degraded mode (no automation
//! handle) shows up as `ok: false`, never as an HTTP error.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::automation::CommandResult;
use crate::error::AgentError;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub instance_id: String,
    pub started_at: String,
    /// Whether an automation handle is currently registered.
    pub automation_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_dir: Option<String>,
}

pub async fn agent_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        instance_id: state.instance_id.to_string(),
        started_at: state.started_at.to_rfc3339(),
        automation_available: state.bridge.registry().is_registered(),
        workspace_dir: state
            .config
            .workspace_dir
            .as_ref()
            .map(|p| p.display().to_string()),
    })
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub x: f32,
    pub y: f32,
}

pub async fn click(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClickRequest>,
) -> Json<CommandResult> {
    let ok = state.bridge.click(req.x, req.y).await;
    Json(CommandResult::from_flag(ok))
}

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// Milliseconds; negative values are rejected by the bridge.
    pub duration_ms: Option<i64>,
}

pub async fn swipe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SwipeRequest>,
) -> Json<CommandResult> {
    let ok = state
        .bridge
        .swipe(req.x1, req.y1, req.x2, req.y2, req.duration_ms)
        .await;
    Json(CommandResult::from_flag(ok))
}

pub async fn back(State(state): State<Arc<AppState>>) -> Json<CommandResult> {
    Json(CommandResult::from_flag(state.bridge.back().await))
}

pub async fn home(State(state): State<Arc<AppState>>) -> Json<CommandResult> {
    Json(CommandResult::from_flag(state.bridge.home().await))
}

pub async fn recents(State(state): State<Arc<AppState>>) -> Json<CommandResult> {
    Json(CommandResult::from_flag(state.bridge.recents().await))
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

pub async fn click_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Result<Json<CommandResult>, AgentError> {
    if req.text.is_empty() {
        return Err(AgentError::Validation("text must not be empty".into()));
    }
    let ok = state.bridge.click_by_text(&req.text).await;
    Ok(Json(CommandResult::from_flag(ok)))
}

pub async fn input_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Json<CommandResult> {
    let ok = state.bridge.input_text(&req.text).await;
    Json(CommandResult::from_flag(ok))
}

pub async fn dump_hierarchy(State(state): State<Arc<AppState>>) -> Json<CommandResult> {
    let dump = state.bridge.dump_hierarchy().await;
    let ok = !dump.starts_with("<error>");
    Json(CommandResult::text(ok, dump))
}

pub async fn screenshot(State(state): State<Arc<AppState>>) -> Json<CommandResult> {
    let bytes = state.bridge.screenshot().await;
    Json(CommandResult::bytes(&bytes))
}
