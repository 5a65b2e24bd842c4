//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    error::TimerError,
    state::{AppState, TimerSnapshot},
};
use super::responses::{ApiResponse, ConfigureRequest, HealthResponse, StatusResponse};

type CommandResult = Result<(StatusCode, Json<ApiResponse>), StatusCode>;

/// Turn a command outcome into a response; rejections carry the unchanged state
fn respond(state: &AppState, result: Result<TimerSnapshot, TimerError>, message: &str) -> CommandResult {
    match result {
        Ok(snapshot) => Ok((StatusCode::OK, Json(ApiResponse::ok(message.to_string(), snapshot)))),
        Err(e) if e.is_rejection() => match state.snapshot() {
            Ok(snapshot) => Ok((
                StatusCode::CONFLICT,
                Json(ApiResponse::rejected(e.to_string(), snapshot)),
            )),
            Err(e) => {
                error!("Failed to get timer snapshot: {}", e);
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            }
        },
        Err(e) => {
            error!("Timer command failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /configure - Set the duration of the next run
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigureRequest>,
) -> CommandResult {
    info!(
        "Configure endpoint called - {}h {}m {}s",
        request.hours, request.minutes, request.seconds
    );
    let result = state.configure(request.hours, request.minutes, request.seconds);
    respond(&state, result, "Timer configured")
}

/// Handle POST /configure/dismiss - Close the configuration without saving
pub async fn dismiss_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    let result = state.dismiss_configuration();
    respond(&state, result, "Configuration dismissed")
}

/// Handle POST /start - Start a run of the configured duration
pub async fn start_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    info!("Start endpoint called");
    let result = state.start();
    respond(&state, result, "Timer started")
}

/// Handle POST /stop - Stop the current run and reset to idle
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    info!("Stop endpoint called");
    let result = state.stop();
    respond(&state, result, "Timer stopped")
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
