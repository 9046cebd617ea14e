//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Command};
use super::responses::{CommandResponse, HealthResponse, StatusResponse};

/// Push `command` into the timer and build the response
fn send_command(state: &AppState, command: Command) -> Result<Json<CommandResponse>, StatusCode> {
    match state.send_command(command) {
        Ok(timer) => {
            info!("{} endpoint called", command);
            Ok(Json(CommandResponse::accepted(
                format!("Timer {} command accepted", command),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to send {} command: {}", command, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /run - Start or resume the timer
pub async fn run_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    send_command(&state, Command::Run)
}

/// Handle POST /pause - Freeze the timer at its current value
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    send_command(&state, Command::Pause)
}

/// Handle POST /stop - Reset the timer to its start value
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    send_command(&state, Command::Stop)
}

/// Handle GET /status - Latest timer projection and server info
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_projection(),
        settings: state.settings,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
