//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json, Redirect},
};
use tracing::error;

use crate::state::{Action, AppState};
use super::{
    page::render_page,
    responses::{ActionResponse, HealthResponse, StatusResponse},
    view::StopwatchView,
};

/// Dispatch an action, logging and mapping internal failures to 500
fn dispatch(state: &AppState, action: Action) -> Result<ActionResponse, StatusCode> {
    match state.dispatch(action) {
        Ok((transition, stopwatch)) => {
            Ok(ActionResponse::new(action.name(), transition, &stopwatch))
        }
        Err(e) => {
            error!("Failed to {} stopwatch: {}", action.name(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET / - Render the stopwatch page
pub async fn page_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    match state.snapshot() {
        Ok(stopwatch) => Ok(Html(render_page(&StopwatchView::from(&stopwatch)))),
        Err(e) => {
            error!("Failed to get stopwatch state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start, /stop, /reset, /lap from the page
async fn form_action(state: Arc<AppState>, action: Action) -> Result<Redirect, StatusCode> {
    dispatch(&state, action)?;
    Ok(Redirect::to("/"))
}

pub async fn start_form_handler(State(state): State<Arc<AppState>>) -> Result<Redirect, StatusCode> {
    form_action(state, Action::Start).await
}

pub async fn stop_form_handler(State(state): State<Arc<AppState>>) -> Result<Redirect, StatusCode> {
    form_action(state, Action::Stop).await
}

pub async fn reset_form_handler(State(state): State<Arc<AppState>>) -> Result<Redirect, StatusCode> {
    form_action(state, Action::Reset).await
}

pub async fn lap_form_handler(State(state): State<Arc<AppState>>) -> Result<Redirect, StatusCode> {
    form_action(state, Action::Lap).await
}

/// Handle POST /laps/:index/delete from the page
pub async fn delete_lap_form_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Redirect, StatusCode> {
    form_action(state, Action::DeleteLap(index)).await
}

/// Handle POST /api/stopwatch/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    dispatch(&state, Action::Start).map(Json)
}

/// Handle POST /api/stopwatch/stop
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    dispatch(&state, Action::Stop).map(Json)
}

/// Handle POST /api/stopwatch/reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    dispatch(&state, Action::Reset).map(Json)
}

/// Handle POST /api/stopwatch/lap
pub async fn lap_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    dispatch(&state, Action::Lap).map(Json)
}

/// Handle DELETE /api/stopwatch/laps/:index
pub async fn delete_lap_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ActionResponse>, StatusCode> {
    dispatch(&state, Action::DeleteLap(index)).map(Json)
}

/// Handle GET /api/stopwatch - Return current stopwatch status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let stopwatch = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get stopwatch state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        stopwatch: StopwatchView::from(&stopwatch),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
