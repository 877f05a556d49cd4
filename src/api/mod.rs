//! HTTP API module
//! 
//! This module contains the stopwatch page, its form actions, the JSON API
//! and the response structures they share.

pub mod handlers;
pub mod page;
pub mod responses;
pub mod view;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Page and its form actions
        .route("/", get(page_handler))
        .route("/start", post(start_form_handler))
        .route("/stop", post(stop_form_handler))
        .route("/reset", post(reset_form_handler))
        .route("/lap", post(lap_form_handler))
        .route("/laps/:index/delete", post(delete_lap_form_handler))
        // JSON API
        .route("/api/stopwatch", get(status_handler))
        .route("/api/stopwatch/start", post(start_handler))
        .route("/api/stopwatch/stop", post(stop_handler))
        .route("/api/stopwatch/reset", post(reset_handler))
        .route("/api/stopwatch/lap", post(lap_handler))
        .route("/api/stopwatch/laps/:index", delete(delete_lap_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
