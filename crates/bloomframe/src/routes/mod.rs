//! HTTP route handlers for the frame server.

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use bloom_common::constants::routes;

use crate::state::AppState;

mod card;
mod frame;
mod health;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))

        // Embed frame
        .route("/", get(frame::initial_frame))
        .route(routes::FRAME_INDEX, get(frame::initial_frame))

        // Frame actions
        .route(
            routes::FRAME_CHALLENGES,
            get(frame::initial_frame).post(frame::challenges),
        )
        .route(routes::FRAME_CREDENTIALS, post(frame::credentials))
        .route(routes::FRAME_SUBMIT, post(frame::submit))
        .route(routes::FRAME_PROJECTS, post(frame::projects))
        .route(
            &format!("{}/{{destination}}", routes::FRAME_REDIRECT),
            post(frame::redirect),
        )

        // Card images
        .route(routes::CARD_IMAGE, get(card::card_image))

        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())

        // Add shared state
        .with_state(state)
}
