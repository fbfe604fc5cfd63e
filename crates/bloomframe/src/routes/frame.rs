//! Frame endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::error::AppError;
use crate::frame::{self, EntryPoint, validator};
use crate::state::AppState;

/// Initial embed frame (challenges overview, fresh state)
pub async fn initial_frame(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let response = frame::initial_frame(&state.catalog, &state.links)?;
    Ok(Html(response.to_html()))
}

pub async fn challenges(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    handle_action(&state, EntryPoint::Challenges, &headers, &body)
}

pub async fn credentials(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    handle_action(&state, EntryPoint::Credentials, &headers, &body)
}

pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    handle_action(&state, EntryPoint::Submit, &headers, &body)
}

pub async fn projects(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    handle_action(&state, EntryPoint::Projects, &headers, &body)
}

/// Request media type, used to tell legacy form posts from JSON
fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

fn handle_action(
    state: &AppState,
    entry: EntryPoint,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Html<String>, AppError> {
    let (navigation, response) =
        frame::respond(&state.catalog, &state.links, entry, content_type(headers), body)?;

    tracing::debug!(
        entry = entry.path(),
        viewer = ?navigation.next.viewer_id,
        prior = ?navigation.prior,
        intent = ?navigation.intent,
        next = %navigation.next.screen,
        "Frame interaction"
    );

    Ok(Html(response.to_html()))
}

/// Target of `post_redirect` buttons
///
/// Returns:
/// - 302: Location of the site page
/// - 400: Malformed frame envelope
/// - 404: Unknown destination
pub async fn redirect(
    State(state): State<AppState>,
    Path(destination): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let interaction = validator::validate(content_type(&headers), &body)?;

    let path = match destination.as_str() {
        "projects-create" => "/projects/create".to_string(),
        "projects" => "/projects".to_string(),
        "credentials" => format!("/credentials?fid={}", interaction.viewer_id),
        _ => return Err(AppError::NotFound),
    };
    let location = state.links.absolute(&path);

    tracing::debug!(
        viewer = interaction.viewer_id,
        destination = %destination,
        location = %location,
        "Redirecting frame"
    );

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
