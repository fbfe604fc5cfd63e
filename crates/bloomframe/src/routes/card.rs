//! Card image endpoint.

use axum::{extract::Query, http::header, response::IntoResponse};
use bloom_common::ImageCategory;
use serde::Deserialize;

use crate::og::{CardRenderer, DEFAULT_DESCRIPTION, DEFAULT_TITLE};

#[derive(Deserialize)]
pub struct CardQuery {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
}

/// Render a frame card image
pub async fn card_image(Query(params): Query<CardQuery>) -> impl IntoResponse {
    let title = params.title.filter(|t| !t.trim().is_empty());
    let description = params.description.filter(|d| !d.trim().is_empty());
    let category = params
        .category
        .as_deref()
        .map(ImageCategory::from_query)
        .unwrap_or_default();

    let svg = CardRenderer::default().render(
        title.as_deref().unwrap_or(DEFAULT_TITLE),
        description.as_deref().unwrap_or(DEFAULT_DESCRIPTION),
        category,
    );

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        svg,
    )
}
