//! Handler for blog post pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::state::AppState;

/// Template for a rendered post (`templates/post.html`). The body is
/// upstream-rendered HTML and is inserted unescaped.
#[derive(Template, WebTemplate)]
#[template(path = "post.html")]
struct PostTemplate {
    title: String,
    content: String,
    created_at: String,
}

/// Renders a post looked up by its hash id.
///
/// # Endpoint
///
/// `GET /post/{hash_id}`
///
/// The hash id is opaque here; the upstream store decodes and validates
/// it. Cached under `post:<hash_id>` with the default TTL. All failure
/// modes render the not-found page with 404.
pub async fn post_handler(
    Path(hash_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .post_resolver
        .resolve(&hash_id)
        .await
        .ok_or_else(AppError::not_found)?;

    Ok(PostTemplate {
        title: post.title,
        content: post.content,
        created_at: post.created_at.format("%d/%m/%Y, %H:%M:%S").to_string(),
    })
}
