//! Handler for the public shortlink endpoint.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::application::services::Resolution;
use crate::domain::view_event::ViewEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the `alias+` details page.
#[derive(Template, WebTemplate)]
#[template(path = "link_info.html")]
struct LinkInfoTemplate {
    alias: String,
    destination: String,
    view: i64,
    created_at: String,
}

/// Resolves an alias and redirects, or renders the details page.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Request Flow
///
/// 1. Resolver sanitizes the alias and consults cache then upstream
/// 2. On a resolved destination, queue a view event (fire-and-forget)
/// 3. Respond `302 Found` with the destination in `Location`
///
/// An alias ending in `+` renders the details page instead: full record,
/// no cache, no view increment.
///
/// # View Counting
///
/// View events go to a bounded channel drained by the background view
/// worker. A full queue drops the event; the configured bypass alias
/// (used by smoke tests) never counts.
///
/// # Errors
///
/// Every failure mode renders the not-found page with 404; upstream
/// outages fail closed rather than producing a 500.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.link_resolver.resolve(&alias).await {
        Resolution::Redirect { alias, destination } => {
            if state.view_bypass_alias.as_deref() != Some(alias.as_str()) {
                let _ = state.view_sender.try_send(ViewEvent::new(alias));
            } else {
                debug!(alias = %alias, "View increment suppressed for bypass alias");
            }

            Ok((StatusCode::FOUND, [(header::LOCATION, destination)]).into_response())
        }
        Resolution::Info(link) => {
            let page = LinkInfoTemplate {
                alias: link.alias,
                destination: link.destination,
                view: link.view,
                created_at: link.created_at.format("%d/%m/%Y, %H:%M:%S").to_string(),
            };
            Ok(page.into_response())
        }
        Resolution::NotFound => Err(AppError::not_found()),
    }
}
