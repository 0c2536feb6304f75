//! Application error type rendered as HTML pages.
//!
//! Public routes serve people following shortlinks, so failures render
//! the not-found/error pages rather than JSON. The admin cache
//! endpoints build their JSON envelopes directly and do not go through
//! this type.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::any::Any;
use tracing::error;

/// Template for the not-found page (`templates/not_found.html`).
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {}

/// Template for the generic error page (`templates/error.html`).
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    message: String,
}

#[derive(Debug)]
pub enum AppError {
    /// Alias or post absent upstream, or an unusable upstream payload.
    NotFound,
    /// Unexpected failure; the message is logged and only shown on the
    /// page in debug builds.
    Internal { message: String },
}

impl AppError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response()
            }
            AppError::Internal { message } => {
                error!("Internal error: {}", message);

                let shown = if cfg!(debug_assertions) {
                    message
                } else {
                    "Internal server error".to_string()
                };

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorTemplate { message: shown },
                )
                    .into_response()
            }
        }
    }
}

/// Converts a caught panic into the generic error page.
///
/// Installed as the `CatchPanicLayer` handler so nothing escaping a
/// handler can take the connection down without a response.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::internal(message).into_response()
}
