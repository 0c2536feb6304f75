//! HTTP request handlers.

mod cache_admin;
mod health;
mod post;
mod redirect;

pub use cache_admin::{delete_cache_handler, flush_cache_handler};
pub use health::health_handler;
pub use post::post_handler;
pub use redirect::redirect_handler;
