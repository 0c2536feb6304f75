//! Domain entities mirrored from the upstream store's read endpoints.

mod link;
mod post;

pub use link::Link;
pub use post::Post;
