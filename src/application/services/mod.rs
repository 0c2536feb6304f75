//! Application services orchestrating cache and upstream store.

mod link_resolver;
mod post_resolver;

pub use link_resolver::{LinkResolver, Resolution};
pub use post_resolver::PostResolver;
