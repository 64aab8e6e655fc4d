//! Server HTTP handlers.

mod flags;
mod popular;
mod sitemap;

pub use flags::flags_handler;
pub use popular::popular_handler;
pub use sitemap::sitemap_handler;
