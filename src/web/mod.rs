//! Web layer for letterfeed.
//!
//! One endpoint: the request path selects the newsletter archive, the
//! response is its RSS feed.

pub mod handlers;
pub mod router;
pub mod server;

pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
