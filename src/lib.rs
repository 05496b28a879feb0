//! letterfeed - newsletter archive RSS proxy
//!
//! Fetches a TinyLetter-style newsletter archive page, extracts the issue
//! list from its HTML, and republishes it as an RSS 2.0 feed over HTTP.

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{LetterfeedError, Result};
pub use feed::{extract, normalize_path, render_rss, ArchiveFetcher, Feed, FeedService, Item};
pub use web::{create_router, AppState, WebServer};
