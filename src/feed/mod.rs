//! Archive-to-feed pipeline for letterfeed.
//!
//! This module fetches newsletter archive pages, extracts the issue list
//! and serializes it as RSS.

pub mod extractor;
pub mod fetcher;
pub mod rss;
pub mod service;
pub mod types;

pub use extractor::extract;
pub use fetcher::{normalize_path, ArchiveFetcher};
pub use rss::render_rss;
pub use service::FeedService;
pub use types::{Feed, Item};
