//! Feed service for letterfeed.
//!
//! Composes the fetch, extraction and serialization steps into the one
//! logical operation the service exposes: given an archive path, return a
//! feed.

use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::feed::extractor::extract;
use crate::feed::fetcher::{normalize_path, ArchiveFetcher};
use crate::feed::rss::render_rss;
use crate::feed::types::Feed;

/// Service resolving archive paths to feeds.
pub struct FeedService {
    fetcher: ArchiveFetcher,
}

impl FeedService {
    /// Create a new service from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            fetcher: ArchiveFetcher::new(config)?,
        })
    }

    /// Fetch and extract the feed for the given archive path.
    ///
    /// # Errors
    ///
    /// Returns `Fetch`/`Upstream` when the archive page cannot be
    /// retrieved and `Parse` when the body cannot be decoded.
    pub async fn feed_for(&self, archive_path: &str) -> Result<Feed> {
        let body = self.fetcher.fetch(archive_path).await?;
        extract(&body, &normalize_path(archive_path), self.fetcher.base_url())
    }

    /// Fetch, extract and serialize the feed as RSS 2.0.
    pub async fn rss_for(&self, archive_path: &str) -> Result<String> {
        let feed = self.feed_for(archive_path).await?;
        render_rss(&feed)
    }
}
