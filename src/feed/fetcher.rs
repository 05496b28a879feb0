//! Archive page fetcher.
//!
//! Performs one outbound GET per invocation against the configured archive
//! host, with bounded timeouts and a response size cap. No caching, no
//! retry.

use std::time::Duration;

use reqwest::Client;

use crate::config::UpstreamConfig;
use crate::error::{LetterfeedError, Result};

/// User agent string for archive fetching.
const USER_AGENT: &str = "letterfeed/0.1 (RSS proxy)";

/// Fetches newsletter archive pages from the upstream host.
pub struct ArchiveFetcher {
    client: Client,
    base_url: String,
    max_response_size: u64,
}

impl ArchiveFetcher {
    /// Create a new fetcher from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LetterfeedError::Fetch(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_response_size: config.max_response_size_bytes,
        })
    }

    /// The upstream base origin, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the outbound archive URL for the given archive path.
    pub fn archive_url(&self, archive_path: &str) -> String {
        let path = normalize_path(archive_path);
        if path == "/" {
            format!("{}/archive", self.base_url)
        } else {
            format!("{}{}/archive", self.base_url, path)
        }
    }

    /// Fetch the raw archive page for the given archive path.
    ///
    /// # Errors
    ///
    /// Returns `Fetch` on transport failure and `Upstream` when the host
    /// answers with a non-success status; the body is not read in that
    /// case.
    pub async fn fetch(&self, archive_path: &str) -> Result<Vec<u8>> {
        let url = self.archive_url(archive_path);
        tracing::info!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LetterfeedError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LetterfeedError::Upstream(status.to_string()));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_response_size {
                return Err(LetterfeedError::Fetch(format!(
                    "archive page too large: {} bytes (max {} bytes)",
                    content_length, self.max_response_size
                )));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LetterfeedError::Fetch(format!("failed to read response body: {e}")))?;

        if body.len() as u64 > self.max_response_size {
            return Err(LetterfeedError::Fetch(format!(
                "archive page too large: {} bytes (max {} bytes)",
                body.len(),
                self.max_response_size
            )));
        }

        Ok(body.to_vec())
    }
}

/// Normalize an archive path the way `path.Join`/`path.Clean` would:
/// duplicate separators collapse, `.` segments drop, `..` pops one segment
/// and can never climb above the root. The result always has a leading
/// slash and no trailing slash.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut out = String::from("/");
    out.push_str(&segments.join("/"));
    out
}
