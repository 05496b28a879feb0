//! Feed data model for letterfeed.
//!
//! A [`Feed`] is built fresh for every request, never persisted, and
//! discarded after serialization.

use chrono::{DateTime, Utc};

/// An extracted newsletter feed.
#[derive(Debug, Clone)]
pub struct Feed {
    /// Feed title, taken from the archive page's document title.
    pub title: String,
    /// Link to the newsletter's page on the archive host.
    pub link: String,
    /// When this feed was built.
    pub created_at: DateTime<Utc>,
    /// Items in document order, newest first as published by the source.
    pub items: Vec<Item>,
}

impl Feed {
    /// Create an empty feed with the given title and link.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }
}

/// One newsletter issue's metadata.
#[derive(Debug, Clone)]
pub struct Item {
    /// Issue title.
    pub title: String,
    /// Link to the issue; may be empty when the source entry carries none.
    pub link: String,
    /// Issue summary text.
    pub description: String,
    /// Publication date; falls back to the fetch time when the source date
    /// is missing or malformed.
    pub published_at: DateTime<Utc>,
}

impl Item {
    /// Create an item with empty fields and a fetch-time publication date.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            link: String::new(),
            description: String::new(),
            published_at: Utc::now(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the publication date.
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}
