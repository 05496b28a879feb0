//! HTML extraction for newsletter archive pages.
//!
//! Locates the issue list inside an archive page and converts it into a
//! [`Feed`], one item per list entry. Extraction is a single-pass
//! depth-first walk with no state shared across documents; per-entry
//! problems (a malformed date, a missing link) degrade that entry's fields
//! but never fail the whole feed.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use scraper::{ElementRef, Html, Selector};

use crate::error::{LetterfeedError, Result};
use crate::feed::types::{Feed, Item};

/// Date format used on archive pages, e.g. "September 21, 2018".
const DATE_FORMAT: &str = "%B %d, %Y";

/// Structural role of a list-entry child element, keyed on its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldRole {
    /// Publication date text.
    Date,
    /// Issue link and title.
    Link,
    /// Issue summary text.
    Snippet,
    /// Anything else; ignored by the entry walk.
    Unrecognized,
}

/// Classify a list-entry child element by its class tokens.
fn classify(el: &ElementRef) -> FieldRole {
    let Some(class) = el.value().attr("class") else {
        return FieldRole::Unrecognized;
    };
    for token in class.split_ascii_whitespace() {
        match token {
            "message-date" => return FieldRole::Date,
            "message-link" => return FieldRole::Link,
            "message-snippet" => return FieldRole::Snippet,
            _ => {}
        }
    }
    FieldRole::Unrecognized
}

/// Extract a [`Feed`] from a raw archive page.
///
/// `archive_path` must already be normalized; together with `base_url` it
/// forms the feed's link. The page title becomes the feed title (empty
/// when the document has none), and the first unordered list in document
/// order is taken as the issue list. A page without any list yields a
/// valid feed with zero items.
///
/// # Errors
///
/// Returns `Parse` when the body is not valid UTF-8. Malformed markup is
/// not an error; the HTML parser recovers whatever tree it can.
pub fn extract(body: &[u8], archive_path: &str, base_url: &str) -> Result<Feed> {
    let html = std::str::from_utf8(body)
        .map_err(|e| LetterfeedError::Parse(format!("document is not valid UTF-8: {e}")))?;
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(collapsed_text)
        .unwrap_or_default();

    let mut feed = Feed::new(title, format!("{base_url}{archive_path}"));

    let Some(list) = Selector::parse("ul")
        .ok()
        .and_then(|sel| document.select(&sel).next())
    else {
        return Ok(feed);
    };

    for entry in list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
    {
        feed.items.push(extract_item(entry));
    }

    Ok(feed)
}

/// Build one [`Item`] from a list-entry node.
///
/// Every list entry yields exactly one item; fields whose role element is
/// missing stay empty, and the publication date defaults to the fetch
/// time.
fn extract_item(entry: ElementRef) -> Item {
    let mut item = Item::new();
    for child in entry.children().filter_map(ElementRef::wrap) {
        match classify(&child) {
            FieldRole::Date => {
                item.published_at = parse_entry_date(&collapsed_text(child));
            }
            FieldRole::Link => {
                item.title = collapsed_text(child);
                item.link = find_href(child).unwrap_or_default().trim().to_string();
            }
            FieldRole::Snippet => {
                item.description = collapsed_text(child);
            }
            FieldRole::Unrecognized => {}
        }
    }
    item
}

/// Parse an entry's date text, falling back to the current time.
///
/// A single malformed archive entry must not deny service for the whole
/// feed, so the failure is logged and the entry keeps a valid timestamp.
fn parse_entry_date(text: &str) -> DateTime<Utc> {
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => date.and_time(NaiveTime::MIN).and_utc(),
        Err(e) => {
            tracing::warn!(date = %text, error = %e, "unparsable entry date, substituting fetch time");
            Utc::now()
        }
    }
}

/// Find the first `href` attribute on the element or its descendants,
/// depth-first.
fn find_href(el: ElementRef<'_>) -> Option<&str> {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .find_map(|d| d.value().attr("href"))
}

/// The space-joined, trimmed text of all descendant text nodes,
/// depth-first, left-to-right, with whitespace runs collapsed to single
/// spaces.
fn collapsed_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
