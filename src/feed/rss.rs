//! RSS 2.0 serialization for extracted feeds.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{LetterfeedError, Result};
use crate::feed::types::{Feed, Item};

/// Render a feed as an RSS 2.0 document.
pub fn render_rss(feed: &Feed) -> Result<String> {
    let bytes =
        write_document(feed).map_err(|e| LetterfeedError::Serialize(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LetterfeedError::Serialize(e.to_string()))
}

fn write_document(feed: &Feed) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss_start = BytesStart::new("rss");
    rss_start.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss_start))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &feed.title)?;
    write_text_element(&mut writer, "link", &feed.link)?;
    write_text_element(&mut writer, "description", &feed.title)?;
    write_text_element(&mut writer, "lastBuildDate", &feed.created_at.to_rfc2822())?;

    for item in &feed.items {
        write_item(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(writer.into_inner())
}

fn write_item<W: std::io::Write>(
    writer: &mut Writer<W>,
    item: &Item,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "link", &item.link)?;
    write_text_element(writer, "description", &item.description)?;
    write_text_element(writer, "pubDate", &item.published_at.to_rfc2822())?;
    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
