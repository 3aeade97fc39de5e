use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::FeedError;
use crate::error::ParseError;
use crate::models::FeedEntry;

/// `pubDate` layout used by the feed: RFC 1123 with a numeric zone,
/// e.g. `Tue, 07 Aug 2018 12:09:46 -0700`.
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// An `<item>` as it appears on the wire, before its date is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub pub_date: Option<String>,
}

/// Parse an RSS document into its items, in document order.
///
/// Titles are kept exactly as published, surrounding whitespace included.
pub fn parse_rss(xml: &[u8]) -> Result<Vec<RawItem>, FeedError> {
    let mut reader = Reader::from_reader(xml);

    let mut items = Vec::new();
    let mut buf = Vec::new();

    let mut seen_root = false;
    let mut current_item: Option<RawItem> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "rss" | "channel" => seen_root = true,
                    "item" => current_item = Some(RawItem::default()),
                    _ => {}
                }
                current_element = name;
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current_item.take() {
                        items.push(item);
                    }
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = e
                        .unescape()
                        .map_err(|e| FeedError::Malformed(format!("XML parse error: {}", e)))?;
                    item.set_field(&current_element, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = String::from_utf8_lossy(&e);
                    item.set_field(&current_element, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Malformed(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(FeedError::Malformed(
            "document is not an RSS feed".to_string(),
        ));
    }

    Ok(items)
}

impl RawItem {
    fn set_field(&mut self, element: &str, text: &str) {
        match element {
            "title" => self.title.push_str(text),
            "pubDate" => self
                .pub_date
                .get_or_insert_with(String::new)
                .push_str(text),
            _ => {}
        }
    }

    /// Interpret the publication date. A missing date is a parse error too.
    pub fn into_entry(self) -> Result<FeedEntry, ParseError> {
        let value = self.pub_date.unwrap_or_default();
        let published = parse_pub_date(value.trim())?;
        Ok(FeedEntry::new(self.title, published))
    }
}

pub fn parse_pub_date(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_str(value, PUB_DATE_FORMAT)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ParseError::new(value, e))
}
