pub mod date;
pub mod document;

use std::fmt;

use crate::app::{FeedbellError, Result};
use crate::domain::NormalizedItem;

pub use date::parse_date;
use document::{first_text, AtomDocument, RssDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Rss,
    Atom,
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFormat::Rss => f.write_str("RSS"),
            FeedFormat::Atom => f.write_str("Atom"),
        }
    }
}

/// A document that matched one of the known feed shapes.
#[derive(Debug)]
pub enum ParsedFeed {
    Rss(RssDocument),
    Atom(AtomDocument),
}

impl ParsedFeed {
    pub fn format(&self) -> FeedFormat {
        match self {
            ParsedFeed::Rss(_) => FeedFormat::Rss,
            ParsedFeed::Atom(_) => FeedFormat::Atom,
        }
    }

    /// Title, link and raw date of every entry, in document order.
    fn into_entries(self) -> Vec<(String, String, String)> {
        match self {
            ParsedFeed::Rss(rss) => rss
                .channel
                .items
                .into_iter()
                .map(|item| {
                    (
                        first_text(item.titles).unwrap_or_default(),
                        first_text(item.links).unwrap_or_default(),
                        first_text(item.pub_dates).unwrap_or_default(),
                    )
                })
                .collect(),
            ParsedFeed::Atom(atom) => atom
                .entries
                .into_iter()
                .map(|entry| {
                    let link = entry.link().unwrap_or_default().to_string();
                    (
                        first_text(entry.titles).unwrap_or_default(),
                        link,
                        first_text(entry.published).unwrap_or_default(),
                    )
                })
                .collect(),
        }
    }
}

/// Match a raw document against the known shapes: RSS first, then Atom.
pub fn parse_feed(body: &[u8]) -> Result<ParsedFeed> {
    let root = document::root_element(body).ok_or_else(|| {
        FeedbellError::UnrecognizedFeedFormat("document is not XML".to_string())
    })?;

    let parsed = match root.as_str() {
        "rss" => quick_xml::de::from_reader::<_, RssDocument>(body).map(ParsedFeed::Rss),
        "feed" => quick_xml::de::from_reader::<_, AtomDocument>(body).map(ParsedFeed::Atom),
        other => {
            return Err(FeedbellError::UnrecognizedFeedFormat(format!(
                "unexpected root element <{}>",
                other
            )))
        }
    };

    parsed.map_err(|e| {
        FeedbellError::UnrecognizedFeedFormat(format!("malformed <{}> document: {}", root, e))
    })
}

/// Result of normalizing one document.
#[derive(Debug, Clone)]
pub struct NormalizedFeed {
    pub format: FeedFormat,
    pub items: Vec<NormalizedItem>,
    /// Entries dropped because their date could not be parsed.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse `body` and map its entries to [`NormalizedItem`]s.
    ///
    /// An entry whose date cannot be parsed is logged and skipped; the rest
    /// of the document is still processed.
    pub fn normalize(&self, body: &[u8]) -> Result<NormalizedFeed> {
        let parsed = parse_feed(body)?;
        let format = parsed.format();
        tracing::debug!("processing as {} feed", format);

        let mut items = Vec::new();
        let mut skipped = 0;

        for (title, link, raw_date) in parsed.into_entries() {
            match parse_date(&raw_date) {
                Ok(published) => {
                    if title.is_empty() {
                        // e.g. Atom `type="xhtml"` titles, whose text sits in child markup
                        tracing::warn!(link = %link, "{} entry has no plain-text title", format);
                    }
                    items.push(NormalizedItem {
                        title,
                        link,
                        published,
                    })
                }
                Err(e) => {
                    tracing::warn!(title = %title, "skipping {} entry: {}", format, e);
                    skipped += 1;
                }
            }
        }

        Ok(NormalizedFeed {
            format,
            items,
            skipped,
        })
    }
}
