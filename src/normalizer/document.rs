//! Structural shapes of the two supported syndication formats.
//!
//! Only the fields needed for a notification are modelled; everything else
//! in the document is ignored by the deserializer.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

/// RSS 2.0: `rss/channel/item{title,link,pubDate}`.
#[derive(Debug, Deserialize)]
pub struct RssDocument {
    #[serde(default)]
    pub channel: RssChannel,
}

#[derive(Debug, Default, Deserialize)]
pub struct RssChannel {
    #[serde(rename = "item", default)]
    pub items: Vec<RssItem>,
}

/// Elements are matched by local name, so extension elements such as
/// `itunes:title` or `atom:link` land in the same lists as the RSS ones.
#[derive(Debug, Default, Deserialize)]
pub struct RssItem {
    #[serde(rename = "title", default)]
    pub titles: Vec<Text>,
    #[serde(rename = "link", default)]
    pub links: Vec<Text>,
    #[serde(rename = "pubDate", default)]
    pub pub_dates: Vec<Text>,
}

/// Atom: `feed/entry{title,link[@href],published}`.
#[derive(Debug, Deserialize)]
pub struct AtomDocument {
    #[serde(rename = "entry", default)]
    pub entries: Vec<AtomEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AtomEntry {
    #[serde(rename = "title", default)]
    pub titles: Vec<Text>,
    #[serde(rename = "link", default)]
    pub links: Vec<AtomLink>,
    #[serde(rename = "published", default)]
    pub published: Vec<Text>,
}

/// Character content of an element. Attributes such as Atom's `type` and
/// child elements are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Text {
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AtomLink {
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "@rel", default)]
    pub rel: Option<String>,
}

/// First non-empty value among same-named elements.
pub fn first_text(values: Vec<Text>) -> Option<String> {
    values.into_iter().map(|t| t.value).find(|v| !v.is_empty())
}

impl AtomEntry {
    /// The entry's alternate link: the first link without a `rel` or with
    /// `rel="alternate"`, falling back to the first link of any kind.
    pub fn link(&self) -> Option<&str> {
        self.links
            .iter()
            .filter(|l| !l.href.is_empty())
            .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
            .or_else(|| self.links.iter().find(|l| !l.href.is_empty()))
            .map(|l| l.href.as_str())
    }
}

/// Local name of the document's root element, if the body is XML at all.
pub fn root_element(body: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                return Some(String::from_utf8_lossy(name.as_ref()).into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
        buf.clear();
    }
}
