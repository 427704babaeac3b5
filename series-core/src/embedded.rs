//! Data the server embeds in the page markup.
//!
//! The page carries three things the controller reads:
//!
//! - an element with id `local-media-data` whose `data-*` attributes name
//!   the content,
//! - an optional `<script id="local-episodes-db">` holding a JSON table of
//!   locally hosted episodes,
//! - a `data-default-theme` attribute on `<body>`.
//!
//! Extraction walks the markup with an event reader: comments are skipped,
//! ids are matched on the exact `id` attribute, and `<script>`/`<style>`
//! bodies are taken as raw text up to their closing tag.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use series_model::{EmbeddedDataset, LocalEpisodesDb};
use tracing::{debug, error};

use crate::error::Result;

/// Element id carrying the identity attributes.
pub const LOCAL_MEDIA_DATA_ID: &str = "local-media-data";
/// Script id carrying the local episode table.
pub const LOCAL_EPISODES_DB_ID: &str = "local-episodes-db";

const DATA_PREFIX: &str = "data-";
const DEFAULT_THEME_ATTRIBUTE: &str = "data-default-theme";
const RAW_TEXT_ELEMENTS: &[&[u8]] = &[b"script", b"style"];

/// Everything the controller reads from the page markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    /// `None` when the page has no `local-media-data` element.
    pub dataset: Option<EmbeddedDataset>,
    /// Raw text of the local episode script, if present and non-empty.
    pub local_episodes_json: Option<String>,
    /// The body's `data-default-theme`, if present.
    pub default_theme: Option<String>,
}

impl PageData {
    /// Extract the embedded inputs. Where an id repeats, the first element
    /// wins, as with `getElementById`.
    pub fn from_html(html: &str) -> Self {
        let mut data = Self::default();
        let mut offset = 0;
        let mut reader = create_reader(html);
        let mut last_error = None;

        loop {
            let (element, has_body) = match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Start(element)) => (element, true),
                Ok(Event::Empty(element)) => (element, false),
                Ok(_) => continue,
                Err(err) => {
                    let position = reader.buffer_position();
                    if last_error == Some(position) {
                        break;
                    }
                    last_error = Some(position);
                    debug!(
                        position = offset + to_index(position),
                        error = %err,
                        "skipping malformed markup"
                    );
                    continue;
                }
            };

            let tag = element.name().as_ref().to_ascii_lowercase();
            let attributes = html_attributes(&element);
            let id = attribute(&attributes, "id");

            if tag == b"body" && data.default_theme.is_none() {
                data.default_theme =
                    attribute(&attributes, DEFAULT_THEME_ATTRIBUTE).map(str::to_string);
            }

            if id == Some(LOCAL_MEDIA_DATA_ID) && data.dataset.is_none() {
                let mut dataset = EmbeddedDataset::default();
                for (name, value) in &attributes {
                    if let Some(name) = name.strip_prefix(DATA_PREFIX) {
                        dataset.set_attribute(name, value.clone());
                    }
                }
                data.dataset = Some(dataset);
            }

            if has_body && RAW_TEXT_ELEMENTS.contains(&tag.as_slice()) {
                let start = offset + to_index(reader.buffer_position());
                let (text, resume) = raw_text(html, start, &tag);

                if tag == b"script"
                    && id == Some(LOCAL_EPISODES_DB_ID)
                    && data.local_episodes_json.is_none()
                {
                    data.local_episodes_json =
                        Some(text.to_string()).filter(|body| !body.is_empty());
                }

                offset = resume;
                reader = create_reader(&html[resume..]);
                last_error = None;
            }
        }

        debug!(
            has_dataset = data.dataset.is_some(),
            has_episodes = data.local_episodes_json.is_some(),
            default_theme = ?data.default_theme,
            "extracted embedded page data"
        );

        data
    }

    pub fn load(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::from_html(&html))
    }

    /// Parse the local episode table. Any failure is logged and yields an
    /// empty table.
    pub fn local_episodes_db(&self) -> LocalEpisodesDb {
        parse_local_episodes(self.local_episodes_json.as_deref())
    }
}

/// Parse an embedded local episode payload, degrading to an empty table.
pub fn parse_local_episodes(raw: Option<&str>) -> LocalEpisodesDb {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return LocalEpisodesDb::new();
    };

    match LocalEpisodesDb::from_json(raw) {
        Ok(db) => db,
        Err(err) => {
            error!(
                error = %err,
                "Error parsing {} from script tag",
                LOCAL_EPISODES_DB_ID
            );
            LocalEpisodesDb::new()
        }
    }
}

fn create_reader(html: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader
}

fn to_index<P: TryInto<usize>>(position: P) -> usize {
    position.try_into().unwrap_or(usize::MAX)
}

/// Attributes with lowercased names and decoded values. Valueless
/// attributes such as `hidden` map to an empty string.
fn html_attributes(element: &BytesStart<'_>) -> Vec<(String, String)> {
    element
        .html_attributes()
        .flatten()
        .map(|attr| {
            let name = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            (name, value)
        })
        .collect()
}

fn attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Body of a raw text element starting at `start`, and the index just past
/// its closing tag.
fn raw_text<'a>(html: &'a str, start: usize, tag: &[u8]) -> (&'a str, usize) {
    let Some(rest) = html.get(start..) else {
        return ("", html.len());
    };
    let closing = format!("</{}", String::from_utf8_lossy(tag));

    match rest.to_ascii_lowercase().find(&closing) {
        Some(end) => {
            let resume = rest[end..]
                .find('>')
                .map_or(html.len(), |gt| start + end + gt + 1);
            (&rest[..end], resume)
        }
        None => (rest, html.len()),
    }
}
