//! Catalog data model shared by the client, controller, favorites and GUI

use serde::{Deserialize, Serialize};

use crate::constants::text;

/// A single catalog artwork (read-only snapshot of the remote record)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: u64,

    /// Accepts `null` from the API as an empty title
    #[serde(default, deserialize_with = "deserialize_title")]
    pub title: String,

    #[serde(default)]
    pub artist_display: Option<String>,

    #[serde(default)]
    pub date_display: Option<String>,

    /// Opaque IIIF identifier, absent when the catalog has no image
    #[serde(default)]
    pub image_id: Option<String>,
}

/// Custom deserializer that maps a `null` title to an empty string
fn deserialize_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of catalog results, as returned by listing and search
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkPage {
    pub data: Vec<Artwork>,
}

impl Artwork {
    /// Key used in the persisted favorites mapping
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    /// Artist line for list entries and share text
    pub fn artist_or_unknown(&self) -> &str {
        non_empty(&self.artist_display).unwrap_or(text::UNKNOWN_ARTIST)
    }

    /// Date line for list entries
    pub fn date_or_unknown(&self) -> &str {
        non_empty(&self.date_display).unwrap_or(text::DATE_UNKNOWN)
    }

    /// "Artist: ..." line of the detail overlay
    pub fn artist_label(&self) -> String {
        format!("Artist: {}", non_empty(&self.artist_display).unwrap_or(text::UNKNOWN))
    }

    /// "Date: ..." line of the detail overlay
    pub fn date_label(&self) -> String {
        format!("Date: {}", non_empty(&self.date_display).unwrap_or(text::UNKNOWN))
    }

    /// Plain-text share payload: "<title> by <artist>"
    pub fn share_text(&self) -> String {
        format!("{} by {}", self.title, self.artist_or_unknown())
    }

    /// IIIF URL at a fixed width, full region, no rotation, default quality.
    /// None when the artwork has no image, so the caller renders a placeholder.
    pub fn image_url(&self, image_base_url: &str, width: u32) -> Option<String> {
        let image_id = non_empty(&self.image_id)?;
        Some(format!(
            "{}/{}/full/{},/0/default.jpg",
            image_base_url.trim_end_matches('/'),
            image_id,
            width
        ))
    }
}

/// Mirrors the `value || fallback` check: empty strings count as absent
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
