//! Content records for AiNura.
//!
//! A [`ContentItem`] is one gallery entry (an image or a video) with its
//! generation prompt, author, and like count. [`ListingRecord`] and
//! [`ListingFile`] describe the JSON listing format shared by the on-disk
//! fixtures and the upstream listing endpoint, where the kind is implied by
//! the envelope key rather than stored per record.

use crate::error::GalleryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The partition a content item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Image,
    Video,
}

impl ContentKind {
    /// Both kinds, in partition order.
    pub const ALL: [ContentKind; 2] = [ContentKind::Image, ContentKind::Video];

    /// Singular lowercase name (`"image"` / `"video"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Video => "video",
        }
    }

    /// Plural name used as the listing envelope key and upstream path segment.
    pub fn plural(self) -> &'static str {
        match self {
            ContentKind::Image => "images",
            ContentKind::Video => "videos",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" | "images" => Ok(ContentKind::Image),
            "video" | "videos" => Ok(ContentKind::Video),
            _ => Err(GalleryError::UnknownKind(s.to_string())),
        }
    }
}

/// A gallery entry.
///
/// `(kind, id)` is unique within a pool. Ranking treats items as immutable;
/// only the pool mutates `popularity` (likes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// Free-text generation prompt; the primary similarity signal.
    #[serde(rename = "prompt", default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    /// Like count.
    #[serde(rename = "likes", default)]
    pub popularity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ContentItem {
    /// Creates an item with no media URLs.
    pub fn new(
        kind: ContentKind,
        id: u64,
        description: impl Into<String>,
        author: impl Into<String>,
        popularity: u64,
    ) -> Self {
        Self {
            id,
            kind,
            description: description.into(),
            author: author.into(),
            popularity,
            url: None,
            thumbnail: None,
        }
    }
}

/// A listing entry as stored in fixture files and returned by the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: u64,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub likes: u64,
    /// Upstream records name this field `image`.
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ListingRecord {
    /// Attaches a kind to produce a pool item.
    pub fn into_item(self, kind: ContentKind) -> ContentItem {
        ContentItem {
            id: self.id,
            kind,
            description: self.prompt,
            author: self.author,
            popularity: self.likes,
            url: self.url,
            thumbnail: self.thumbnail,
        }
    }
}

impl From<&ContentItem> for ListingRecord {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id,
            prompt: item.description.clone(),
            author: item.author.clone(),
            likes: item.popularity,
            url: item.url.clone(),
            thumbnail: item.thumbnail.clone(),
        }
    }
}

/// A listing document: either a bare array or an `{"images": [...]}` /
/// `{"videos": [...]}` envelope.
///
/// Any JSON object decodes as an envelope; use [`ListingFile::holds`] to tell
/// an empty listing from one that lacks the expected key.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingFile {
    Bare(Vec<ListingRecord>),
    Envelope {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        images: Option<Vec<ListingRecord>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        videos: Option<Vec<ListingRecord>>,
    },
}

impl ListingFile {
    /// Wraps records under the envelope key for `kind`.
    pub fn envelope(kind: ContentKind, records: Vec<ListingRecord>) -> Self {
        match kind {
            ContentKind::Image => ListingFile::Envelope {
                images: Some(records),
                videos: None,
            },
            ContentKind::Video => ListingFile::Envelope {
                images: None,
                videos: Some(records),
            },
        }
    }

    /// Returns `true` for a bare array or an envelope carrying the key for `kind`.
    pub fn holds(&self, kind: ContentKind) -> bool {
        match (self, kind) {
            (ListingFile::Bare(_), _) => true,
            (ListingFile::Envelope { images, .. }, ContentKind::Image) => images.is_some(),
            (ListingFile::Envelope { videos, .. }, ContentKind::Video) => videos.is_some(),
        }
    }

    /// Extracts the records for `kind`. A bare array is taken as-is; a missing
    /// envelope key yields no records.
    pub fn into_records(self, kind: ContentKind) -> Vec<ListingRecord> {
        match (self, kind) {
            (ListingFile::Bare(records), _) => records,
            (ListingFile::Envelope { images, .. }, ContentKind::Image) => {
                images.unwrap_or_default()
            }
            (ListingFile::Envelope { videos, .. }, ContentKind::Video) => {
                videos.unwrap_or_default()
            }
        }
    }
}
