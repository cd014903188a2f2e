//! Partition and gallery data structures.
//!
//! A [`Partition`] holds the items of one kind in pool order (newest first)
//! with an id → position index. [`Gallery`] owns both partitions and exposes
//! listing, likes, uploads, upstream merges, and the ranking entry points.
//! Ranking runs under a read lock directly on the partition slice.

use crate::config;
use crate::content::{ContentItem, ContentKind, ListingRecord};
use crate::error::{GalleryError, GalleryResult};
use crate::search::{find_similar, search_prompts, PromptQuery, ScoredCandidate, SearchHit};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Items of one kind, protected by a `RwLock` in [`Partition`].
#[derive(Debug)]
pub struct PartitionData {
    pub kind: ContentKind,
    items: Vec<ContentItem>,
    /// id → index into `items`.
    positions: HashMap<u64, usize>,
}

impl PartitionData {
    /// Creates an empty partition.
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Items in pool order.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&ContentItem> {
        self.positions.get(&id).map(|&pos| &self.items[pos])
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut ContentItem> {
        let pos = *self.positions.get(&id)?;
        self.items.get_mut(pos)
    }

    /// Next id for an upload: one past the current maximum, or `None` when
    /// the maximum is `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        match self.items.iter().map(|i| i.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    fn reindex(&mut self) {
        self.positions = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect();
    }

    /// Puts `new_items` ahead of the existing items.
    fn prepend(&mut self, mut new_items: Vec<ContentItem>) {
        new_items.append(&mut self.items);
        self.items = new_items;
        self.reindex();
    }

    /// Checks that ids are unique, the index is consistent, and every item
    /// carries this partition's kind.
    pub fn validate(&self) -> Result<(), String> {
        if self.positions.len() != self.items.len() {
            return Err(format!(
                "index size {} != item count {} (duplicate ids?)",
                self.positions.len(),
                self.items.len()
            ));
        }
        for (pos, item) in self.items.iter().enumerate() {
            if item.kind != self.kind {
                return Err(format!(
                    "{} {} stored in {} partition",
                    item.kind, item.id, self.kind
                ));
            }
            if self.positions.get(&item.id) != Some(&pos) {
                return Err(format!("index entry for {} {} is stale", item.kind, item.id));
            }
        }
        Ok(())
    }
}

/// A thread-safe partition handle. Cloning shares the same data.
#[derive(Debug, Clone)]
pub struct Partition {
    pub data: Arc<RwLock<PartitionData>>,
}

impl Partition {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            data: Arc::new(RwLock::new(PartitionData::new(kind))),
        }
    }
}

/// Fields accepted for an upload.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    /// Explicit id; assigned automatically when `None`.
    pub id: Option<u64>,
    pub description: String,
    pub author: String,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
}

impl NewItem {
    fn validate(&self) -> GalleryResult<()> {
        if self.description.trim().is_empty() {
            return Err(GalleryError::Invalid("prompt must not be empty".into()));
        }
        if self.description.chars().count() > config::MAX_PROMPT_LEN {
            return Err(GalleryError::Invalid(format!(
                "prompt exceeds {} characters",
                config::MAX_PROMPT_LEN
            )));
        }
        if self.author.chars().count() > config::MAX_AUTHOR_LEN {
            return Err(GalleryError::Invalid(format!(
                "author exceeds {} characters",
                config::MAX_AUTHOR_LEN
            )));
        }
        Ok(())
    }
}

/// The content pool: one partition per kind.
#[derive(Debug, Clone)]
pub struct Gallery {
    images: Partition,
    videos: Partition,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl Gallery {
    /// Creates an empty gallery.
    pub fn new() -> Self {
        Self {
            images: Partition::new(ContentKind::Image),
            videos: Partition::new(ContentKind::Video),
        }
    }

    /// Returns the partition for `kind`.
    pub fn partition(&self, kind: ContentKind) -> &Partition {
        match kind {
            ContentKind::Image => &self.images,
            ContentKind::Video => &self.videos,
        }
    }

    /// Replaces a partition's contents with `records`, keeping their order.
    /// Records repeating an earlier id are skipped. Returns the number loaded.
    pub fn replace_partition(&self, kind: ContentKind, records: Vec<ListingRecord>) -> usize {
        let mut seen = HashSet::with_capacity(records.len());
        let mut skipped = 0usize;
        let items: Vec<ContentItem> = records
            .into_iter()
            .filter(|r| {
                let fresh = seen.insert(r.id);
                if !fresh {
                    skipped += 1;
                }
                fresh
            })
            .map(|r| r.into_item(kind))
            .collect();
        if skipped > 0 {
            tracing::warn!(%kind, skipped, "Skipped listing records with duplicate ids");
        }

        let count = items.len();
        let mut data = self.partition(kind).data.write();
        data.items = items;
        data.reindex();
        count
    }

    /// Merges an upstream listing: records with unseen ids are placed ahead of
    /// existing items in listing order; known ids are left untouched.
    /// Returns the number of items added.
    pub fn merge_listing(&self, kind: ContentKind, records: Vec<ListingRecord>) -> usize {
        let mut data = self.partition(kind).data.write();
        let mut seen: HashSet<u64> = data.positions.keys().copied().collect();
        let fresh: Vec<ContentItem> = records
            .into_iter()
            .filter(|r| seen.insert(r.id))
            .map(|r| r.into_item(kind))
            .collect();
        let added = fresh.len();
        if added > 0 {
            data.prepend(fresh);
        }
        added
    }

    /// Adds an uploaded item at the front of its partition.
    pub fn insert_front(&self, kind: ContentKind, new: NewItem) -> GalleryResult<ContentItem> {
        new.validate()?;
        let mut data = self.partition(kind).data.write();
        let id = match new.id {
            Some(id) => id,
            None => data.next_id().ok_or_else(|| {
                GalleryError::Invalid(format!("no {} id left after {}", kind, u64::MAX))
            })?,
        };
        if data.positions.contains_key(&id) {
            return Err(GalleryError::Duplicate { kind, id });
        }
        let item = ContentItem {
            id,
            kind,
            description: new.description,
            author: new.author,
            popularity: 0,
            url: new.url,
            thumbnail: new.thumbnail,
        };
        data.prepend(vec![item.clone()]);
        Ok(item)
    }

    /// Returns a copy of the item, or `None` if absent.
    pub fn get(&self, kind: ContentKind, id: u64) -> Option<ContentItem> {
        self.partition(kind).data.read().get(id).cloned()
    }

    /// A page of items in pool order.
    pub fn list(&self, kind: ContentKind, offset: usize, limit: usize) -> Vec<ContentItem> {
        let data = self.partition(kind).data.read();
        data.items.iter().skip(offset).take(limit).cloned().collect()
    }

    /// Copies every item of `kind`, in pool order.
    pub fn snapshot(&self, kind: ContentKind) -> Vec<ContentItem> {
        self.partition(kind).data.read().items.clone()
    }

    pub fn len(&self, kind: ContentKind) -> usize {
        self.partition(kind).data.read().items.len()
    }

    pub fn total_len(&self) -> usize {
        ContentKind::ALL.iter().map(|&k| self.len(k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Adds one like. Returns the new count.
    pub fn like(&self, kind: ContentKind, id: u64) -> GalleryResult<u64> {
        let mut data = self.partition(kind).data.write();
        let item = data.get_mut(id).ok_or(GalleryError::NotFound { kind, id })?;
        item.popularity = item.popularity.saturating_add(1);
        Ok(item.popularity)
    }

    /// Removes one like, never going below zero. Returns the new count.
    pub fn unlike(&self, kind: ContentKind, id: u64) -> GalleryResult<u64> {
        let mut data = self.partition(kind).data.write();
        let item = data.get_mut(id).ok_or(GalleryError::NotFound { kind, id })?;
        item.popularity = item.popularity.saturating_sub(1);
        Ok(item.popularity)
    }

    /// Items similar to `(kind, id)`. See [`find_similar`].
    pub fn find_similar(&self, kind: ContentKind, id: u64) -> GalleryResult<Vec<ScoredCandidate>> {
        let data = self.partition(kind).data.read();
        find_similar(kind, id, &data.items)
    }

    /// Prompt search across both partitions, images first.
    pub fn search(&self, query: &str, options: &PromptQuery) -> Vec<SearchHit> {
        // lock order: images, then videos
        let images = self.images.data.read();
        let videos = self.videos.data.read();
        search_prompts(query, images.items.iter().chain(videos.items.iter()), options)
    }
}
