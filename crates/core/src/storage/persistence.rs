//! Disk persistence for the gallery using JSON listing files.
//!
//! Each partition is stored as `<data_dir>/images.json` or
//! `<data_dir>/videos.json` in the listing envelope format. Writes go to a
//! uniquely named temp file that is then renamed over the listing, so
//! concurrent saves never share a temp path.

use crate::config;
use crate::content::{ContentKind, ListingFile, ListingRecord};
use crate::error::{GalleryError, GalleryResult};
use crate::storage::gallery::Gallery;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name holding the listing for `kind`.
pub fn listing_file_name(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Image => config::IMAGES_FILE,
        ContentKind::Video => config::VIDEOS_FILE,
    }
}

fn listing_path(dir: &Path, kind: ContentKind) -> PathBuf {
    dir.join(listing_file_name(kind))
}

/// Reads the records for `kind` from a listing file.
///
/// Accepts both the envelope and the bare-array forms.
pub fn load_listing(path: &Path, kind: ContentKind) -> GalleryResult<Vec<ListingRecord>> {
    let raw = fs::read(path)?;
    let listing: ListingFile =
        serde_json::from_slice(&raw).map_err(|source| GalleryError::MalformedListing {
            path: path.display().to_string(),
            source,
        })?;
    if !listing.holds(kind) {
        tracing::warn!(
            "Listing {:?} has no '{}' key, loading no {}",
            path,
            kind.plural(),
            kind.plural()
        );
    }
    Ok(listing.into_records(kind))
}

/// Loads both partitions from `dir`. Missing files leave the partition empty.
pub fn load_gallery(dir: &Path) -> GalleryResult<Gallery> {
    let gallery = Gallery::new();
    for kind in ContentKind::ALL {
        let path = listing_path(dir, kind);
        if !path.exists() {
            tracing::info!("No {} listing at {:?}, starting empty", kind, path);
            continue;
        }
        let records = load_listing(&path, kind)?;
        let loaded = gallery.replace_partition(kind, records);

        gallery
            .partition(kind)
            .data
            .read()
            .validate()
            .map_err(|e| GalleryError::Invalid(format!("{:?}: {}", path, e)))?;

        tracing::info!("Loaded {} {} from {:?}", loaded, kind.plural(), path);
    }
    Ok(gallery)
}

/// Writes both partitions to `dir`, creating it if needed.
pub fn save_gallery(gallery: &Gallery, dir: &Path) -> GalleryResult<()> {
    fs::create_dir_all(dir)?;
    for kind in ContentKind::ALL {
        let records: Vec<ListingRecord> =
            gallery.snapshot(kind).iter().map(ListingRecord::from).collect();
        let count = records.len();
        let bytes = serde_json::to_vec_pretty(&ListingFile::envelope(kind, records))?;

        let path = listing_path(dir, kind);

        // Atomic write: unique temp file in the same dir, then rename
        let mut tmp = tempfile::Builder::new()
            .prefix(listing_file_name(kind))
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::info!("Saved {} {} ({} bytes)", count, kind.plural(), bytes.len());
    }
    Ok(())
}
