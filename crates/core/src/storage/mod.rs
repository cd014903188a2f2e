//! Storage layer: content partitions and listing persistence.
//!
//! Items live in-memory in one [`Partition`] per kind, grouped by a
//! [`Gallery`]. Durability is provided by JSON listing files written with
//! an atomic temp-file + rename.

/// Partition and gallery data structures.
pub mod gallery;
/// Listing file load/save with atomic writes.
pub mod persistence;

pub use gallery::{Gallery, NewItem, Partition, PartitionData};
pub use persistence::{load_gallery, load_listing, save_gallery};
