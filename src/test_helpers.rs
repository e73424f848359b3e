//! Shared test utilities for the school-gallery test suite.
//!
//! Provides fixture builders for photos and galleries, panicking lookups,
//! and a tiny PNG encoder for upload tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let mut gallery = gallery_with(vec![photo("a", "2022-01-01")], Vec::new());
//! gallery.toggle_like("a").unwrap();
//! assert_eq!(find_approved(&gallery, "a").likes, 1);
//! ```

use chrono::{Datelike, NaiveDate};
use std::io::{self, Cursor};

use crate::config::{GalleryConfig, SeedConfig};
use crate::gallery::Gallery;
use crate::repository::PhotoRepository;
use crate::store::{KeyValueStore, MemoryStore, StoreError};
use crate::types::Photo;

// =========================================================================
// Fixture builders
// =========================================================================

/// A photo dated `date` (`YYYY-MM-DD`) with its year derived from the date.
pub fn photo(id: &str, date: &str) -> Photo {
    let date: NaiveDate = date
        .parse()
        .unwrap_or_else(|e| panic!("bad fixture date '{date}': {e}"));
    Photo {
        id: id.to_string(),
        url: format!("data:image/png;base64,{id}"),
        year: date.year(),
        date,
        width: 300,
        height: 400,
        likes: 0,
    }
}

/// The JSON record for [`photo`], as it would appear in storage.
pub fn photo_json(id: &str, date: &str) -> String {
    serde_json::to_string(&photo(id, date)).unwrap()
}

/// Default config with first-run seeding turned off.
pub fn unseeded_config() -> GalleryConfig {
    GalleryConfig {
        seed: SeedConfig::disabled(),
        ..GalleryConfig::default()
    }
}

/// A gallery over an empty in-memory store, no placeholder photos.
pub fn empty_gallery() -> Gallery<MemoryStore> {
    let (gallery, _) = Gallery::load(MemoryStore::new(), unseeded_config()).unwrap();
    gallery
}

/// A gallery whose store already holds the given collections.
pub fn gallery_with(approved: Vec<Photo>, pending: Vec<Photo>) -> Gallery<MemoryStore> {
    let mut store = MemoryStore::new();
    PhotoRepository::new(approved, pending)
        .save(&mut store)
        .unwrap();
    let (gallery, report) = Gallery::load(store, unseeded_config()).unwrap();
    assert!(report.is_clean(), "fixture load was not clean: {report:?}");
    gallery
}

/// Like [`gallery_with`], over a [`FlakyStore`] that accepts every write
/// until a key is marked failing.
pub fn flaky_gallery_with(approved: Vec<Photo>, pending: Vec<Photo>) -> Gallery<FlakyStore> {
    let mut store = FlakyStore::default();
    PhotoRepository::new(approved, pending)
        .save(&mut store)
        .unwrap();
    let (gallery, report) = Gallery::load(store, unseeded_config()).unwrap();
    assert!(report.is_clean(), "fixture load was not clean: {report:?}");
    gallery
}

/// PNG-encoded bytes of a black `width`×`height` image.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image::RgbImage::new(width, height)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

// =========================================================================
// Lookups — panics with a clear message on miss
// =========================================================================

/// Find an approved photo by id. Panics if not found.
pub fn find_approved<'a>(gallery: &'a Gallery<MemoryStore>, id: &str) -> &'a Photo {
    gallery
        .approved()
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| {
            let ids = ids(gallery.approved());
            panic!("approved photo '{id}' not found. Available: {ids:?}")
        })
}

/// Ids in iteration order.
pub fn ids<'a>(photos: impl IntoIterator<Item = &'a Photo>) -> Vec<&'a str> {
    photos.into_iter().map(|p| p.id.as_str()).collect()
}

// =========================================================================
// Failing store
// =========================================================================

/// An in-memory store whose writes to `failing_key` return an I/O error.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub failing_key: Option<String>,
}

impl FlakyStore {
    pub fn fail_writes_to(&mut self, key: &str) {
        self.failing_key = Some(key.to_string());
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing_key.as_deref() == Some(key) {
            return Err(StoreError::Io(io::Error::other(format!(
                "write to {key} refused"
            ))));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}
