//! In-memory mirror of the approved and pending photo collections.
//!
//! The repository owns the two sequences and knows how to read them from and
//! write them to a [`KeyValueStore`]. It does not decide *when* to write:
//! the [`Gallery`](crate::gallery::Gallery) context calls [`save`](PhotoRepository::save)
//! after every mutation so storage always reflects memory.
//!
//! # Loading
//!
//! Each record is parsed as a JSON array and every element is validated
//! against the [`Photo`] schema on its own. Recovery is deterministic:
//!
//! | Stored state | Result |
//! |---|---|
//! | approved key absent | seed photos, persisted immediately |
//! | record not a JSON array | treated as absent (seed / empty) |
//! | element fails the schema | element dropped |
//! | id repeated within a collection | first occurrence kept |
//! | id both approved and pending | pending copy dropped |
//!
//! Every recovery is logged at `warn` and listed in the returned
//! [`LoadReport`]. When anything was seeded or repaired the repaired state
//! is written back before `load` returns.

use rand::Rng;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use crate::config::SeedConfig;
use crate::seed;
use crate::store::{KeyValueStore, StoreError};
use crate::types::Photo;

/// Store key for the public gallery.
pub const APPROVED_KEY: &str = "school_gallery_photos";
/// Store key for the moderation queue.
pub const PENDING_KEY: &str = "school_gallery_pending";

/// One deterministic repair applied while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// The whole record was unparsable and was replaced.
    MalformedRecord { key: String, reason: String },
    /// One element failed schema validation and was dropped.
    InvalidEntry {
        key: String,
        index: usize,
        reason: String,
    },
    /// A repeated id was dropped from `key`.
    DuplicateId { key: String, id: String },
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recovery::MalformedRecord { key, reason } => {
                write!(f, "{key}: unreadable record replaced ({reason})")
            }
            Recovery::InvalidEntry { key, index, reason } => {
                write!(f, "{key}[{index}]: invalid entry dropped ({reason})")
            }
            Recovery::DuplicateId { key, id } => {
                write!(f, "{key}: duplicate id {id} dropped")
            }
        }
    }
}

/// What `load` had to do beyond a plain read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of placeholder photos generated.
    pub seeded: usize,
    pub recoveries: Vec<Recovery>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.seeded == 0 && self.recoveries.is_empty()
    }

    pub(crate) fn recover(&mut self, recovery: Recovery) {
        log::warn!("storage recovery: {recovery}");
        self.recoveries.push(recovery);
    }
}

/// The approved and pending collections.
///
/// Ids are unique across both collections; every method that moves a photo
/// removes it from one side before adding it to the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoRepository {
    approved: Vec<Photo>,
    pending: Vec<Photo>,
}

impl PhotoRepository {
    pub fn new(approved: Vec<Photo>, pending: Vec<Photo>) -> Self {
        Self { approved, pending }
    }

    /// Read both collections from `store`, seeding and repairing as needed.
    pub fn load<S, R>(
        store: &mut S,
        seed_config: &SeedConfig,
        rng: &mut R,
    ) -> Result<(Self, LoadReport), StoreError>
    where
        S: KeyValueStore + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = LoadReport::default();
        let mut first_run = false;

        let approved = match read_photos(store, APPROVED_KEY, &mut report)? {
            Some(photos) => photos,
            None => {
                first_run = true;
                let photos = seed::sample_photos(rng, seed_config);
                report.seeded = photos.len();
                photos
            }
        };
        let pending = read_photos(store, PENDING_KEY, &mut report)?.unwrap_or_default();

        let mut repo = Self { approved, pending };
        repo.enforce_unique_ids(&mut report);

        if first_run || !report.is_clean() {
            repo.save(store)?;
        }
        Ok((repo, report))
    }

    /// Write both collections.
    ///
    /// Both documents are encoded before either is written, so an encoding
    /// failure leaves storage untouched.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let approved = serde_json::to_string(&self.approved)?;
        let pending = serde_json::to_string(&self.pending)?;
        store.set(APPROVED_KEY, &approved)?;
        store.set(PENDING_KEY, &pending)?;
        Ok(())
    }

    pub fn approved(&self) -> &[Photo] {
        &self.approved
    }

    pub fn pending(&self) -> &[Photo] {
        &self.pending
    }

    pub fn find_approved(&self, id: &str) -> Option<&Photo> {
        self.approved.iter().find(|p| p.id == id)
    }

    pub fn find_approved_mut(&mut self, id: &str) -> Option<&mut Photo> {
        self.approved.iter_mut().find(|p| p.id == id)
    }

    pub fn find_pending(&self, id: &str) -> Option<&Photo> {
        self.pending.iter().find(|p| p.id == id)
    }

    /// Whether `id` is in either collection.
    pub fn contains_id(&self, id: &str) -> bool {
        self.find_approved(id).is_some() || self.find_pending(id).is_some()
    }

    pub(crate) fn push_pending(&mut self, photo: Photo) {
        debug_assert!(!self.contains_id(&photo.id));
        self.pending.push(photo);
    }

    pub(crate) fn take_pending(&mut self, id: &str) -> Option<Photo> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(index))
    }

    pub(crate) fn take_approved(&mut self, id: &str) -> Option<Photo> {
        let index = self.approved.iter().position(|p| p.id == id)?;
        Some(self.approved.remove(index))
    }

    /// Move a pending photo to the end of the approved collection.
    pub(crate) fn promote(&mut self, id: &str) -> Option<&Photo> {
        let photo = self.take_pending(id)?;
        self.approved.push(photo);
        self.approved.last()
    }

    /// Drop repeated ids, approved copies winning over pending ones.
    fn enforce_unique_ids(&mut self, report: &mut LoadReport) {
        let mut seen = HashSet::new();
        for (key, photos) in [
            (APPROVED_KEY, &mut self.approved),
            (PENDING_KEY, &mut self.pending),
        ] {
            photos.retain(|photo| {
                if seen.insert(photo.id.clone()) {
                    true
                } else {
                    report.recover(Recovery::DuplicateId {
                        key: key.to_string(),
                        id: photo.id.clone(),
                    });
                    false
                }
            });
        }
    }
}

/// Read and validate one photo record.
///
/// `Ok(None)` means "treat as absent": the key was never set, or its
/// document is not a JSON array.
fn read_photos<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    report: &mut LoadReport,
) -> Result<Option<Vec<Photo>>, StoreError> {
    let Some(content) = store.get(key)? else {
        return Ok(None);
    };
    let entries: Vec<Value> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            report.recover(Recovery::MalformedRecord {
                key: key.to_string(),
                reason: e.to_string(),
            });
            return Ok(None);
        }
    };
    let photos = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Photo>(entry) {
            Ok(photo) => Some(photo),
            Err(e) => {
                report.recover(Recovery::InvalidEntry {
                    key: key.to_string(),
                    index,
                    reason: e.to_string(),
                });
                None
            }
        })
        .collect();
    Ok(Some(photos))
}
