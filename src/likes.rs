//! Per-viewer like tracking.
//!
//! The viewer is the storage scope itself: whoever owns the store owns the
//! like set. Likes are only offered on approved photos, so a toggle looks the
//! id up in the approved collection and nowhere else.
//!
//! Deleting an approved photo does not prune its id from the like set. The
//! stale id is unreachable (the photo can no longer be displayed or toggled)
//! and new photo ids are never issued if they collide with it.

use std::collections::BTreeSet;

use crate::gallery::{Gallery, GalleryError};
use crate::repository::{LoadReport, Recovery};
use crate::store::{KeyValueStore, StoreError};
use crate::types::Photo;

/// Store key for the viewer's liked ids.
pub const LIKED_KEY: &str = "liked_photos";

/// Ids of photos the viewer has liked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikedIds {
    ids: BTreeSet<String>,
}

impl LikedIds {
    /// Read the like set. A missing record is empty; a malformed one is
    /// replaced with the empty set and reported. Non-string elements and
    /// repeated ids are dropped and reported.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &mut S,
        report: &mut LoadReport,
    ) -> Result<Self, StoreError> {
        let Some(content) = store.get(LIKED_KEY)? else {
            return Ok(Self::default());
        };
        let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                report.recover(Recovery::MalformedRecord {
                    key: LIKED_KEY.to_string(),
                    reason: e.to_string(),
                });
                let liked = Self::default();
                liked.save(store)?;
                return Ok(liked);
            }
        };

        let mut ids = BTreeSet::new();
        let mut repaired = false;
        for (index, entry) in entries.into_iter().enumerate() {
            let recovery = match entry {
                serde_json::Value::String(id) => {
                    if ids.contains(&id) {
                        Recovery::DuplicateId {
                            key: LIKED_KEY.to_string(),
                            id,
                        }
                    } else {
                        ids.insert(id);
                        continue;
                    }
                }
                other => Recovery::InvalidEntry {
                    key: LIKED_KEY.to_string(),
                    index,
                    reason: format!("expected a string id, got {other}"),
                },
            };
            report.recover(recovery);
            repaired = true;
        }

        let liked = Self { ids };
        if repaired {
            liked.save(store)?;
        }
        Ok(liked)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.ids)?;
        store.set(LIKED_KEY, &json)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Flip the viewer's like on `photo`, adjusting its counter.
    ///
    /// Unliking saturates at zero so a counter that was already zero (e.g.
    /// reset by hand in storage) never underflows.
    pub(crate) fn toggle(&mut self, photo: &mut Photo) -> u32 {
        if self.ids.remove(&photo.id) {
            photo.likes = photo.likes.saturating_sub(1);
        } else {
            photo.likes = photo.likes.saturating_add(1);
            self.ids.insert(photo.id.clone());
        }
        photo.likes
    }
}

impl<S: KeyValueStore> Gallery<S> {
    /// Like or unlike an approved photo. Returns the new like count.
    ///
    /// Pending or unknown ids are `NotFound` and leave everything untouched.
    pub fn toggle_like(&mut self, id: &str) -> Result<u32, GalleryError> {
        let mut photos = self.photos.clone();
        let photo = photos
            .find_approved_mut(id)
            .ok_or_else(|| GalleryError::NotFound(id.to_string()))?;
        let mut liked = self.liked.clone();
        let likes = liked.toggle(photo);

        // The like set goes first: a failure there leaves both records as
        // they were.
        liked.save(&mut self.store)?;
        photos.save(&mut self.store)?;
        log::debug!(
            "toggled like on {id}: {likes} likes, liked={}",
            liked.contains(id)
        );
        self.photos = photos;
        self.liked = liked;
        Ok(likes)
    }

    /// Whether the viewer currently likes `id`.
    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }
}
