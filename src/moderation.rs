//! Moderation engine: the photo lifecycle.
//!
//! ```text
//! submit ──► pending ──approve──► approved ──delete──► (gone)
//!               │
//!               └──reject──► (gone)
//! ```
//!
//! There are no transitions back. An id is in at most one collection at a
//! time: approve removes from pending before appending to approved.
//!
//! Every successful transition writes both collections through to the store
//! before returning. Unknown ids yield [`GalleryError::NotFound`] without
//! touching memory or storage, so repeating an approve or reject is a no-op.
//!
//! ## Photo ids
//!
//! Uploads are named `photo_<unix millis>`. If that id is already taken (two
//! uploads inside one millisecond, or an id still referenced by the like
//! set) the timestamp is bumped until a free id is found, so ids stay unique
//! without changing their shape.

use chrono::{DateTime, Datelike, Utc};
use std::path::Path;

use crate::gallery::{Gallery, GalleryError};
use crate::seed;
use crate::store::KeyValueStore;
use crate::types::{DEFAULT_WIDTH, Photo};
use crate::upload::{Upload, mime_type_for_path};

/// Check the declared type and size of an upload.
///
/// The limit is inclusive: a file of exactly `max_bytes` is accepted.
pub fn validate_upload(mime_type: &str, size: u64, max_bytes: u64) -> Result<(), GalleryError> {
    if !mime_type.starts_with("image/") {
        return Err(GalleryError::InvalidType(mime_type.to_string()));
    }
    if size > max_bytes {
        return Err(GalleryError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    Ok(())
}

impl<S: KeyValueStore> Gallery<S> {
    /// Queue an upload for moderation, dated now.
    pub fn submit(&mut self, upload: &Upload) -> Result<Photo, GalleryError> {
        self.submit_at(upload, Utc::now())
    }

    /// Queue an upload for moderation with an explicit timestamp.
    pub fn submit_at(
        &mut self,
        upload: &Upload,
        now: DateTime<Utc>,
    ) -> Result<Photo, GalleryError> {
        validate_upload(
            upload.mime_type(),
            upload.size(),
            self.config.uploads.max_bytes,
        )?;

        let (width, height) = upload
            .dimensions()
            .unwrap_or_else(|| (DEFAULT_WIDTH, seed::random_height(&mut rand::thread_rng())));
        let date = now.date_naive();
        let photo = Photo {
            id: self.next_photo_id(now.timestamp_millis()),
            url: upload.data_uri(),
            year: date.year(),
            date,
            width,
            height,
            likes: 0,
        };

        let mut next = self.photos.clone();
        next.push_pending(photo.clone());
        self.commit_photos(next)?;
        log::info!(
            "queued {} ({}, {} bytes) for moderation",
            photo.id,
            upload.mime_type(),
            upload.size()
        );
        Ok(photo)
    }

    /// Validate and queue a file from disk.
    ///
    /// Type and size are checked from the extension and file metadata before
    /// any bytes are read, so oversized files are refused without loading
    /// them.
    pub fn submit_file(&mut self, path: &Path) -> Result<Photo, GalleryError> {
        let mime_type = mime_type_for_path(path);
        let size = std::fs::metadata(path)?.len();
        validate_upload(&mime_type, size, self.config.uploads.max_bytes)?;
        let upload = Upload::read(path)?;
        self.submit(&upload)
    }

    /// Publish a pending photo.
    pub fn approve(&mut self, id: &str) -> Result<Photo, GalleryError> {
        let mut next = self.photos.clone();
        let photo = next
            .promote(id)
            .cloned()
            .ok_or_else(|| GalleryError::NotFound(id.to_string()))?;
        self.commit_photos(next)?;
        log::info!("approved {id}");
        Ok(photo)
    }

    /// Discard a pending photo.
    pub fn reject(&mut self, id: &str) -> Result<Photo, GalleryError> {
        let mut next = self.photos.clone();
        let photo = next
            .take_pending(id)
            .ok_or_else(|| GalleryError::NotFound(id.to_string()))?;
        self.commit_photos(next)?;
        log::info!("rejected {id}");
        Ok(photo)
    }

    /// Remove an approved photo permanently.
    ///
    /// The viewer's like entry for it, if any, is left in place.
    pub fn delete(&mut self, id: &str) -> Result<Photo, GalleryError> {
        let mut next = self.photos.clone();
        let photo = next
            .take_approved(id)
            .ok_or_else(|| GalleryError::NotFound(id.to_string()))?;
        self.commit_photos(next)?;
        log::info!("deleted {id}");
        Ok(photo)
    }

    fn next_photo_id(&self, mut millis: i64) -> String {
        loop {
            let id = format!("photo_{millis}");
            if !self.photos.contains_id(&id) && !self.liked.contains(&id) {
                return id;
            }
            millis += 1;
        }
    }
}
