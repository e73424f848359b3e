//! The gallery context: every collaborator-facing operation lives on [`Gallery`].
//!
//! A `Gallery` owns the store, the two photo collections, the viewer's like
//! set, the configuration, and the admin session flag. The presentation layer
//! (the CLI in `main.rs`) holds one and calls methods on it; nothing is
//! global.
//!
//! Operations are spread over the modules that own their rules:
//!
//! | Operation | Defined in |
//! |---|---|
//! | `load`, `project`, `stats`, `admin_authenticate` | here |
//! | `submit`, `submit_file`, `approve`, `reject`, `delete` | [`moderation`](crate::moderation) |
//! | `toggle_like`, `is_liked` | [`likes`](crate::likes) |
//!
//! Every mutating operation writes the affected records through to the store
//! before it returns. A `NotFound` result means nothing changed and nothing
//! was written.

use rand::Rng;
use std::io;
use thiserror::Error;

use crate::config::GalleryConfig;
use crate::likes::LikedIds;
use crate::projection::{self, YearFilter};
use crate::repository::{LoadReport, PhotoRepository};
use crate::store::{KeyValueStore, StoreError};
use crate::types::{GalleryStats, Photo};

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Only image files can be uploaded (got {0})")]
    InvalidType(String),
    #[error("File is {size} bytes; uploads are limited to {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("No matching photo: {0}")]
    NotFound(String),
    #[error("Wrong admin password")]
    WrongPassword,
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl GalleryError {
    /// `NotFound` is a no-op outcome rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GalleryError::NotFound(_))
    }
}

/// Application state for one viewer's storage scope.
#[derive(Debug)]
pub struct Gallery<S> {
    pub(crate) store: S,
    pub(crate) config: GalleryConfig,
    pub(crate) photos: PhotoRepository,
    pub(crate) liked: LikedIds,
    pub(crate) admin: bool,
}

impl<S: KeyValueStore> Gallery<S> {
    /// Load all persisted state, seeding placeholders on first run.
    pub fn load(store: S, config: GalleryConfig) -> Result<(Self, LoadReport), GalleryError> {
        Self::load_with_rng(store, config, &mut rand::thread_rng())
    }

    /// [`load`](Self::load) with a caller-supplied RNG for seed data.
    pub fn load_with_rng<R: Rng + ?Sized>(
        mut store: S,
        config: GalleryConfig,
        rng: &mut R,
    ) -> Result<(Self, LoadReport), GalleryError> {
        let (photos, mut report) = PhotoRepository::load(&mut store, &config.seed, rng)?;
        let liked = LikedIds::load(&mut store, &mut report)?;
        log::info!(
            "loaded gallery: {} approved, {} pending, {} liked",
            photos.approved().len(),
            photos.pending().len(),
            liked.len()
        );
        let gallery = Self {
            store,
            config,
            photos,
            liked,
            admin: false,
        };
        Ok((gallery, report))
    }

    /// Persist `next` and only then make it the in-memory state.
    ///
    /// On a failed write memory keeps the previous collections, so the
    /// operation can be retried. The approved record is written first; if
    /// the pending write then fails, the id is in both records and the next
    /// load keeps the approved copy.
    pub(crate) fn commit_photos(&mut self, next: PhotoRepository) -> Result<(), GalleryError> {
        next.save(&mut self.store)?;
        self.photos = next;
        Ok(())
    }

    /// The approved collection in stored order.
    pub fn approved(&self) -> &[Photo] {
        self.photos.approved()
    }

    /// The moderation queue in upload order.
    pub fn pending(&self) -> &[Photo] {
        self.photos.pending()
    }

    /// Approved photos to display for `filter`, newest first.
    pub fn project(&self, filter: YearFilter) -> Vec<&Photo> {
        projection::project(self.photos.approved(), filter)
    }

    /// Distinct years among approved photos, newest first.
    pub fn available_years(&self) -> Vec<i32> {
        projection::available_years(self.photos.approved())
    }

    pub fn stats(&self) -> GalleryStats {
        GalleryStats {
            approved: self.photos.approved().len(),
            pending: self.photos.pending().len(),
        }
    }

    /// Compare `password` with the configured admin password.
    ///
    /// Opens the admin session on a match. A plain equality check; this is
    /// not an access-control boundary.
    pub fn admin_authenticate(&mut self, password: &str) -> bool {
        let ok = password == self.config.admin.password;
        if ok {
            log::info!("admin session opened");
        } else {
            log::warn!("admin authentication failed");
        }
        self.admin = ok;
        ok
    }

    pub fn admin_logout(&mut self) {
        self.admin = false;
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store, dropping in-memory state.
    pub fn into_store(self) -> S {
        self.store
    }
}
