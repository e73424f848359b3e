//! # School Gallery
//!
//! A photo gallery with a moderation queue. Visitors upload photos, an
//! administrator approves or rejects them, and approved photos appear in a
//! public gallery that can be filtered by year and liked.
//!
//! There is no server. All state lives in a local key-value store scoped to
//! one viewer, and images are embedded in the records as `data:` URIs.
//!
//! # Lifecycle
//!
//! ```text
//! submit ──► pending ──approve──► approved ──delete──► (gone)
//!               └──reject──► (gone)
//! ```
//!
//! Every mutation updates memory and then writes the affected records
//! through to the store before returning, so storage never lags behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | The [`Gallery`] context object and its error type |
//! | [`moderation`] | Submit, approve, reject, delete |
//! | [`likes`] | Per-viewer like set and `toggle_like` |
//! | [`projection`] | Pure year filter + newest-first sort for display |
//! | [`repository`] | Approved/pending collections, schema-validated load and save |
//! | [`store`] | [`KeyValueStore`] trait with file and in-memory backends |
//! | [`seed`] | First-run placeholder photos |
//! | [`upload`] | Upload payloads, MIME sniffing, data URIs |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`types`] | [`Photo`] and other shared types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Context, No Globals
//!
//! All state hangs off a [`Gallery`] owned by the caller. The presentation
//! layer binds its commands to methods on that value; nothing needs global
//! visibility.
//!
//! ## Validated Storage
//!
//! Stored records are parsed entry by entry against the [`Photo`] schema.
//! Corrupt documents and bad entries are repaired deterministically and
//! reported, never fatal. See [`repository`] for the rules.
//!
//! ## Not-Found Is a No-Op
//!
//! Approving, rejecting, deleting or liking an unknown id returns
//! [`GalleryError::NotFound`] and changes nothing, which makes every
//! moderation command safe to repeat.

pub mod config;
pub mod gallery;
pub mod likes;
pub mod moderation;
pub mod output;
pub mod projection;
pub mod repository;
pub mod seed;
pub mod store;
pub mod types;
pub mod upload;

pub use gallery::{Gallery, GalleryError};
pub use projection::YearFilter;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::Photo;
pub use upload::Upload;

#[cfg(test)]
pub(crate) mod test_helpers;
