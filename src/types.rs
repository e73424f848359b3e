//! Shared types persisted to the store and handed to the presentation layer.
//!
//! [`Photo`] is serialized as-is into the approved and pending records, so its
//! field names are the on-disk schema:
//!
//! ```json
//! { "id": "photo_1718000000000", "url": "data:image/png;base64,...",
//!   "year": 2024, "date": "2024-06-10", "width": 300, "height": 420, "likes": 0 }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cosmetic width used when the image dimensions can't be read.
pub const DEFAULT_WIDTH: u32 = 300;

/// A single image record.
///
/// `id`, `url`, `year` and `date` never change after creation. `likes` is the
/// only mutable field; it is unsigned, so a stored negative count fails
/// validation instead of loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    /// Inline `data:` URI or an external reference.
    pub url: String,
    pub year: i32,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Layout hint only.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Layout hint only.
    #[serde(default = "default_width")]
    pub height: u32,
    #[serde(default)]
    pub likes: u32,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

/// Counts shown on the gallery and admin badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryStats {
    pub approved: usize,
    pub pending: usize,
}
