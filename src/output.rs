//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Each photo leads with its positional index and display date, the same
//! caption a visitor sees under the image. The id is shown as an indented
//! context line because it's what the moderation commands take as input.
//!
//! ## Gallery
//!
//! ```text
//! Gallery (2022): 2 photos
//! 001 2022. 11. 30. (12 likes, liked)
//!     Id: sample_3
//! 002 2022. 1. 15. (0 likes)
//!     Id: photo_1642204800000
//! Years: 2024, 2023, 2022
//! ```
//!
//! ## Pending
//!
//! ```text
//! Pending (1 photo)
//! 001 2024. 6. 10.
//!     Id: photo_1718000000000
//!     Size: 640x480
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::projection::{YearFilter, format_display_date};
use crate::repository::LoadReport;
use crate::types::{GalleryStats, Photo};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// `001 2024. 6. 10.` plus an optional detail in parens.
fn photo_header(index: usize, photo: &Photo, detail: Option<String>) -> String {
    let date = format_display_date(photo.date);
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), date, d),
        None => format!("{} {}", format_index(index), date),
    }
}

fn filter_label(filter: YearFilter) -> String {
    match filter {
        YearFilter::All => "all years".to_string(),
        YearFilter::Year(year) => year.to_string(),
    }
}

// ============================================================================
// Gallery
// ============================================================================

/// Format the public gallery projection.
///
/// `is_liked` reports the viewer's like state per id; `years` are the
/// available filter values.
pub fn format_gallery(
    photos: &[&Photo],
    filter: YearFilter,
    years: &[i32],
    is_liked: impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Gallery ({}): {}",
        filter_label(filter),
        plural(photos.len(), "photo", "photos")
    )];

    if photos.is_empty() {
        lines.push("    No photos yet".to_string());
    }
    for (i, photo) in photos.iter().enumerate() {
        let mut detail = plural(photo.likes as usize, "like", "likes");
        if is_liked(&photo.id) {
            detail.push_str(", liked");
        }
        lines.push(photo_header(i + 1, photo, Some(detail)));
        lines.push(format!("    Id: {}", photo.id));
    }

    if !years.is_empty() {
        let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        lines.push(format!("Years: {}", years.join(", ")));
    }
    lines
}

pub fn print_gallery(
    photos: &[&Photo],
    filter: YearFilter,
    years: &[i32],
    is_liked: impl Fn(&str) -> bool,
) {
    for line in format_gallery(photos, filter, years, is_liked) {
        println!("{}", line);
    }
}

// ============================================================================
// Admin listings
// ============================================================================

/// Format an admin listing (pending queue or approved photos).
pub fn format_admin_list<'a>(
    title: &str,
    photos: impl IntoIterator<Item = &'a Photo>,
) -> Vec<String> {
    let photos: Vec<&Photo> = photos.into_iter().collect();
    let mut lines = vec![format!(
        "{} ({})",
        title,
        plural(photos.len(), "photo", "photos")
    )];
    if photos.is_empty() {
        lines.push("    Nothing here".to_string());
    }
    for (i, photo) in photos.iter().enumerate() {
        lines.push(photo_header(i + 1, photo, None));
        lines.push(format!("    Id: {}", photo.id));
        lines.push(format!("    Size: {}x{}", photo.width, photo.height));
    }
    lines
}

pub fn print_admin_list<'a>(title: &str, photos: impl IntoIterator<Item = &'a Photo>) {
    for line in format_admin_list(title, photos) {
        println!("{}", line);
    }
}

// ============================================================================
// Single-photo results
// ============================================================================

/// `Approved photo_1 (2024. 6. 10.)`
pub fn format_action(verb: &str, photo: &Photo) -> String {
    format!("{} {} ({})", verb, photo.id, format_display_date(photo.date))
}

/// `Liked photo_1 (3 likes)` / `Unliked photo_1 (2 likes)`
pub fn format_like(id: &str, likes: u32, liked: bool) -> String {
    let verb = if liked { "Liked" } else { "Unliked" };
    format!(
        "{} {} ({})",
        verb,
        id,
        plural(likes as usize, "like", "likes")
    )
}

pub fn format_stats(stats: &GalleryStats) -> String {
    format!("{} approved, {} pending", stats.approved, stats.pending)
}

// ============================================================================
// Load report
// ============================================================================

/// Lines describing anything unusual that happened while loading state.
/// Empty for a clean load.
pub fn format_load_report(report: &LoadReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.seeded > 0 {
        lines.push(format!(
            "Seeded {}",
            plural(report.seeded, "placeholder photo", "placeholder photos")
        ));
    }
    for recovery in &report.recoveries {
        lines.push(format!("Recovered: {}", recovery));
    }
    lines
}

pub fn print_load_report(report: &LoadReport) {
    for line in format_load_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
