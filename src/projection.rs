//! Gallery view projection: what to display, derived from the approved set.
//!
//! Everything here is a pure function of its inputs. Nothing is cached or
//! persisted; the presentation layer recomputes on every render and every
//! year-filter change.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::Photo;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid year filter {0:?}: expected \"all\" or a year")]
pub struct ParseYearFilterError(String);

/// Year selection for the public gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    pub fn matches(&self, photo: &Photo) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(year) => photo.year == *year,
        }
    }
}

impl FromStr for YearFilter {
    type Err = ParseYearFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(YearFilter::All);
        }
        s.parse::<i32>()
            .map(YearFilter::Year)
            .map_err(|_| ParseYearFilterError(s.to_string()))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => write!(f, "all"),
            YearFilter::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Filter by year, then sort newest first.
///
/// The sort is stable: photos sharing a date keep their stored order.
pub fn project(photos: &[Photo], filter: YearFilter) -> Vec<&Photo> {
    let mut shown: Vec<&Photo> = photos.iter().filter(|p| filter.matches(p)).collect();
    shown.sort_by(|a, b| b.date.cmp(&a.date));
    shown
}

/// Distinct years present in `photos`, newest first.
pub fn available_years(photos: &[Photo]) -> Vec<i32> {
    let mut years: Vec<i32> = photos.iter().map(|p| p.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Caption format used under each photo: `2024. 3. 5.`
pub fn format_display_date(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}
