//! First-run placeholder photos.
//!
//! When the approved record has never been written, the gallery is filled
//! with solid-colour SVG rectangles labelled with their year so a fresh
//! install has something to browse and filter. Nothing here is reproducible
//! by design of the data; callers pass an RNG so tests can pin it.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::SeedConfig;
use crate::types::{DEFAULT_WIDTH, Photo};

const COLORS: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8",
];

/// Generate `config.count` placeholder photos.
///
/// Returns an empty vector when seeding is disabled or no years are configured.
pub fn sample_photos<R: Rng + ?Sized>(rng: &mut R, config: &SeedConfig) -> Vec<Photo> {
    if !config.enabled {
        return Vec::new();
    }
    (0..config.count)
        .filter_map(|i| {
            let year = *config.years.choose(rng)?;
            let month = rng.gen_range(1..=12);
            let day = rng.gen_range(1..=28);
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            let width = DEFAULT_WIDTH;
            let height = random_height(rng);
            Some(Photo {
                id: format!("sample_{i}"),
                url: placeholder_svg_uri(width, height, COLORS[i % COLORS.len()], year),
                year,
                date,
                width,
                height,
                likes: rng.gen_range(0..50),
            })
        })
        .collect()
}

/// Cosmetic height for photos whose real dimensions are unknown.
pub fn random_height<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    DEFAULT_WIDTH + rng.gen_range(0..200)
}

/// A `data:image/svg+xml;base64,...` URI for a filled rectangle with the year centred.
pub fn placeholder_svg_uri(width: u32, height: u32, color: &str, year: i32) -> String {
    let svg = format!(
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg"><rect width="{width}" height="{height}" fill="{color}"/><text x="50%" y="50%" font-family="Arial" font-size="24" fill="white" text-anchor="middle" dy=".3em">{year}</text></svg>"#
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn default_config_generates_eight_samples() {
        let photos = sample_photos(&mut rng(), &SeedConfig::default());
        assert_eq!(photos.len(), 8);
        let ids: Vec<&str> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids[0], "sample_0");
        assert_eq!(ids[7], "sample_7");
    }

    #[test]
    fn samples_stay_within_configured_ranges() {
        let config = SeedConfig::default();
        for photo in sample_photos(&mut rng(), &config) {
            assert!(config.years.contains(&photo.year));
            assert_eq!(photo.date.year(), photo.year);
            assert!(photo.date.day() <= 28);
            assert!(photo.likes < 50);
            assert_eq!(photo.width, 300);
            assert!((300..500).contains(&photo.height));
            assert!(photo.url.starts_with("data:image/svg+xml;base64,"));
        }
    }

    #[test]
    fn disabled_config_generates_nothing() {
        assert!(sample_photos(&mut rng(), &SeedConfig::disabled()).is_empty());
    }

    #[test]
    fn empty_year_list_generates_nothing() {
        let config = SeedConfig {
            years: Vec::new(),
            ..SeedConfig::default()
        };
        assert!(sample_photos(&mut rng(), &config).is_empty());
    }

    #[test]
    fn placeholder_svg_decodes_with_year_label() {
        let uri = placeholder_svg_uri(300, 400, "#FF6B6B", 2022);
        let payload = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap();
        assert!(svg.contains(r##"fill="#FF6B6B""##));
        assert!(svg.contains(">2022</text>"));
        assert!(svg.contains(r#"height="400""#));
    }
}
