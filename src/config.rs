//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the store directory next to the persisted records; stock defaults are
//! overridden by whatever keys the file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [uploads]
//! max_bytes = 10485760      # Largest accepted upload (10 MiB)
//!
//! [admin]
//! password = "admin123"     # Moderation password (not a security boundary)
//!
//! [seed]
//! enabled = true            # Populate an empty gallery with placeholders
//! count = 8                 # Number of placeholder photos
//! years = [2020, 2021, 2022, 2023, 2024]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [seed]
//! enabled = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest upload accepted by default: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Upload validation limits.
    pub uploads: UploadsConfig,
    /// Moderation access.
    pub admin: AdminConfig,
    /// First-run placeholder photos.
    pub seed: SeedConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uploads.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "uploads.max_bytes must be greater than zero".into(),
            ));
        }
        if self.admin.password.is_empty() {
            return Err(ConfigError::Validation(
                "admin.password must not be empty".into(),
            ));
        }
        if self.seed.enabled && self.seed.count > 0 && self.seed.years.is_empty() {
            return Err(ConfigError::Validation(
                "seed.years must not be empty when seeding is enabled".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadsConfig {
    /// Largest accepted upload in bytes (inclusive).
    pub max_bytes: u64,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// Compared verbatim by [`Gallery::admin_authenticate`](crate::gallery::Gallery::admin_authenticate).
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: "admin123".to_string(),
        }
    }
}

/// Placeholder photos generated when no approved record exists yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    pub enabled: bool,
    pub count: usize,
    /// Years a placeholder may be dated in; one is picked at random per photo.
    pub years: Vec<i32>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 8,
            years: vec![2020, 2021, 2022, 2023, 2024],
        }
    }
}

impl SeedConfig {
    /// No placeholders at all; a first run starts with an empty gallery.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The built-in defaults as a TOML table, the base every overlay lands on.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(GalleryConfig::default())?)
}

/// Overlay `overlay` onto `base`, descending into tables.
///
/// A key present in both tables is merged recursively; anything else in
/// `overlay` wins outright. Keys only in `base` survive, which is what lets
/// a sparse `config.toml` set one value and keep every other default.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(top)) => {
            for (key, value) in top {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, replacement) => replacement,
    }
}

/// Load `config.toml` from the store directory over the stock defaults.
///
/// A missing file yields the defaults. Unknown keys, bad types and values
/// that fail [`GalleryConfig::validate`] are errors.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    let mut merged = stock_defaults_value()?;
    match fs::read_to_string(dir.join("config.toml")) {
        Ok(content) => {
            let overlay: toml::Value = toml::from_str(&content)?;
            merged = merge_toml(merged, overlay);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    log::debug!("loaded config from {}", dir.display());
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# School Gallery Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the store directory (default: .school-gallery/config.toml).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Uploads
# ---------------------------------------------------------------------------
[uploads]
# Largest accepted upload in bytes. Larger files are refused before reading.
max_bytes = 10485760

# ---------------------------------------------------------------------------
# Moderation
# ---------------------------------------------------------------------------
[admin]
# Password for approve / reject / delete. A plain equality check, not a
# security boundary.
password = "admin123"

# ---------------------------------------------------------------------------
# First-run placeholders
# ---------------------------------------------------------------------------
[seed]
# When the gallery has never been saved, fill it with placeholder photos.
enabled = true

# Number of placeholder photos.
count = 8

# Each placeholder is dated in one of these years.
years = [2020, 2021, 2022, 2023, 2024]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = GalleryConfig::default();
        assert_eq!(config.uploads.max_bytes, 10_485_760);
        assert_eq!(config.admin.password, "admin123");
        assert!(config.seed.enabled);
        assert_eq!(config.seed.count, 8);
        assert_eq!(config.seed.years, vec![2020, 2021, 2022, 2023, 2024]);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[seed]
enabled = false
"#;
        let config: GalleryConfig = toml::from_str(toml).unwrap();
        assert!(!config.seed.enabled);
        // Defaults preserved
        assert_eq!(config.seed.count, 8);
        assert_eq!(config.admin.password, "admin123");
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: GalleryConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[uploads]
max_bytes = 2048

[admin]
password = "letmein"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.uploads.max_bytes, 2048);
        assert_eq!(config.admin.password, "letmein");
        assert!(config.seed.enabled);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[uploads\nmax_bytes = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[uploads]
max_size = 10
"#;
        assert!(toml::from_str::<GalleryConfig>(toml).is_err());
    }

    #[test]
    fn unknown_section_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[storage]\ndir = \"x\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_table_preserves_siblings() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[seed]\ncount = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["seed"]["count"].as_integer(), Some(3));
        assert_eq!(merged["seed"]["enabled"].as_bool(), Some(true));
        assert_eq!(
            merged["uploads"]["max_bytes"].as_integer(),
            Some(10_485_760)
        );
    }

    // =========================================================================
    // validate
    // =========================================================================

    #[test]
    fn validate_zero_max_bytes() {
        let mut config = GalleryConfig::default();
        config.uploads.max_bytes = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_empty_password() {
        let mut config = GalleryConfig::default();
        config.admin.password.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_seed_years_empty_only_matters_when_enabled() {
        let mut config = GalleryConfig::default();
        config.seed.years.clear();
        assert!(config.validate().is_err());

        config.seed.enabled = false;
        assert!(config.validate().is_ok());
    }
}
