//! Pipeline configuration.
//!
//! Loaded from an optional `config.toml` in the directory passed with
//! `--config` (the current directory by default). Every key is optional; the
//! file only needs the values it changes, and everything else keeps the stock
//! default. Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! site_name = "BAA Global"   # suffix of project detail page titles
//!
//! [images]
//! small = 900                # sm breakpoint width
//! medium = 1600              # md breakpoint width
//! large = 1600               # lg width for images sharing a row
//! large_single = 3200        # lg width for full-width images
//! mobile = 900               # width of the mobile image that replaces sm
//!
//! [hero]
//! still_duration = 4         # seconds per still slide when the CMS has none
//! ```

use crate::cloudinary::Breakpoints;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Appended to project detail page titles: `Sunset | Jane | BAA Global`.
    pub site_name: String,
    /// Breakpoint widths for derived image URLs.
    pub images: Breakpoints,
    /// Hero slideshow settings.
    pub hero: HeroConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "BAA Global".to_string(),
            images: Breakpoints::default(),
            hero: HeroConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_name must not be empty".into(),
            ));
        }
        let widths = [
            ("small", self.images.small),
            ("medium", self.images.medium),
            ("large", self.images.large),
            ("large_single", self.images.large_single),
            ("mobile", self.images.mobile),
        ];
        if let Some((key, _)) = widths.iter().find(|(_, w)| *w == 0) {
            return Err(ConfigError::Validation(format!(
                "images.{key} must be non-zero"
            )));
        }
        let still = self.hero.still_duration;
        if still.is_nan() || still <= 0.0 {
            return Err(ConfigError::Validation(
                "hero.still_duration must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Seconds a still slide stays up when the hero record does not say.
    pub still_duration: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            still_duration: 4.0,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// `Ok(None)` when the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in `dir`, falling back to stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// A fully-commented stock `config.toml`. Printed by `folio gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys are an error.

# Appended to project detail page titles, e.g. "Sunset | Jane Doe | BAA Global".
site_name = "BAA Global"

# ---------------------------------------------------------------------------
# Responsive image breakpoints (pixel widths requested from Cloudinary)
# ---------------------------------------------------------------------------
[images]
# sm variant
small = 900

# md variant
medium = 1600

# lg variant for images that share a row (pairs, trios)
large = 1600

# lg variant for images that span the full width
large_single = 3200

# Mobile-specific images replace sm and are requested at this width.
mobile = 900

# ---------------------------------------------------------------------------
# Hero slideshow
# ---------------------------------------------------------------------------
[hero]
# Seconds a still slide stays up when the hero record does not set one.
still_duration = 4.0
"##
}
