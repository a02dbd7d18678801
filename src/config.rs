//! Tool configuration module.
//!
//! Handles loading and validating `config.toml`. Config files are sparse —
//! user values are merged on top of stock defaults, so a file needs only the
//! keys it wants to override:
//!
//! ```toml
//! # Only raise the ceiling
//! [policy]
//! pixel_ceiling = 250000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{DEFAULT_PIXEL_CEILING, ResizeQuality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Resolution policy settings (pixel-count ceiling).
    pub policy: PolicyConfig,
    /// Resampling settings for the downscale decode.
    pub resize: ResizeConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.pixel_ceiling == 0 {
            return Err(ConfigError::Validation(
                "policy.pixel_ceiling must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Resolution policy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Maximum allowed pixel count (width × height) before a downscale
    /// is required.
    pub pixel_ceiling: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            pixel_ceiling: DEFAULT_PIXEL_CEILING,
        }
    }
}

/// Resampling settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Resampling quality: `"low"`, `"medium"`, or `"high"`.
    pub quality: ResizeQuality,
}

/// Recursively merge an overlay TOML value onto a base value.
///
/// Tables merge key-by-key; any other value type is replaced by the overlay.
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

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize, validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ToolConfig, ConfigError> {
    let base = toml::Value::try_from(ToolConfig::default())?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<ToolConfig, ConfigError> {
    resolve_config(load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# pixelcap Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Resolution policy
# ---------------------------------------------------------------------------
[policy]
# Maximum allowed pixel count (width x height). Images above this limit are
# downscaled proportionally until they fit. The default matches the 0.1
# megapixel guideline used for non-free content on wikis.
pixel_ceiling = 100000

# ---------------------------------------------------------------------------
# Resampling
# ---------------------------------------------------------------------------
[resize]
# Resampling quality for the downscale: "low" (nearest-neighbor),
# "medium" (triangle), or "high" (Lanczos3).
quality = "high"
"##
}
