//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Base map layer keys accepted in shareable links and configuration
pub const BASE_LAYER_KEYS: [&str; 4] = ["osm", "cartoLight", "cartoDark", "esri"];

/// Highest zoom level a tile provider serves
pub const MAX_ZOOM: i64 = 22;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Map and session defaults
    #[serde(default)]
    pub general: GeneralConfig,

    /// Persistent storage locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shareable link settings
    #[serde(default)]
    pub share: ShareConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Reject values the rest of the toolkit cannot honour
    pub fn validate(&self) -> Result<()> {
        if !BASE_LAYER_KEYS.contains(&self.general.default_base_layer.as_str()) {
            return Err(Error::invalid_config_value(
                "general.default_base_layer",
                format!(
                    "`{}` is not one of {}",
                    self.general.default_base_layer,
                    BASE_LAYER_KEYS.join(", ")
                ),
            ));
        }

        if !(0..=MAX_ZOOM).contains(&self.general.default_zoom) {
            return Err(Error::invalid_config_value(
                "general.default_zoom",
                format!("{} is outside 0..={MAX_ZOOM}", self.general.default_zoom),
            ));
        }

        if self.share.base_url.trim().is_empty() {
            return Err(Error::invalid_config_value("share.base_url", "cannot be empty"));
        }

        Ok(())
    }
}

/// Map and session defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Base layer used when a link does not carry `base`
    #[serde(default = "default_base_layer")]
    pub default_base_layer: String,

    /// Zoom used when a link does not carry `zoom`
    #[serde(default = "default_zoom")]
    pub default_zoom: i64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_base_layer: default_base_layer(),
            default_zoom: default_zoom(),
        }
    }
}

fn default_base_layer() -> String {
    "cartoLight".to_string()
}

fn default_zoom() -> i64 {
    5
}

/// Persistent storage locations
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Favorites file; `~` and `$VARS` are expanded. Defaults to the
    /// platform data directory.
    #[serde(default)]
    pub favorites_path: Option<String>,
}

/// Shareable link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Page the query string is appended to
    #[serde(default = "default_share_base_url")]
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_base_url(),
        }
    }
}

fn default_share_base_url() -> String {
    "http://localhost:3000/".to_string()
}

/// Log output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Include the module path in log lines
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            show_target: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConfigSchema::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_base_layer_rejected() {
        let mut schema = ConfigSchema::default();
        schema.general.default_base_layer = "stamen".to_string();
        let err = schema.validate().unwrap_err();
        assert!(err.message.contains("default_base_layer"));
    }

    #[test]
    fn test_zoom_range() {
        let mut schema = ConfigSchema::default();
        schema.general.default_zoom = 23;
        assert!(schema.validate().is_err());
        schema.general.default_zoom = 0;
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [general]
            default_zoom = 9
            "#,
        )
        .unwrap();
        assert_eq!(schema.general.default_zoom, 9);
        assert_eq!(schema.general.default_base_layer, "cartoLight");
        assert_eq!(schema.logging.level, "warn");
        assert!(schema.storage.favorites_path.is_none());
    }
}
