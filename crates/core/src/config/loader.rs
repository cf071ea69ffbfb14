//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// File name of the favorites list inside the data directory
const FAVORITES_FILE: &str = "favorites.json";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed and validated settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist; the standard locations are optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        schema
            .validate()
            .context(format!("While validating {}", config_path.as_deref().unwrap_or("defaults")))?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Location of the favorites file
    ///
    /// Uses `storage.favorites_path` (shell-expanded) when set, otherwise
    /// `<data dir>/digipin/favorites.json`, otherwise the working directory.
    #[must_use]
    pub fn favorites_path(&self) -> PathBuf {
        if let Some(ref raw) = self.schema.storage.favorites_path {
            let expanded = shellexpand::full(raw)
                .map_or_else(|_| raw.clone(), |s| s.into_owned());
            return PathBuf::from(expanded);
        }

        dirs::data_dir()
            .map(|d| d.join("digipin").join(FAVORITES_FILE))
            .unwrap_or_else(|| PathBuf::from(FAVORITES_FILE))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [".digipin.toml", "digipin.toml", ".config/digipin.toml"];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {path}: {e}")))?;

    toml::from_str(&content)
        .map_err(|e| Error::from(e).with_context(format!("In config file {path}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.schema.general.default_zoom, 5);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = Config::load(Some("/definitely/not/here/digipin.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[storage]\nfavorites_path = \"/tmp/digipin-test/favs.json\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.schema.logging.level, "debug");
        assert_eq!(config.favorites_path(), PathBuf::from("/tmp/digipin-test/favs.json"));
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\ndefault_base_layer = \"toner\"").unwrap();

        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general\ndefault_zoom = ").unwrap();

        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_default_favorites_path_file_name() {
        let path = Config::defaults().favorites_path();
        assert!(path.ends_with(FAVORITES_FILE));
    }
}
