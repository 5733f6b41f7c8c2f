//! Application configuration file.
//!
//! # Responsibility
//! - Read window/editor settings from YAML once at startup.
//! - Rewrite the file when the user toggles the theme.
//!
//! # Invariants
//! - Values are opaque to core; nothing here validates theme, size or font.
//! - A missing file is reported as `ConfigError::NotFound` and is fatal for
//!   the caller.
//! - Keys core does not know about survive a load/save cycle, at the top
//!   level and inside `window` / `editor`.

use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Config path used when the caller does not provide one.
pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";

/// Errors from config load/save.
#[derive(Debug)]
pub enum ConfigError {
    /// No config file at the given path.
    NotFound(PathBuf),
    /// File exists but could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not a valid config document.
    Parse(serde_yaml::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "config file not found: {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "config file `{}` is not accessible: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Parse(value)
    }
}

/// Main window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// `light` or `dark` by convention.
    pub theme: String,
    pub title: String,
    /// Geometry string such as `400x600`.
    pub size: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Note editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Font spec handed to the UI untouched (string or list).
    pub font: serde_yaml::Value,
    pub size: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Parsed `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub editor: EditorConfig,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl AppConfig {
    /// Loads config from `path`.
    ///
    /// # Errors
    /// - `NotFound` when the file does not exist.
    /// - `Io` when it cannot be read.
    /// - `Parse` when the YAML does not match the expected shape.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                error!(
                    "event=config_load module=config status=error error_code=config_missing path={}",
                    path.display()
                );
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = serde_yaml::from_str::<Self>(&raw)?;
        info!(
            "event=config_load module=config status=ok theme={}",
            config.window.theme
        );
        Ok(config)
    }

    /// Writes config back to `path`, replacing the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let raw = serde_yaml::to_string(self)?;
        std::fs::write(path, raw).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "event=config_save module=config status=ok theme={}",
            self.window.theme
        );
        Ok(())
    }

    /// Switches `light` to `dark` and anything else to `light`.
    ///
    /// Returns the new theme.
    pub fn toggle_theme(&mut self) -> &str {
        self.window.theme = if self.window.theme == "light" {
            "dark".to_string()
        } else {
            "light".to_string()
        };
        self.window.theme.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    const SAMPLE: &str = "window:\n  theme: light\n  title: FastNotes\n  size: 400x600\neditor:\n  font: [Arial, 12]\n  size: 500x400\n";

    #[test]
    fn toggle_theme_flips_between_light_and_dark() {
        let mut config: AppConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.toggle_theme(), "dark");
        assert_eq!(config.toggle_theme(), "light");

        config.window.theme = "solarized".to_string();
        assert_eq!(config.toggle_theme(), "light");
    }

    #[test]
    fn font_is_kept_as_opaque_value() {
        let config: AppConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert!(config.editor.font.is_sequence());
    }
}
