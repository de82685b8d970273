//! Configuration loading, validation, and management for Inkwise.
//!
//! Loads configuration from `~/.inkwise/config.toml` with environment
//! variable overrides. The directory itself can be moved with `INKWISE_HOME`.

use inkwise_core::ProfileKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.inkwise/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Session persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Draft defaults
    #[serde(default)]
    pub draft: DraftConfig,

    /// Export file settings
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the current session is saved. Relative paths resolve against
    /// the config directory.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

fn default_session_file() -> PathBuf {
    PathBuf::from("session.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_file: default_session_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Output profile applied to brand-new sessions
    #[serde(default = "default_profile")]
    pub default_profile: String,
}

fn default_profile() -> String {
    ProfileKey::default().as_str().into()
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            default_profile: default_profile(),
        }
    }
}

impl DraftConfig {
    /// The configured profile. Only call on a validated config.
    pub fn profile(&self) -> ProfileKey {
        ProfileKey::parse(&self.default_profile).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory `inkwise export` writes to when no `--out` is given
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.inkwise/config.toml).
    ///
    /// `INKWISE_PROFILE` overrides the default output profile.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(profile) = std::env::var("INKWISE_PROFILE") {
            config.draft.default_profile = profile;
            config.validate()?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        std::env::var_os("INKWISE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| dirs_home().join(".inkwise"))
    }

    /// Absolute path of the session file.
    pub fn session_path(&self) -> PathBuf {
        Self::resolve(&self.storage.session_file)
    }

    /// Absolute path of the export directory.
    pub fn export_dir(&self) -> PathBuf {
        Self::resolve(&self.export.directory)
    }

    fn resolve(path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Self::config_dir().join(path)
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if ProfileKey::parse(&self.draft.default_profile).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "draft.default_profile '{}' is not one of linkedin, xthread, email, memo, blog, custom",
                self.draft.default_profile
            )));
        }

        if self.storage.session_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.session_file must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.draft.profile(), ProfileKey::Linkedin);
        assert_eq!(config.storage.session_file, PathBuf::from("session.json"));
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.draft.default_profile, config.draft.default_profile);
        assert_eq!(parsed.export.directory, config.export.directory);
    }

    #[test]
    fn unknown_profile_rejected() {
        let config = AppConfig {
            draft: DraftConfig {
                default_profile: "tiktok".into(),
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/inkwise.toml")).unwrap();
        assert_eq!(config.draft.default_profile, "linkedin");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[draft]\ndefault_profile = \"memo\"").unwrap();
        let config = AppConfig::load_from(tmp.path()).unwrap();
        assert_eq!(config.draft.profile(), ProfileKey::Memo);
        assert_eq!(config.export.directory, PathBuf::from("exports"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[draft\ndefault_profile = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(tmp.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = AppConfig {
            storage: StorageConfig {
                session_file: PathBuf::from("/var/lib/inkwise/s.json"),
            },
            ..AppConfig::default()
        };
        assert_eq!(config.session_path(), PathBuf::from("/var/lib/inkwise/s.json"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("session.json"));
        assert!(toml_str.contains("linkedin"));
    }
}
