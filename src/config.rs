//! Settings loaded from `config.toml`
//!
//! Lookup order for the data directory: explicit override (CLI flag), then the
//! `REVSMART_DATA_DIR` environment variable, then `data_dir` in the config
//! file, then the platform data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::concepts::SchedulerSettings;

pub const APP_DIR_NAME: &str = "revsmart";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATA_DIR_ENV: &str = "REVSMART_DATA_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Schedule a reminder for the first checkpoint of each new concept
    pub enabled: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Config file contents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub scheduler: SchedulerSettings,
    pub reminders: ReminderSettings,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        file.scheduler.validate().map_err(ConfigError::Invalid)?;
        Ok(file)
    }
}

/// Resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub scheduler: SchedulerSettings,
    pub reminders: ReminderSettings,
}

impl Settings {
    /// Default config file location (e.g. ~/.config/revsmart/config.toml)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Default data directory (e.g. ~/.local/share/revsmart)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Load settings.
    ///
    /// An explicit `config_path` must exist; the default path is optional and
    /// a missing file yields defaults.
    pub fn load(config_path: Option<&Path>, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let file = match config_path {
            Some(path) => ConfigFile::parse(&read_config(path)?)?,
            None => match Self::default_config_path() {
                Some(path) => match fs::read_to_string(&path) {
                    Ok(content) => ConfigFile::parse(&content)?,
                    Err(e) if e.kind() == ErrorKind::NotFound => ConfigFile::default(),
                    Err(source) => return Err(ConfigError::Io { path, source }),
                },
                None => ConfigFile::default(),
            },
        };

        let env_data_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self::resolve(file, data_dir_override.or(env_data_dir))
    }

    /// Combine a parsed config file with an optional data directory override
    pub fn resolve(file: ConfigFile, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir_override.or(file.data_dir) {
            Some(dir) => dir,
            None => Self::default_data_dir()?,
        };

        log::debug!("Using data directory {:?}", data_dir);

        Ok(Self {
            data_dir,
            scheduler: file.scheduler,
            reminders: file.reminders,
        })
    }
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let file = ConfigFile::parse("").unwrap();
        assert_eq!(file, ConfigFile::default());
        assert_eq!(file.scheduler.checkpoint_days, vec![1, 3, 7, 30]);
        assert_eq!(file.scheduler.growth_factor, 1.5);
        assert!(file.reminders.enabled);
    }

    #[test]
    fn test_parse_full_config() {
        let file = ConfigFile::parse(
            r#"
            data_dir = "/tmp/revsmart"

            [scheduler]
            checkpoint_days = [1, 2, 4]
            growth_factor = 2.0
            relearn_days = 2

            [reminders]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(file.data_dir, Some(PathBuf::from("/tmp/revsmart")));
        assert_eq!(file.scheduler.checkpoint_days, vec![1, 2, 4]);
        assert_eq!(file.scheduler.growth_factor, 2.0);
        assert_eq!(file.scheduler.relearn_days, 2);
        assert!(!file.reminders.enabled);
    }

    #[test]
    fn test_partial_scheduler_section_keeps_defaults() {
        let file = ConfigFile::parse("[scheduler]\ngrowth_factor = 1.2\n").unwrap();
        assert_eq!(file.scheduler.checkpoint_days, vec![1, 3, 7, 30]);
        assert_eq!(file.scheduler.relearn_days, 1);
    }

    #[test]
    fn test_invalid_scheduler_is_rejected() {
        let err = ConfigFile::parse("[scheduler]\ncheckpoint_days = [7, 3]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = ConfigFile::parse("data_dir = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_override_beats_file() {
        let file = ConfigFile {
            data_dir: Some(PathBuf::from("/from/file")),
            ..Default::default()
        };

        let settings = Settings::resolve(file.clone(), Some(PathBuf::from("/from/flag"))).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/from/flag"));

        let settings = Settings::resolve(file, None).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/from/file"));
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[reminders]\nenabled = false\n").unwrap();

        let settings = Settings::load(Some(path.as_path()), Some(temp_dir.path().to_path_buf())).unwrap();
        assert!(!settings.reminders.enabled);
        assert_eq!(settings.data_dir, temp_dir.path().to_path_buf());
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = Settings::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
