//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! the campaigns API base URL, an optional access token and the log level.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/campaign-wizard";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub access_token: Option<String>,
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// On-disk shape of the configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            base_url: default_base_url(),
            access_token: None,
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Load the configuration file from the custom directory if provided,
    /// otherwise from the default directory. A missing file leaves the
    /// defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(path).to_path_buf(),
            None => Config::default_path()?,
        };
        let file_path = dir_path.join(Path::new(FILE_NAME));

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.base_url = data.base_url;
            self.access_token = data.access_token.filter(|token| !token.is_empty());
            self.log_level = data.log_level;
        }

        self.file_path = Some(file_path);
        Ok(())
    }

    /// Serialize the configuration and write it to the disk, creating the
    /// directory when needed.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            base_url: self.base_url.clone(),
            access_token: self.access_token.clone(),
            log_level: self.log_level.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Parse the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::Fake;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let name: Uuid = UUIDv4.fake();
        std::env::temp_dir().join(format!("campaign-wizard-{}", name))
    }

    #[test]
    fn test_missing_file_keeps_defaults() -> Result<(), AppError> {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str())?;
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.access_token, None);
        assert_eq!(config.level_filter()?, LevelFilter::Info);
        assert_eq!(config.file_path(), Some(dir.join("config.yml").as_path()));
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<(), AppError> {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str())?;
        config.base_url = "https://api.example.com".to_string();
        config.access_token = Some("secret".to_string());
        config.log_level = "debug".to_string();
        config.save()?;

        let mut reloaded = Config::new();
        reloaded.load(dir.to_str())?;
        assert_eq!(reloaded.base_url, "https://api.example.com");
        assert_eq!(reloaded.access_token.as_deref(), Some("secret"));
        assert_eq!(reloaded.level_filter()?, LevelFilter::Debug);
        fs::remove_dir_all(dir)?;
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<(), AppError> {
        let dir = temp_dir();
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("config.yml"), "access_token: abc\n")?;
        let mut config = Config::new();
        config.load(dir.to_str())?;
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.log_level, "info");
        fs::remove_dir_all(dir)?;
        Ok(())
    }

    #[test]
    fn test_invalid_log_level() {
        let config = Config {
            log_level: "chatty".to_string(),
            ..Config::new()
        };
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_save_without_path_fails() {
        assert!(Config::new().save().is_err());
    }
}
