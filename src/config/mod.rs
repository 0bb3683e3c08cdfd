//! Configuration management module.
//!
//! Handles loading and saving the application configuration, including the
//! places API key, theme preference, data directory, and overlay animation
//! durations.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/agenda-tui";

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_open_ms() -> u64 {
    crate::state::DEFAULT_OPEN_MS
}

fn default_close_ms() -> u64 {
    crate::state::DEFAULT_CLOSE_MS
}

/// Oversees management of configuration file.
///
#[derive(Clone)]
pub struct Config {
    pub places_api_key: Option<String>,
    pub theme_name: String,
    pub data_dir: Option<PathBuf>,
    pub overlay_open_ms: u64,
    pub overlay_close_ms: u64,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub places_api_key: Option<String>,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_open_ms")]
    pub overlay_open_ms: u64,
    #[serde(default = "default_close_ms")]
    pub overlay_close_ms: u64,
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            places_api_key: None,
            theme_name: default_theme_name(),
            data_dir: None,
            overlay_open_ms: default_open_ms(),
            overlay_close_ms: default_close_ms(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// path if provided. On a first run the defaults are written out.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if !file_path.exists() {
            // First run: write the defaults so the file is there to edit.
            self.save()?;
            return Ok(());
        }
        let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        let data: FileSpec = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        self.places_api_key = data.places_api_key;
        self.theme_name = data.theme_name;
        self.data_dir = data.data_dir;
        self.overlay_open_ms = data.overlay_open_ms;
        self.overlay_close_ms = data.overlay_close_ms;

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            places_api_key: self.places_api_key.clone(),
            theme_name: self.theme_name.clone(),
            data_dir: self.data_dir.clone(),
            overlay_open_ms: self.overlay_open_ms,
            overlay_close_ms: self.overlay_close_ms,
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
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

    /// Resolve the directory holding the event record file. Defaults to the
    /// configuration directory when no data_dir is set.
    ///
    pub fn resolve_data_dir(&self) -> Result<PathBuf, AppError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => match &self.file_path {
                Some(file_path) => match file_path.parent() {
                    Some(parent) => Ok(parent.to_path_buf()),
                    None => Config::default_path(),
                },
                None => Config::default_path(),
            },
        }
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("agenda-tui-test-{}", uuid::Uuid::new_v4()));
        dir
    }

    #[test]
    fn test_load_missing_file_keeps_defaults() {
        let dir = temp_dir();
        let mut config = Config::new();
        config
            .load(Some(dir.to_str().unwrap()))
            .expect("load should succeed");
        assert!(config.places_api_key.is_none());
        assert_eq!(config.theme_name, "tokyo-night");
        assert_eq!(config.overlay_open_ms, 300);
        assert_eq!(config.overlay_close_ms, 200);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        config.places_api_key = Some("test-key".to_string());
        config.theme_name = "default".to_string();
        config.overlay_open_ms = 150;
        config.save().expect("save should succeed");

        let mut reloaded = Config::new();
        reloaded.load(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(reloaded.places_api_key.as_deref(), Some("test-key"));
        assert_eq!(reloaded.theme_name, "default");
        assert_eq!(reloaded.overlay_open_ms, 150);
        assert_eq!(reloaded.overlay_close_ms, 200);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "theme_name: default\n").unwrap();
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(config.theme_name, "default");
        assert_eq!(config.overlay_open_ms, 300);
        assert!(config.places_api_key.is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_resolve_data_dir_defaults_to_config_dir() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(config.resolve_data_dir().unwrap(), dir);

        config.data_dir = Some(PathBuf::from("/tmp/elsewhere"));
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/elsewhere")
        );
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_without_path_fails() {
        let config = Config::new();
        assert!(config.save().is_err());
    }
}
