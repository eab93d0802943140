use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;
use super::locale::DEFAULT_LOCALE;
use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ffmpeg_path: PathBuf,
    pub scratch_dir: Option<PathBuf>,
    pub artifact_dir: PathBuf,
    pub messages_dir: Option<PathBuf>,
    pub default_locale: String,
    pub log: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            scratch_dir: None,
            artifact_dir: std::env::temp_dir().join("video_compressor"),
            messages_dir: None,
            default_locale: DEFAULT_LOCALE.to_string(),
            log: LogDestination::Terminal,
            log_file: PathBuf::from("./compressor.log"),
        }
    }
}

impl AppConfig {
    /// Command-line flags win over file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.ffmpeg {
            self.ffmpeg_path = path.clone();
        }
        if let Some(dir) = &cli.artifact_dir {
            self.artifact_dir = dir.clone();
        }
        if let Some(dir) = &cli.messages_dir {
            self.messages_dir = Some(dir.clone());
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        self
    }
}

/// Loads the RON config at `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&text).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    engine_info!("Loaded config from {:?}", path);
    Ok(config)
}
