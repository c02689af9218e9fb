//! Run configuration: optional TOML file plus CLI resolution.
//!
//! Precedence is CLI > config file > built-in defaults. The resolved
//! [`RunConfig`] is immutable for the lifetime of the run.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::{parse_image_size, Args, PreprocessingArg};
use crate::preprocess::Preprocessing;

pub const DEFAULT_OUTPUT_DIRECTORY: &str = "./outputs_display";
pub const DEFAULT_CAMERA_ID: i32 = 0;
pub const DEFAULT_CAPTURES_PERIOD: u32 = 50;

/// A resize target stored as (rows, columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeHw {
    pub height: i32,
    pub width: i32,
}

/// Immutable configuration for one capture run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory where saved frames are written. Created if absent.
    pub output_directory: PathBuf,
    /// Optional exact (rows, columns) resize target.
    pub image_size: Option<SizeHw>,
    /// Camera device identifier.
    pub camera_id: i32,
    /// Optional fixed transform applied to every frame.
    pub preprocessing: Option<Preprocessing>,
    /// Frame count between rate reports.
    pub captures_period: u32,
}

/// Configuration file structure, loaded from the path given via `--config`.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CameraConfig {
    pub device: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CaptureConfig {
    /// Same '(H, W)' literal format as `--imageSizeHW`.
    pub image_size: Option<String>,
    /// Same mode names as `--preprocessing`.
    pub preprocessing: Option<String>,
    pub captures_period: Option<u32>,
}

impl FileConfig {
    /// Load configuration from an explicitly given file path.
    ///
    /// No path means no file config; an explicit path that cannot be read
    /// or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl RunConfig {
    /// Resolve the effective run configuration from CLI arguments and an
    /// optional config file.
    pub fn resolve(args: &Args, file: &FileConfig) -> Result<Self, ConfigError> {
        let output_directory = args
            .output_directory
            .clone()
            .or_else(|| file.output.directory.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));

        let camera_id = args
            .camera_id
            .or(file.camera.device)
            .unwrap_or(DEFAULT_CAMERA_ID);

        let image_size = match args.image_size_hw {
            Some(arg) => arg.0,
            None => match &file.capture.image_size {
                Some(s) => {
                    parse_image_size(s)
                        .map_err(|message| ConfigError::InvalidValue {
                            key: "capture.image_size",
                            message,
                        })?
                        .0
                }
                None => None,
            },
        };

        let preprocessing: Option<Preprocessing> = match args.preprocessing {
            Some(arg) => arg.into(),
            None => match &file.capture.preprocessing {
                Some(s) => PreprocessingArg::parse_name(s)
                    .map_err(|message| ConfigError::InvalidValue {
                        key: "capture.preprocessing",
                        message,
                    })?
                    .into(),
                None => None,
            },
        };

        let captures_period = args
            .captures_period
            .or(file.capture.captures_period)
            .unwrap_or(DEFAULT_CAPTURES_PERIOD);
        if captures_period == 0 {
            return Err(ConfigError::InvalidValue {
                key: "capture.captures_period",
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            output_directory,
            image_size,
            camera_id,
            preprocessing,
            captures_period,
        })
    }
}

/// Errors that can occur while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}
