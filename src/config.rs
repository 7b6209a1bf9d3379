// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON under the user's config directory. Missing files and
//! missing fields fall back to defaults.

use crate::backends::SensorRotation;
use crate::backends::gallery::{EncodingFormat, EncodingQuality, default_photo_dir};
use crate::constants::{CONFIG_FILE_NAME, CONFIG_FOLDER, test_pattern};
use crate::controller::ControllerSettings;
use crate::errors::{AppError, AppResult};
use crate::flash::FlashMode;
use crate::lens::LensSelection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Photo output format
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PhotoOutputFormat {
    /// JPEG (lossy, small files)
    #[default]
    Jpeg,
    /// PNG (lossless)
    Png,
}

impl From<PhotoOutputFormat> for EncodingFormat {
    fn from(format: PhotoOutputFormat) -> Self {
        match format {
            PhotoOutputFormat::Jpeg => EncodingFormat::Jpeg,
            PhotoOutputFormat::Png => EncodingFormat::Png,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where photos are saved (default: `<Pictures>/photo-capture`)
    pub photo_dir: Option<PathBuf>,
    /// Encoding for saved photos
    pub output_format: PhotoOutputFormat,
    /// JPEG quality preset
    pub quality: EncodingQuality,
    /// Flash mode at startup
    pub default_flash: FlashMode,
    /// Lens at startup
    pub default_lens: LensSelection,
    /// Test pattern sensor width
    pub pattern_width: u32,
    /// Test pattern sensor height
    pub pattern_height: u32,
    /// Sensor mounting rotation in degrees (multiple of 90)
    pub sensor_rotation_degrees: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photo_dir: None,
            output_format: PhotoOutputFormat::default(),
            quality: EncodingQuality::default(),
            default_flash: FlashMode::Off,
            default_lens: LensSelection::Back,
            pattern_width: test_pattern::DEFAULT_WIDTH,
            pattern_height: test_pattern::DEFAULT_HEIGHT,
            sensor_rotation_degrees: 0,
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FOLDER)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Resolved photo directory
    pub fn photo_dir(&self) -> PathBuf {
        self.photo_dir.clone().unwrap_or_else(default_photo_dir)
    }

    /// Sensor rotation, ignoring values that are not a multiple of 90
    pub fn sensor_rotation(&self) -> SensorRotation {
        SensorRotation::from_degrees(self.sensor_rotation_degrees).unwrap_or_else(|| {
            warn!(
                degrees = self.sensor_rotation_degrees,
                "Invalid sensor rotation, using none"
            );
            SensorRotation::None
        })
    }

    /// Startup flash/lens settings for the controller
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            flash_mode: self.default_flash,
            lens: self.default_lens,
        }
    }
}
