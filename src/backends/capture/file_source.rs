// SPDX-License-Identifier: GPL-3.0-only

//! File source capture device
//!
//! Each capture decodes an image file from disk and rotates it upright.
//! The lens selection picks between a back and an optional front file.

use super::DeviceSettings;
use crate::backends::types::{BackendError, BackendResult, CapturedImage, SensorRotation};
use crate::backends::CaptureDevice;
use crate::constants::file_formats;
use crate::flash::FlashMode;
use crate::lens::LensSelection;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Capture device backed by image files
pub struct FileSourceDevice {
    back: PathBuf,
    front: Option<PathBuf>,
    rotation: SensorRotation,
    settings: Mutex<DeviceSettings>,
}

impl FileSourceDevice {
    /// Create a device that captures `path` for both lenses
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            back: path.into(),
            front: None,
            rotation: SensorRotation::None,
            settings: Mutex::new(DeviceSettings::default()),
        }
    }

    /// Use a different file while the front lens is selected
    pub fn with_front(mut self, path: impl Into<PathBuf>) -> Self {
        self.front = Some(path.into());
        self
    }

    /// Rotation to normalize decoded images by
    pub fn with_rotation(mut self, rotation: SensorRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// File the next capture will read
    pub fn current_source(&self) -> &Path {
        let settings = *self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        match (settings.lens, &self.front) {
            (LensSelection::Front, Some(front)) => front,
            _ => &self.back,
        }
    }

    fn load(path: &Path, rotation: SensorRotation) -> BackendResult<CapturedImage> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if !file_formats::is_image_extension(&extension) {
            return Err(BackendError::NotAvailable(format!(
                "Unsupported file format: {}",
                extension
            )));
        }

        if !path.exists() {
            return Err(BackendError::NotAvailable(format!(
                "Source file not found: {}",
                path.display()
            )));
        }

        let decoded = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => BackendError::from(io),
            other => BackendError::Decoding(other.to_string()),
        })?;

        let upright = rotation.apply(decoded.to_rgba8());
        Ok(CapturedImage::new(upright))
    }
}

impl CaptureDevice for FileSourceDevice {
    fn capture(&self) -> BoxFuture<'_, BackendResult<CapturedImage>> {
        let path = self.current_source().to_path_buf();
        let rotation = self.rotation;

        Box::pin(async move {
            debug!(path = %path.display(), "Loading image as capture");

            let image = tokio::task::spawn_blocking(move || Self::load(&path, rotation))
                .await
                .map_err(|e| BackendError::Other(format!("Load task error: {}", e)))??;

            info!(
                width = image.width(),
                height = image.height(),
                "Image file captured"
            );
            Ok(image)
        })
    }

    fn set_flash_mode(&self, mode: FlashMode) {
        // A file has no flash; remembered only so the setting round-trips
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flash_mode = mode;
    }

    fn set_lens_selection(&self, lens: LensSelection) {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lens = lens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn temp_image(width: u32, height: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!("capture-src-{}.png", uuid::Uuid::new_v4()));
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[tokio::test]
    async fn test_capture_decodes_and_rotates() {
        let path = temp_image(6, 4);
        let device = FileSourceDevice::new(&path).with_rotation(SensorRotation::Rotate90);
        let image = device.capture().await.unwrap();
        assert_eq!((image.width(), image.height()), (4, 6));
        assert_eq!(image.pixels().get_pixel(0, 0).0, [10, 20, 30, 255]);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_not_available() {
        let device = FileSourceDevice::new("/nonexistent/photo.png");
        let err = device.capture().await.unwrap_err();
        assert!(matches!(err, BackendError::NotAvailable(_)));
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let device = FileSourceDevice::new("clip.mp4");
        let err = device.capture().await.unwrap_err();
        assert!(matches!(err, BackendError::NotAvailable(ref m) if m.contains("mp4")));
    }

    #[test]
    fn test_front_lens_switches_source() {
        let device = FileSourceDevice::new("back.png").with_front("front.png");
        assert_eq!(device.current_source(), Path::new("back.png"));
        device.set_lens_selection(LensSelection::Front);
        assert_eq!(device.current_source(), Path::new("front.png"));
    }
}
