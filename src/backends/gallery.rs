// SPDX-License-Identifier: GPL-3.0-only

//! Directory-backed photo gallery
//!
//! Encodes captured images to JPEG or PNG and writes them into a photo
//! directory. Encoding and disk I/O run on the blocking pool.

use crate::backends::types::{BackendError, BackendResult, CapturedImage};
use crate::backends::GallerySink;
use crate::constants::{DEFAULT_SAVE_FOLDER, PHOTO_FILE_PREFIX};
use futures::future::BoxFuture;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    #[default]
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }
}

/// Encoding quality settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// High quality (low compression)
    #[default]
    High,
    /// Maximum quality (minimal compression)
    Maximum,
}

impl EncodingQuality {
    /// Get JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            EncodingQuality::Low => 60,
            EncodingQuality::Medium => 80,
            EncodingQuality::High => 92,
            EncodingQuality::Maximum => 98,
        }
    }
}

/// Default photo directory: `<Pictures>/photo-capture`
pub fn default_photo_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(DEFAULT_SAVE_FOLDER)
}

/// Gallery that writes photos into a directory
#[derive(Debug, Clone)]
pub struct DirectoryGallery {
    dir: PathBuf,
    format: EncodingFormat,
    quality: EncodingQuality,
}

impl DirectoryGallery {
    /// Create a gallery writing high quality JPEGs into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            format: EncodingFormat::default(),
            quality: EncodingQuality::default(),
        }
    }

    /// Set encoding format
    pub fn with_format(mut self, format: EncodingFormat) -> Self {
        self.format = format;
        self
    }

    /// Set encoding quality (only affects JPEG)
    pub fn with_quality(mut self, quality: EncodingQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Timestamped, collision-free file name
    fn file_name(&self) -> String {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!(
            "{}_{}_{}.{}",
            PHOTO_FILE_PREFIX,
            timestamp,
            &suffix[..8],
            self.format.extension()
        )
    }

    fn encode(
        image: &CapturedImage,
        format: EncodingFormat,
        quality: EncodingQuality,
    ) -> BackendResult<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        match format {
            EncodingFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgba8(image.pixels().clone()).to_rgb8();
                let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                    &mut cursor,
                    quality.jpeg_quality(),
                );
                encoder
                    .encode(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        image::ExtendedColorType::Rgb8,
                    )
                    .map_err(|e| BackendError::Encoding(format!("JPEG encoding failed: {}", e)))?;
            }
            EncodingFormat::Png => {
                image
                    .pixels()
                    .write_to(&mut cursor, ImageFormat::Png)
                    .map_err(|e| BackendError::Encoding(format!("PNG encoding failed: {}", e)))?;
            }
        }

        Ok(buffer)
    }
}

impl GallerySink for DirectoryGallery {
    fn save(&self, image: CapturedImage) -> BoxFuture<'_, BackendResult<PathBuf>> {
        let filepath = self.dir.join(self.file_name());
        let (dir, format, quality) = (self.dir.clone(), self.format, self.quality);

        Box::pin(async move {
            info!(path = %filepath.display(), id = %image.id(), "Saving photo");

            let target = filepath.clone();
            tokio::task::spawn_blocking(move || {
                let data = Self::encode(&image, format, quality)?;
                debug!(size = data.len(), ?format, "Encoding complete");

                std::fs::create_dir_all(&dir)?;
                std::fs::write(&target, &data)?;
                Ok::<_, BackendError>(())
            })
            .await
            .map_err(|e| BackendError::Other(format!("Save task error: {}", e)))??;

            info!(path = %filepath.display(), "Photo saved successfully");
            Ok(filepath)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("gallery-test-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_jpeg_quality_ordering() {
        assert!(EncodingQuality::Low.jpeg_quality() < EncodingQuality::Medium.jpeg_quality());
        assert!(EncodingQuality::High.jpeg_quality() < EncodingQuality::Maximum.jpeg_quality());
    }

    #[tokio::test]
    async fn test_save_png_roundtrips_pixels() {
        let dir = temp_dir();
        let gallery = DirectoryGallery::new(&dir).with_format(EncodingFormat::Png);
        let image = CapturedImage::new(RgbaImage::from_pixel(5, 3, Rgba([1, 2, 3, 255])));

        let path = gallery.save(image).await.unwrap();
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (5, 3));
        assert_eq!(loaded.get_pixel(4, 2).0, [1, 2, 3, 255]);
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_save_jpeg_creates_directory() {
        let dir = temp_dir().join("nested");
        let gallery = DirectoryGallery::new(&dir);
        let image = CapturedImage::new(RgbaImage::new(16, 16));

        let path = gallery.save(image).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("IMG_"));
        assert!(name.ends_with(".jpg"));
        assert!(path.exists());
        std::fs::remove_dir_all(dir.parent().unwrap()).ok();
    }

    #[test]
    fn test_file_names_do_not_collide() {
        let gallery = DirectoryGallery::new("/tmp");
        assert_ne!(gallery.file_name(), gallery.file_name());
    }

    #[tokio::test]
    async fn test_save_into_file_path_fails() {
        let blocker =
            std::env::temp_dir().join(format!("gallery-blocker-{}", uuid::Uuid::new_v4()));
        std::fs::write(&blocker, b"not a directory").unwrap();
        let gallery = DirectoryGallery::new(&blocker);

        let result = gallery.save(CapturedImage::new(RgbaImage::new(2, 2))).await;
        assert!(result.is_err());
        std::fs::remove_file(blocker).ok();
    }
}
