// SPDX-License-Identifier: GPL-3.0-only
// Shared types for the capture and gallery backends

//! Shared types for backends

use image::RgbaImage;
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// A decoded, upright still image produced by a capture device
///
/// Pixel data is reference counted so the gallery can read it while the
/// controller still holds the review slot. Cloning never copies pixels.
#[derive(Clone)]
pub struct CapturedImage {
    id: Uuid,
    pixels: Arc<RgbaImage>,
}

impl CapturedImage {
    /// Wrap an upright RGBA image
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            pixels: Arc::new(pixels),
        }
    }

    /// Unique id of this capture
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read-only view of the pixel buffer
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Weak handle to the pixel buffer
    ///
    /// Upgrading fails once every owner has released the buffer.
    pub fn downgrade(&self) -> Weak<RgbaImage> {
        Arc::downgrade(&self.pixels)
    }
}

impl PartialEq for CapturedImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CapturedImage {}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CapturedImage({} {}x{})",
            self.id,
            self.pixels.width(),
            self.pixels.height()
        )
    }
}

/// Sensor rotation in degrees (clockwise)
///
/// Sensors are often mounted rotated relative to the display. Devices apply
/// the rotation before handing an image out, so it is upright as viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorRotation {
    /// No rotation (sensor is oriented correctly)
    #[default]
    None,
    /// 90 degrees clockwise
    Rotate90,
    /// 180 degrees (upside down)
    Rotate180,
    /// 270 degrees clockwise (90 degrees counter-clockwise)
    Rotate270,
}

impl SensorRotation {
    /// Parse rotation from degrees
    ///
    /// Any multiple of 90 is accepted, negative values wrap around.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        match degrees.rem_euclid(360) {
            0 => Some(SensorRotation::None),
            90 => Some(SensorRotation::Rotate90),
            180 => Some(SensorRotation::Rotate180),
            270 => Some(SensorRotation::Rotate270),
            _ => None,
        }
    }

    /// Get rotation in degrees
    pub fn degrees(&self) -> u32 {
        match self {
            SensorRotation::None => 0,
            SensorRotation::Rotate90 => 90,
            SensorRotation::Rotate180 => 180,
            SensorRotation::Rotate270 => 270,
        }
    }

    /// Return the upright image
    pub fn apply(&self, image: RgbaImage) -> RgbaImage {
        use image::imageops;

        match self {
            SensorRotation::None => image,
            SensorRotation::Rotate90 => imageops::rotate90(&image),
            SensorRotation::Rotate180 => imageops::rotate180(&image),
            SensorRotation::Rotate270 => imageops::rotate270(&image),
        }
    }
}

impl std::fmt::Display for SensorRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Device is busy with another request
    Busy,
    /// Camera permission revoked or missing
    PermissionDenied,
    /// Backend or source is not available
    NotAvailable(String),
    /// Image decoding failed
    Decoding(String),
    /// Image encoding failed
    Encoding(String),
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Busy => write!(f, "Device is busy"),
            BackendError::PermissionDenied => write!(f, "Permission denied"),
            BackendError::NotAvailable(msg) => write!(f, "Not available: {}", msg),
            BackendError::Decoding(msg) => write!(f, "Decoding failed: {}", msg),
            BackendError::Encoding(msg) => write!(f, "Encoding failed: {}", msg),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => BackendError::PermissionDenied,
            _ => BackendError::IoError(err.to_string()),
        }
    }
}
