// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Folder (under the user's pictures directory) photos are saved to
pub const DEFAULT_SAVE_FOLDER: &str = "photo-capture";

/// Folder (under the user's config directory) holding the config file
pub const CONFIG_FOLDER: &str = "photo-capture";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Prefix for saved photo file names
pub const PHOTO_FILE_PREFIX: &str = "IMG";

/// Capacity of the controller event channel
///
/// Slow subscribers lag and skip old events rather than block the controller.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Test pattern sensor defaults
pub mod test_pattern {
    /// Default sensor width in pixels
    pub const DEFAULT_WIDTH: u32 = 1280;

    /// Default sensor height in pixels
    pub const DEFAULT_HEIGHT: u32 = 960;
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// How long the "photo saved" toast stays on screen
    pub const TOAST_DURATION: Duration = Duration::from_millis(2000);

    /// Fade in/out duration of the toast
    pub const TOAST_FADE: Duration = Duration::from_millis(1000);
}

/// User-facing strings
pub mod strings {
    /// Confirmation shown after a photo was saved
    pub const PHOTO_SAVED: &str = "Photo was saved to camera roll";

    /// Title shown when camera access is missing
    pub const NO_PERMISSION_TITLE: &str = "Couldn't use Camera.";

    /// Hint shown when camera access is missing
    pub const NO_PERMISSION_HINT: &str =
        "To use the camera, please enable camera access in your device settings";
}

/// Supported file formats for the file source device
pub mod file_formats {
    /// Supported image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// Check if a file extension is a supported image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}
