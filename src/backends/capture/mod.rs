// SPDX-License-Identifier: GPL-3.0-only

//! Capture device implementations
//!
//! - [`TestPatternDevice`]: renders a synthetic frame, no hardware needed
//! - [`FileSourceDevice`]: "captures" by decoding an image file from disk

mod file_source;
mod test_pattern;

pub use file_source::FileSourceDevice;
pub use test_pattern::TestPatternDevice;

use crate::flash::FlashMode;
use crate::lens::LensSelection;

/// Settings forwarded by the controller, applied on the next capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceSettings {
    pub flash_mode: FlashMode,
    pub lens: LensSelection,
}
