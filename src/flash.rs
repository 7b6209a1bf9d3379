// SPDX-License-Identifier: GPL-3.0-only

//! Flash mode selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flash operating mode for still capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlashMode {
    /// Flash never fires
    #[default]
    Off,
    /// Flash fires on every capture
    On,
    /// Device decides per capture (representable, not offered by the UI)
    Auto,
}

impl FlashMode {
    /// The mode the on-screen flash button switches to
    ///
    /// Anything other than `Off` is shown as lit, so it switches back to `Off`.
    pub fn toggled(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On | FlashMode::Auto => FlashMode::Off,
        }
    }

    /// Parse a user-facing name ("on", "off", "auto")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "off" => Some(FlashMode::Off),
            "on" => Some(FlashMode::On),
            "auto" => Some(FlashMode::Auto),
            _ => None,
        }
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashMode::Off => write!(f, "off"),
            FlashMode::On => write!(f, "on"),
            FlashMode::Auto => write!(f, "auto"),
        }
    }
}
