// SPDX-License-Identifier: GPL-3.0-only

//! Lens (physical camera) selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which physical camera supplies the live feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LensSelection {
    /// User-facing camera
    Front,
    /// World-facing camera
    #[default]
    Back,
}

impl LensSelection {
    /// Swap front and back
    pub fn toggled(self) -> Self {
        match self {
            LensSelection::Back => LensSelection::Front,
            LensSelection::Front => LensSelection::Back,
        }
    }

    /// Flash controls only make sense for the world-facing camera
    pub fn supports_flash(self) -> bool {
        matches!(self, LensSelection::Back)
    }
}

impl fmt::Display for LensSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LensSelection::Front => write!(f, "front"),
            LensSelection::Back => write!(f, "back"),
        }
    }
}
