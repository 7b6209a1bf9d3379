// SPDX-License-Identifier: GPL-3.0-only

//! Photo Capture - capture, review and save single photos
//!
//! This library owns the state behind a simple camera screen: a live preview,
//! a review screen for the photo just taken, and flash/lens toggles. Camera
//! hardware, gallery storage and permissions are collaborators behind traits.
//!
//! # Architecture
//!
//! - [`controller`]: the capture state controller and its observable state
//! - [`backends`]: capture device, gallery and permission contracts plus
//!   implementations
//! - [`screen`]: view model and command dispatch for a presentation host
//! - [`config`]: user configuration handling
//!
//! # Example
//!
//! ```ignore
//! let controller = CaptureStateController::new(device, gallery, settings)?;
//! controller.request_capture()?.await?;
//! controller.save_photo_to_gallery()?.await?;
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod flash;
pub mod lens;
pub mod screen;

// Re-export commonly used types
pub use backends::{CaptureDevice, CapturedImage, GallerySink, PermissionGate};
pub use config::Config;
pub use controller::{
    CapturePhase, CaptureState, CaptureStateController, ControllerEvent, ControllerSettings,
};
pub use errors::{AppError, AppResult, CommandError};
pub use flash::FlashMode;
pub use lens::LensSelection;
pub use screen::{ScreenCommand, ScreenView};
